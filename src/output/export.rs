//! JSON export file
//!
//! Amounts are written as JSON numbers; the formatted strings carry the
//! two-decimal display form.

use super::report::format_price;
use crate::aggregate::AggregateResult;
use crate::error::{Result, ResultExt};
use crate::types::{TransactionKind, TransactionRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Totals block of the export
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_purchases: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,
    /// Empty when no symbol was detected
    pub currency: String,
    pub item_count: usize,
}

/// One exported transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTransaction {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub formatted_price: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl ExportTransaction {
    fn from_record(record: &TransactionRecord, currency: &str) -> Self {
        Self {
            name: record.name.clone(),
            price: record.amount,
            formatted_price: format_price(record.amount, currency),
            kind: record.kind,
        }
    }
}

/// Top-level export document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    pub summary: ExportSummary,
    /// Every accepted record in fetch order
    pub transactions: Vec<ExportTransaction>,
}

impl ExportDocument {
    pub fn from_result(result: &AggregateResult) -> Self {
        let currency = result.currency_symbol();
        Self {
            summary: ExportSummary {
                total_sales: result.sales_total,
                total_purchases: result.purchases_total,
                grand_total: result.grand_total,
                currency: currency.to_string(),
                item_count: result.item_count(),
            },
            transactions: result
                .items
                .iter()
                .map(|record| ExportTransaction::from_record(record, currency))
                .collect(),
        }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write the export document for `result` to `path`
///
/// Missing parent directories are created.
pub fn write_export(path: impl AsRef<Path>, result: &AggregateResult) -> Result<()> {
    let path = path.as_ref();
    let json = ExportDocument::from_result(result).to_json_pretty()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .context(format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, json).context(format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), items = result.item_count(), "Wrote export");
    Ok(())
}

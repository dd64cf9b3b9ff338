//! Running totals over accepted rows
//!
//! Sums are kept at full precision and rounded once, when the run
//! finishes. The first currency symbol seen wins for the whole run.

use crate::extract::ParsedRow;
use crate::types::{TransactionKind, TransactionRecord};
use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits kept in the final totals
const TOTAL_DECIMALS: u32 = 2;

/// Final totals and records of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateResult {
    pub sales_total: Decimal,
    pub purchases_total: Decimal,
    pub grand_total: Decimal,
    /// First symbol seen; `None` if no row carried one
    pub currency: Option<String>,
    /// Accepted records, page order then document order
    pub items: Vec<TransactionRecord>,
}

impl AggregateResult {
    /// Number of accepted records
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Currency symbol, empty when none was detected
    pub fn currency_symbol(&self) -> &str {
        self.currency.as_deref().unwrap_or("")
    }

    pub fn sales(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.items.iter().filter(|r| r.is_sale())
    }

    pub fn purchases(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.items.iter().filter(|r| r.is_purchase())
    }
}

/// Accumulates rows for one run
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    sales: Decimal,
    purchases: Decimal,
    grand: Decimal,
    currency: Option<String>,
    items: Vec<TransactionRecord>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one accepted row
    pub fn add(&mut self, row: ParsedRow) {
        if self.currency.is_none() {
            self.currency = row.currency.filter(|c| !c.is_empty());
        }
        self.add_record(row.record);
    }

    /// Add one record with no currency information
    pub fn add_record(&mut self, record: TransactionRecord) {
        self.grand += record.amount;
        match record.kind {
            TransactionKind::Sale => self.sales += record.amount,
            TransactionKind::Purchase => self.purchases += record.amount,
        }
        self.items.push(record);
    }

    /// Add a page's rows in order
    pub fn extend(&mut self, rows: impl IntoIterator<Item = ParsedRow>) {
        for row in rows {
            self.add(row);
        }
    }

    /// Records accepted so far
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Round the totals and hand over the records
    pub fn finish(self) -> AggregateResult {
        AggregateResult {
            sales_total: round_total(self.sales),
            purchases_total: round_total(self.purchases),
            grand_total: round_total(self.grand),
            currency: self.currency,
            items: self.items,
        }
    }
}

/// Half-up rounding to two places
fn round_total(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(TOTAL_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

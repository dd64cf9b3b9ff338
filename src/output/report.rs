//! Console report

use crate::aggregate::AggregateResult;
use crate::types::TransactionRecord;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

/// Format an amount as `<symbol><amount>` with two decimals
pub fn format_price(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{currency}{rounded:.2}")
}

/// The `n` most expensive records, highest first
///
/// Equal prices keep their fetch order.
pub fn top_transactions(result: &AggregateResult, n: usize) -> Vec<&TransactionRecord> {
    let mut records: Vec<&TransactionRecord> = result.items.iter().collect();
    records.sort_by(|a, b| b.amount.cmp(&a.amount));
    records.truncate(n);
    records
}

/// Totals block shown after a run
pub fn render_summary(result: &AggregateResult) -> String {
    let currency = result.currency_symbol();
    let mut out = String::new();
    let _ = writeln!(out, "Market history summary");
    let _ = writeln!(out, "  Transactions: {}", result.item_count());
    let _ = writeln!(
        out,
        "  Sales:        {} ({})",
        format_price(result.sales_total, currency),
        result.sales().count()
    );
    let _ = writeln!(
        out,
        "  Purchases:    {} ({})",
        format_price(result.purchases_total, currency),
        result.purchases().count()
    );
    let _ = write!(
        out,
        "  Total:        {}",
        format_price(result.grand_total, currency)
    );
    out
}

/// Numbered list of records, one per line
pub fn render_transactions(records: &[&TransactionRecord], currency: &str) -> String {
    let prices: Vec<String> = records
        .iter()
        .map(|r| format_price(r.amount, currency))
        .collect();
    let width = prices.iter().map(|p| p.chars().count()).max().unwrap_or(0);

    records
        .iter()
        .zip(&prices)
        .enumerate()
        .map(|(i, (record, price))| {
            format!(
                "{:>3}. {:<8} {:>width$}  {}",
                i + 1,
                record.kind.as_str(),
                price,
                record.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

//! Fragment parsing
//!
//! Pulls row texts out of the HTML with CSS selectors, then turns each
//! row into a classified, priced record. Bad rows are dropped here and
//! only show up in debug logs.

use super::types::{
    DropReason, PageExtraction, ParsedRow, RawRow, RowSelectors, INDICATOR_SELECTOR,
    NAME_SELECTOR, PRICE_SELECTOR, ROW_SELECTOR,
};
use crate::types::{TransactionKind, TransactionRecord, UNKNOWN_ITEM};
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

/// Optional leading symbol, then a number with `.` or `,` as separator
static PRICE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\d\s.,+\-]*)\s*(\d+(?:[.,]\d+)?)").unwrap());

pub(super) static DEFAULT_SELECTORS: LazyLock<RowSelectors> = LazyLock::new(|| {
    RowSelectors::new(ROW_SELECTOR, INDICATOR_SELECTOR, PRICE_SELECTOR, NAME_SELECTOR).unwrap()
});

/// Marker in the indicator cell for items that left the inventory
const SALE_MARKER: char = '-';

/// Marker in the indicator cell for items that entered the inventory
const PURCHASE_MARKER: char = '+';

/// Find every row in a fragment and read its sub-element texts
pub fn select_rows(html: &str, selectors: &RowSelectors) -> Vec<RawRow> {
    let fragment = Html::parse_fragment(html);

    fragment
        .select(&selectors.row)
        .map(|row| RawRow {
            indicator: child_text(row, &selectors.indicator),
            price: child_text(row, &selectors.price),
            name: child_text(row, &selectors.name),
        })
        .collect()
}

/// Whitespace-normalized text of the first match under `row`
fn child_text(row: ElementRef<'_>, selector: &Selector) -> Option<String> {
    row.select(selector).next().map(|el| {
        el.text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// Sale on `-`, purchase on `+`, nothing otherwise
pub fn classify(indicator: &str) -> Option<TransactionKind> {
    if indicator.contains(SALE_MARKER) {
        Some(TransactionKind::Sale)
    } else if indicator.contains(PURCHASE_MARKER) {
        Some(TransactionKind::Purchase)
    } else {
        None
    }
}

/// Split price text into its leading symbol and amount
///
/// `"$1.00"` gives `(Some("$"), 1.00)`, `"1,50€"` gives `(None, 1.50)`:
/// only a symbol in front of the number is recognised.
pub fn parse_price(text: &str) -> Option<(Option<String>, Decimal)> {
    let caps = PRICE_REGEX.captures(text)?;
    let number = caps.get(2)?.as_str().replace(',', ".");
    let amount = Decimal::from_str(&number).ok()?;

    let symbol = caps
        .get(1)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .map(String::from);

    Some((symbol, amount))
}

/// Turn raw row texts into a record, or say why the row is dropped
pub fn parse_row(raw: &RawRow) -> Result<ParsedRow, DropReason> {
    let indicator = raw.indicator.as_deref().ok_or(DropReason::MissingIndicator)?;
    let price = raw.price.as_deref().ok_or(DropReason::MissingPrice)?;

    let kind = classify(indicator).ok_or(DropReason::NoMarker)?;
    let (currency, amount) = parse_price(price).ok_or(DropReason::UnparseablePrice)?;

    let name = raw
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_ITEM);

    Ok(ParsedRow {
        record: TransactionRecord::new(name, amount, kind),
        currency,
    })
}

/// Parses history fragments with a fixed selector set
#[derive(Debug, Clone, Default)]
pub struct MarkupExtractor {
    selectors: RowSelectors,
}

impl MarkupExtractor {
    /// Create an extractor with the Steam selectors
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom selectors
    pub fn with_selectors(selectors: RowSelectors) -> Self {
        Self { selectors }
    }

    /// Extract accepted rows from one fragment, in document order
    pub fn extract(&self, html: &str) -> PageExtraction {
        let raw_rows = select_rows(html, &self.selectors);
        let rows_seen = raw_rows.len();

        let mut rows = Vec::with_capacity(rows_seen);
        for (index, raw) in raw_rows.iter().enumerate() {
            match parse_row(raw) {
                Ok(row) => rows.push(row),
                Err(reason) => debug!(index, %reason, "Dropping row"),
            }
        }

        PageExtraction {
            dropped: rows_seen - rows.len(),
            rows,
            rows_seen,
        }
    }
}

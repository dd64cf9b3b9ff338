//! Extractor types
//!
//! Selector sets, raw row text and parsed rows.

use crate::error::{Error, Result};
use crate::types::TransactionRecord;
use scraper::Selector;
use std::fmt;

/// Default selector for one history row
pub const ROW_SELECTOR: &str = ".market_listing_row";

/// Default selector for the `+`/`-` gain or loss cell
pub const INDICATOR_SELECTOR: &str = ".market_listing_gainorloss";

/// Default selector for the price text
pub const PRICE_SELECTOR: &str = ".market_listing_price";

/// Default selector for the item name
pub const NAME_SELECTOR: &str = ".market_listing_item_name";

/// Compiled CSS selectors used to pull rows out of a fragment
///
/// The sub-element selectors are matched inside each row element.
#[derive(Debug, Clone)]
pub struct RowSelectors {
    pub(crate) row: Selector,
    pub(crate) indicator: Selector,
    pub(crate) price: Selector,
    pub(crate) name: Selector,
}

impl RowSelectors {
    /// Compile a selector set
    pub fn new(row: &str, indicator: &str, price: &str, name: &str) -> Result<Self> {
        Ok(Self {
            row: compile(row)?,
            indicator: compile(indicator)?,
            price: compile(price)?,
            name: compile(name)?,
        })
    }
}

impl Default for RowSelectors {
    fn default() -> Self {
        super::parser::DEFAULT_SELECTORS.clone()
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| Error::invalid_value("selector", format!("'{selector}': {e}")))
}

/// Text of one row's sub-elements, `None` where the element is absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// Gain/loss indicator text
    pub indicator: Option<String>,
    /// Price text, symbol included
    pub price: Option<String>,
    /// Item name text
    pub name: Option<String>,
}

impl RawRow {
    /// Create a raw row from optional texts
    pub fn new(
        indicator: Option<&str>,
        price: Option<&str>,
        name: Option<&str>,
    ) -> Self {
        Self {
            indicator: indicator.map(String::from),
            price: price.map(String::from),
            name: name.map(String::from),
        }
    }
}

/// A row that passed classification and price parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    /// The accepted transaction
    pub record: TransactionRecord,
    /// Symbol captured in front of the price, if any
    pub currency: Option<String>,
}

/// Why a row was left out of the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// No indicator element
    MissingIndicator,
    /// No price element
    MissingPrice,
    /// Indicator has neither `+` nor `-`
    NoMarker,
    /// Price text holds no usable number
    UnparseablePrice,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::MissingIndicator => "missing indicator element",
            Self::MissingPrice => "missing price element",
            Self::NoMarker => "indicator has no +/- marker",
            Self::UnparseablePrice => "unparseable price",
        };
        f.write_str(reason)
    }
}

/// Everything extracted from one fragment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    /// Accepted rows in document order
    pub rows: Vec<ParsedRow>,
    /// Row elements found, accepted or not
    pub rows_seen: usize,
    /// Row elements dropped
    pub dropped: usize,
}

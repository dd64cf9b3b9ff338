//! Markup extraction module
//!
//! Turns the `results_html` fragment of a history page into records.
//!
//! # Overview
//!
//! - `select_rows` - structural parsing: one `RawRow` of optional texts per row element
//! - `parse_row` - classification (`-` sale, `+` purchase) and price parsing
//! - `MarkupExtractor` - both steps over a whole fragment
//!
//! Rows missing the indicator or price, rows without a marker and rows
//! with an unreadable price are dropped without raising an error.

mod parser;
mod types;

pub use parser::{classify, parse_price, parse_row, select_rows, MarkupExtractor};
pub use types::{
    DropReason, PageExtraction, ParsedRow, RawRow, RowSelectors, INDICATOR_SELECTOR,
    NAME_SELECTOR, PRICE_SELECTOR, ROW_SELECTOR,
};

#[cfg(test)]
mod tests;

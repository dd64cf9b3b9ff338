//! Output module
//!
//! Turns an `AggregateResult` into something a person or another tool
//! can read.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Building and writing the JSON export document
//! - Formatting prices with the run's currency symbol
//! - Selecting and rendering the top transactions for the console

mod export;
mod report;

pub use export::{write_export, ExportDocument, ExportSummary, ExportTransaction};
pub use report::{format_price, render_summary, render_transactions, top_transactions};

//! Common types used throughout market-history
//!
//! Transaction records and the constants shared by the fetcher,
//! the extractor and the output layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

/// Market history endpoint that renders one page of rows as HTML
pub const DEFAULT_ENDPOINT: &str = "https://steamcommunity.com/market/myhistory/render/";

/// Rows requested per page (`count` query parameter)
pub const PAGE_SIZE: u32 = 500;

/// Pause between consecutive page fetches
pub const PAGE_DELAY: Duration = Duration::from_millis(3000);

/// Name used when a row carries no readable item name
pub const UNKNOWN_ITEM: &str = "Unknown Item";

// ============================================================================
// Transactions
// ============================================================================

/// Direction of a market transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Item left the inventory (indicator `-`)
    Sale,
    /// Item entered the inventory (indicator `+`)
    Purchase,
}

impl TransactionKind {
    /// Lowercase label used in exports and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Purchase => "purchase",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single accepted transaction row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Item name, or [`UNKNOWN_ITEM`]
    pub name: String,
    /// Unrounded price as shown on the page
    pub amount: Decimal,
    /// Sale or purchase
    pub kind: TransactionKind,
}

impl TransactionRecord {
    /// Create a new record
    pub fn new(name: impl Into<String>, amount: Decimal, kind: TransactionKind) -> Self {
        Self {
            name: name.into(),
            amount,
            kind,
        }
    }

    /// Check if this is a sale
    pub fn is_sale(&self) -> bool {
        self.kind == TransactionKind::Sale
    }

    /// Check if this is a purchase
    pub fn is_purchase(&self) -> bool {
        self.kind == TransactionKind::Purchase
    }
}

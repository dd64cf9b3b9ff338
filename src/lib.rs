// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # market-history
//!
//! Fetches a Steam Community Market account's full transaction history,
//! classifies every row as a sale or a purchase, and totals the amounts.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use market_history::{AuthContext, HistoryConfig, HistoryEngine, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let auth = AuthContext::new("<sessionid>", "<steamLoginSecure>")?;
//!     let engine = HistoryEngine::new(&HistoryConfig::default(), auth)?;
//!
//!     let result = engine.run().await?;
//!     println!("{} transactions, {} total", result.item_count(), result.grand_total);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   page    ┌────────────┐   rows   ┌────────────┐
//! │   Engine   │ ────────▶ │  Extract   │ ───────▶ │ Aggregate  │
//! │ (cursor,   │ ◀──────── │ (selectors,│          │ (totals,   │
//! │  pacing)   │  continue │  classify) │          │  currency) │
//! └─────┬──────┘           └────────────┘          └─────┬──────┘
//!       │ HTTP + cookies                                 │
//! ┌─────┴──────┐                                   ┌─────┴──────┐
//! │ Http/Auth  │                                   │   Output   │
//! └────────────┘                                   └────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Shared domain types and constants
pub mod types;

/// Session cookies and their on-disk store
pub mod auth;

/// Run settings
pub mod config;

/// HTTP client
pub mod http;

/// Offset cursor over the history pages
pub mod pagination;

/// Row extraction from the HTML fragment
pub mod extract;

/// Running totals
pub mod aggregate;

/// Main fetch loop
pub mod engine;

/// JSON export and console report
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use aggregate::{AggregateResult, Aggregator};
pub use auth::{AuthContext, CredentialStore};
pub use config::HistoryConfig;
pub use engine::HistoryEngine;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

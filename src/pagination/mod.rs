//! Pagination module
//!
//! Offset pagination for the market history endpoint.
//!
//! # Overview
//!
//! Pages are requested with `start`/`count` query parameters. The first
//! response reports `total_count`; the run ends once the offset reaches it.
//! `PageCursor` tracks that position and makes the continue/stop decision.

mod types;

pub use types::{NextPage, PageCursor, LIMIT_PARAM, OFFSET_PARAM};

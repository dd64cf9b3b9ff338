//! Engine types
//!
//! Response envelope plus the pacing and progress seams of the run loop.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;

/// JSON envelope returned by the history endpoint
///
/// Other fields (`success`, `pagesize`, `assets`, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryPage {
    /// Total rows in the account's history
    #[serde(default)]
    pub total_count: Option<u32>,
    /// Rendered rows; `None` when the session is not accepted
    #[serde(default, deserialize_with = "fragment")]
    pub results_html: Option<String>,
}

/// Anything other than a string (`null`, `false`, ...) counts as missing
fn fragment<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(html) => Ok(Some(html)),
        _ => Ok(None),
    }
}

/// Waits between page fetches
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Suspend the run for `delay`
    async fn pause(&self, delay: Duration);
}

/// Pacer backed by `tokio::time::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPacer;

#[async_trait]
impl Pacer for SleepPacer {
    async fn pause(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Receives row counters as pages are processed
///
/// `total` is `None` until the server has reported it.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, processed: u32, total: Option<u32>);

    /// Called once after the last page
    fn on_finish(&self) {}
}

/// Progress sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _processed: u32, _total: Option<u32>) {}
}

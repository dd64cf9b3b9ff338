//! Execution engine module
//!
//! Main fetch loop: page → extract → aggregate → continue or stop.
//!
//! # Overview
//!
//! The engine module provides:
//! - `HistoryEngine` - runs one sequential pass over the whole history
//! - `Pacer` - the pause between pages (`SleepPacer` in production)
//! - `ProgressSink` - optional progress reporting (`NoProgress` by default)
//!
//! Pages are fetched one at a time in offset order. A failure on any page
//! ends the run with an error and no partial result.

mod types;

pub use types::{HistoryPage, NoProgress, Pacer, ProgressSink, SleepPacer};

use crate::aggregate::{AggregateResult, Aggregator};
use crate::auth::AuthContext;
use crate::config::HistoryConfig;
use crate::error::{Error, Result};
use crate::extract::MarkupExtractor;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{NextPage, PageCursor};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Sequential fetcher for the market history
pub struct HistoryEngine {
    /// HTTP client carrying the session cookies
    client: HttpClient,
    /// History endpoint URL
    endpoint: String,
    /// Rows per page
    page_size: u32,
    /// Pause between pages
    page_delay: Duration,
    extractor: MarkupExtractor,
    pacer: Box<dyn Pacer>,
    progress: Box<dyn ProgressSink>,
}

impl HistoryEngine {
    /// Create an engine for the given settings and session
    pub fn new(config: &HistoryConfig, auth: AuthContext) -> Result<Self> {
        config.validate()?;

        let http_config = HttpClientConfig::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .header("Accept", "application/json")
            .build();
        let client = HttpClient::with_auth(http_config, auth)?;

        Ok(Self::with_client(client, config))
    }

    /// Create an engine around an existing client
    pub fn with_client(client: HttpClient, config: &HistoryConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            page_size: config.page_size,
            page_delay: config.page_delay(),
            extractor: MarkupExtractor::new(),
            pacer: Box::new(SleepPacer),
            progress: Box::new(NoProgress),
        }
    }

    /// Replace the pause implementation
    #[must_use]
    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    /// Report progress to the given sink
    #[must_use]
    pub fn with_progress(mut self, progress: impl ProgressSink + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Use a custom extractor
    #[must_use]
    pub fn with_extractor(mut self, extractor: MarkupExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Fetch every page and aggregate the rows
    pub async fn run(&self) -> Result<AggregateResult> {
        let start = Instant::now();
        let mut cursor = PageCursor::new(self.page_size);
        let mut aggregator = Aggregator::new();
        let mut processed: u32 = 0;

        info!(endpoint = %self.endpoint, "Fetching market history");

        loop {
            let page = self.fetch_page(&cursor).await?;

            if cursor.observe_total(page.total_count) {
                debug!(
                    total = ?cursor.total_count(),
                    pages = ?cursor.expected_pages(),
                    "Server reported history size"
                );
            }

            let html = page.results_html.ok_or_else(|| {
                Error::auth(
                    "response has no results_html; session cookies are invalid or expired",
                )
            })?;

            let extraction = self.extractor.extract(&html);
            let rows_seen = extraction.rows_seen;
            debug!(
                offset = cursor.offset(),
                rows = rows_seen,
                accepted = extraction.rows.len(),
                dropped = extraction.dropped,
                "Processed page"
            );
            aggregator.extend(extraction.rows);

            processed = processed.saturating_add(rows_seen as u32);
            let total = cursor.total_count();
            self.progress
                .on_progress(total.map_or(processed, |t| processed.min(t)), total);

            match cursor.advance(rows_seen) {
                NextPage::Done => break,
                NextPage::Continue { offset } => {
                    debug!(
                        next_offset = offset,
                        delay = ?self.page_delay,
                        "Pausing before next page"
                    );
                    self.pacer.pause(self.page_delay).await;
                }
            }
        }

        self.progress.on_finish();
        let result = aggregator.finish();

        info!(
            pages = cursor.pages_fetched(),
            items = result.item_count(),
            currency = result.currency_symbol(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Market history complete"
        );

        Ok(result)
    }

    /// Fetch and decode the page at the cursor's offset
    async fn fetch_page(&self, cursor: &PageCursor) -> Result<HistoryPage> {
        let mut request = RequestConfig::new().query("query", "");
        for (key, value) in cursor.params() {
            request = request.query(key, value);
        }

        debug!(offset = cursor.offset(), "Fetching page");
        self.client.get_json_with_config(&self.endpoint, request).await
    }
}

impl std::fmt::Debug for HistoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryEngine")
            .field("client", &self.client)
            .field("endpoint", &self.endpoint)
            .field("page_size", &self.page_size)
            .field("page_delay", &self.page_delay)
            .finish_non_exhaustive()
    }
}

//! Run configuration
//!
//! Everything has a default that talks to the live Steam endpoint, so a
//! config file is only needed to point the tool somewhere else or to
//! tune timing. Files are YAML:
//!
//! ```yaml
//! endpoint: https://steamcommunity.com/market/myhistory/render/
//! page_size: 500
//! page_delay_ms: 3000
//! timeout_secs: 30
//! ```

use crate::error::{Error, Result};
use crate::types::{DEFAULT_ENDPOINT, PAGE_DELAY, PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Settings for one history run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Market history render endpoint
    pub endpoint: String,

    /// Rows requested per page
    ///
    /// The live endpoint is always asked for 500; smaller pages are for
    /// mock servers.
    pub page_size: u32,

    /// Pause between page fetches, in milliseconds
    pub page_delay_ms: u64,

    /// Per-request timeout, in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: PAGE_SIZE,
            page_delay_ms: PAGE_DELAY.as_millis() as u64,
            timeout_secs: 30,
            user_agent: format!("market-history/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HistoryConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate YAML config
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings can drive a run
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be greater than 0"));
        }
        Ok(())
    }

    /// Set the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the pause between pages
    #[must_use]
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

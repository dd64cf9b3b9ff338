//! HTTP client module
//!
//! Provides the HTTP client used to fetch history pages.
//!
//! # Features
//!
//! - **Session cookies**: Integration with the auth module
//! - **Status mapping**: Non-success responses become `Error::HttpStatus`
//! - **No retries**: A transport failure ends the run

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};

//! HTTP client for the market endpoint
//!
//! A thin layer over `reqwest` that:
//! - Applies session cookies from an `AuthContext`
//! - Adds default headers and query parameters
//! - Decodes JSON bodies
//! - Turns any non-success status into `Error::HttpStatus`
//!
//! There is no retry: a failed page aborts the run.

use crate::auth::AuthContext;
use crate::error::{Error, Result};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Longest response body kept in an `HttpStatus` error
const MAX_ERROR_BODY: usize = 512;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("market-history/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, sent in insertion order
    pub query: Vec<(String, String)>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }
}

/// HTTP client carrying the session cookies
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    auth: Option<AuthContext>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            auth: None,
        })
    }

    /// Create a client that sends the given session cookies
    pub fn with_auth(config: HttpClientConfig, auth: AuthContext) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.auth = Some(auth);
        Ok(client)
    }

    /// Make a GET request and decode the JSON body
    ///
    /// A body that is not valid JSON for `T` gives `Error::JsonParse`.
    pub async fn get_json_with_config<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let response = self.send(Method::GET, url, config).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request, failing on any non-success status
    async fn send(&self, method: Method, url: &str, config: RequestConfig) -> Result<Response> {
        let mut req = self.client.request(method.clone(), url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref auth) = self.auth {
            req = auth.apply(req);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            truncate_body(&mut body);
            debug!("Request failed: {} {} -> {}", method, url, status);
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("Request succeeded: {} {}", method, url);
        Ok(response)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_auth", &self.auth.is_some())
            .finish_non_exhaustive()
    }
}

fn truncate_body(body: &mut String) {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
}

//! HTTP client for the search API
//!
//! Transient failures (transport errors, HTTP 5xx) are retried with capped
//! exponential backoff. Validation failures, cancellation and malformed
//! responses are returned to the caller immediately.
//!
//! ```no_run
//! use mes_global_search::api::handlers::SearchRequest;
//! use mes_global_search::client::SearchClient;
//!
//! # async fn run() -> Result<(), mes_global_search::client::ClientError> {
//! let client = SearchClient::new("http://localhost:8080")?;
//! let response = client.search(&SearchRequest::new("订单")).await?;
//! println!("{} results", response.total);
//! # Ok(())
//! # }
//! ```

use crate::api::handlers::{GroupedSearchRequest, SearchRequest};
use crate::config::ClientConfig;
use crate::error::FieldErrors;
use crate::search::SearchResponse;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Client-side failures, classified for retry
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure before a response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status other than a validation failure
    #[error("Server error: HTTP {status}")]
    Server { status: u16 },

    /// The server rejected the request
    #[error("{message}")]
    Validation { message: String, errors: FieldErrors },

    /// The caller gave up before a response arrived
    #[error("Request cancelled")]
    Cancelled,

    /// Success status with a body that is not the expected envelope
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The HTTP client could not be constructed
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(_) => true,
            ClientError::Server { status } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

/// Retry budget and backoff shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 200,
            max_delay_ms: 5000,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Delay before retry number `attempt` (0-based): `base * 2^attempt`, capped
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2_u64.saturating_pow(attempt);
        let delay = self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms);
        Duration::from_millis(delay)
    }
}

impl From<&ClientConfig> for RetryPolicy {
    fn from(config: &ClientConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay_ms: config.base_delay_ms,
            max_delay_ms: config.max_delay_ms,
        }
    }
}

/// Response envelope as produced by the server, success or failure
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    message: Option<String>,
    #[serde(default)]
    errors: FieldErrors,
}

#[derive(Debug, Deserialize)]
struct SuggestionData {
    suggestions: Vec<String>,
}

/// Map a status code and body to an error; `Ok` for 2xx
pub fn classify_status(status: u16, body: &str) -> Result<(), ClientError> {
    match status {
        200..=299 => Ok(()),
        422 => {
            let envelope: Envelope<serde_json::Value> = serde_json::from_str(body)
                .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
            Err(ClientError::Validation {
                message: envelope.message.unwrap_or_else(|| "请求参数无效".to_string()),
                errors: envelope.errors,
            })
        }
        status => Err(ClientError::Server { status }),
    }
}

/// Search API client
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    endpoint: String,
    retry: RetryPolicy,
}

impl SearchClient {
    /// Client with the default retry policy and a 10 second timeout
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        Self::build(endpoint.into(), Duration::from_secs(10), RetryPolicy::default())
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::build(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
            RetryPolicy::from(config),
        )
    }

    fn build(endpoint: String, timeout: Duration, retry: RetryPolicy) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            retry,
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// POST /api/search
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        self.with_retry(|| self.post_once("/api/search", request)).await
    }

    /// Like [`search`](Self::search), abandoned with `Cancelled` once `cancel` resolves
    pub async fn search_until<C>(&self, request: &SearchRequest, cancel: C) -> Result<SearchResponse, ClientError>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                debug!(query = %request.query, "Search cancelled by caller");
                Err(ClientError::Cancelled)
            }
            result = self.search(request) => result,
        }
    }

    /// GET /api/search/suggestions
    pub async fn suggestions(&self, query: &str) -> Result<Vec<String>, ClientError> {
        let data: SuggestionData = self.with_retry(|| self.suggestions_once(query)).await?;
        Ok(data.suggestions)
    }

    /// POST /api/search/grouped; returns the `data` object as sent
    pub async fn grouped(&self, request: &GroupedSearchRequest) -> Result<serde_json::Value, ClientError> {
        self.with_retry(|| self.post_once("/api/search/grouped", request)).await
    }

    /// GET /health
    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        self.with_retry(|| self.health_once()).await
    }

    async fn suggestions_once(&self, query: &str) -> Result<SuggestionData, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/search/suggestions", self.endpoint))
            .query(&[("q", query)])
            .send()
            .await?;
        Self::read_envelope(response).await
    }

    async fn health_once(&self) -> Result<serde_json::Value, ClientError> {
        let response = self.http.get(format!("{}/health", self.endpoint)).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        classify_status(status, &body)?;
        serde_json::from_str(&body).map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }

    async fn post_once<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}{}", self.endpoint, path))
            .json(body)
            .send()
            .await?;
        Self::read_envelope(response).await
    }

    async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        classify_status(status, &body)?;

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
        match envelope.data {
            Some(data) if envelope.success => Ok(data),
            _ => Err(ClientError::MalformedResponse(
                envelope.message.unwrap_or_else(|| "response has no data".to_string()),
            )),
        }
    }

    async fn with_retry<T, F, Fut>(&self, mut operation: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.backoff(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = self.retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying search request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Exponential backoff retry logic (max 3 retries)
//! - Rate limit error handling

use crate::error::ReleaseError;
use reqwest::Client;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("nodella/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, ReleaseError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, ReleaseError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                ReleaseError::network_error("", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Client for talking to a local test server: no proxy, short timeout
    #[cfg(test)]
    pub(crate) fn local(max_retries: u32) -> Self {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        Self {
            client,
            max_retries,
        }
    }

    /// Perform a GET request with retry logic
    pub async fn get(&self, url: &str) -> Result<reqwest::Response, ReleaseError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(ReleaseError::RateLimitExceeded {
                            url: url.to_string(),
                        });

                        if attempt < self.max_retries {
                            tracing::debug!("rate limited by {}, retrying in {}ms", url, delay);
                            tokio::time::sleep(Duration::from_millis(delay)).await;
                            delay *= 2;
                            continue;
                        }
                        break;
                    }

                    if !response.status().is_success() {
                        return Err(ReleaseError::network_error(
                            url,
                            format!("HTTP {}", response.status()),
                        ));
                    }

                    return Ok(response);
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(ReleaseError::timeout(url));
                    } else {
                        last_error = Some(ReleaseError::network_error(url, e.to_string()));
                    }

                    if attempt < self.max_retries {
                        tracing::debug!("request to {} failed ({}), retrying in {}ms", url, e, delay);
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ReleaseError::network_error(url, "unknown error")))
    }

    /// Perform a GET request and parse the JSON body
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ReleaseError> {
        let body = self
            .get(url)
            .await?
            .text()
            .await
            .map_err(|e| ReleaseError::invalid_response(url, format!("failed to read body: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| ReleaseError::invalid_response(url, format!("failed to parse JSON: {}", e)))
    }
}

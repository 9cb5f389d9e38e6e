//! HTTP client with retry and rate limiting
//!
//! Provides the HTTP client behind the page fetcher. It handles:
//! - Automatic retries with configurable backoff
//! - `Retry-After` hints on 429 responses
//! - Optional client-side rate limiting
//! - Error classification for retry decisions

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use crate::types::{BackoffType, StringMap};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest error body kept in `Error::HttpStatus`
const MAX_ERROR_BODY: usize = 512;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Total number of attempts per request (the first try included)
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 5,
            initial_backoff: Duration::from_secs(5),
            max_backoff: Duration::from_secs(120),
            backoff_type: BackoffType::Exponential,
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("news-crawler/{}", env!("CARGO_PKG_VERSION")),
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
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the attempt budget
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
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
    /// Query parameters
    pub query: StringMap,
    /// Request headers
    pub headers: StringMap,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
    /// Override the attempt budget for this request
    pub max_retries: Option<u32>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the attempt budget
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }
}

/// HTTP client with retry and rate limiting
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Make a GET request and return the response body
    pub async fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.get_with_config(url, RequestConfig::default()).await
    }

    /// Make a GET request with config and return the response body.
    ///
    /// Every failed attempt counts toward the budget, whatever the reason:
    /// transport errors, 429s and other non-success statuses alike. A 429
    /// carrying a numeric `Retry-After` waits exactly that long; everything
    /// else waits [`HttpClient::calculate_backoff`]. No wait follows the last
    /// attempt.
    pub async fn get_with_config(&self, url: &str, config: RequestConfig) -> Result<Vec<u8>> {
        let full_url = self.build_url(url);
        let max_attempts = config.max_retries.unwrap_or(self.config.max_retries).max(1);
        let timeout = config.timeout.unwrap_or(self.config.timeout);

        let mut attempt = 0;

        loop {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            let error = match self.send_once(&full_url, &config, timeout).await {
                Ok(body) => {
                    debug!("Request succeeded: GET {} ({} bytes)", full_url, body.len());
                    return Ok(body);
                }
                Err(e) => e,
            };

            if !error.is_retryable() {
                return Err(error);
            }

            attempt += 1;
            if attempt >= max_attempts {
                warn!(
                    "Giving up on GET {} after {} attempts: {}",
                    full_url, attempt, error
                );
                return Err(Error::MaxRetriesExceeded {
                    attempts: attempt,
                    last_error: Box::new(error),
                });
            }

            let delay = match &error {
                Error::RateLimited {
                    retry_after: Some(hint),
                } => *hint,
                _ => self.calculate_backoff(attempt - 1),
            };
            warn!(
                "{}, attempt {}/{}, retrying in {:?}",
                error, attempt, max_attempts, delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Perform one attempt and classify its outcome
    async fn send_once(
        &self,
        url: &str,
        config: &RequestConfig,
        timeout: Duration,
    ) -> Result<Vec<u8>> {
        // Per-request headers replace defaults of the same name
        let mut headers = header_map(&self.config.default_headers)?;
        headers.extend(header_map(&config.headers)?);

        let mut req = self.client.get(url).headers(headers);

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        req = req.timeout(timeout);

        let response = req
            .send()
            .await
            .map_err(|e| classify_transport_error(e, timeout))?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited {
                retry_after: parse_retry_after(response.headers()),
            });
        }

        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_transport_error(e, timeout))?;
        Ok(body.to_vec())
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }

    /// Calculate backoff delay after the given (0-indexed) failed attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let initial = self.config.initial_backoff;
        let delay = match self.config.backoff_type {
            BackoffType::Constant => Some(initial),
            BackoffType::Linear => initial.checked_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => initial.checked_mul(2u32.saturating_pow(attempt)),
        };

        delay.map_or(self.config.max_backoff, |d| {
            std::cmp::min(d, self.config.max_backoff)
        })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

fn classify_transport_error(error: reqwest::Error, timeout: Duration) -> Error {
    if error.is_timeout() {
        Error::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        Error::Http(error)
    }
}

/// Build a header map, one value per (case-insensitive) name
fn header_map(headers: &StringMap) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| Error::config(format!("Invalid header name '{key}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::config(format!("Invalid value for header '{key}': {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Parse a numeric `Retry-After` header (decimal seconds).
///
/// HTTP-date values, negative or non-finite numbers, and values too large
/// for a `Duration` yield `None`.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let raw = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
    let seconds: f64 = raw.parse().ok()?;
    Duration::try_from_secs_f64(seconds).ok()
}

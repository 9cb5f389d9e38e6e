//! Crawler configuration
//!
//! The crawler is configured by an optional YAML (or JSON) file. Every field
//! has a default, so an empty file is a valid configuration.
//!
//! ```yaml
//! http:
//!   timeout_seconds: 30
//!   max_retries: 5
//!   retry_backoff:
//!     type: exponential
//!     initial_ms: 5000
//!     max_ms: 120000
//! crawl:
//!   pool_size: 10
//!   time_limit_seconds: 600
//! sources:
//!   - name: local
//!     url: http://localhost:8080/search
//! ```

use crate::crawl::{CrawlConfig, DEFAULT_POOL_SIZE};
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::sources::{SourceDefinition, SourceRegistry};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete crawler configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Coordinator settings
    #[serde(default)]
    pub crawl: CrawlSettings,

    /// Additional sources; a name matching a built-in source replaces it
    #[serde(default)]
    pub sources: Vec<SourceDefinition>,
}

impl CrawlerConfig {
    /// Load configuration from a YAML or JSON file (chosen by extension)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse configuration from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Built-in sources plus the ones configured here
    pub fn registry(&self) -> Result<SourceRegistry> {
        let mut registry = SourceRegistry::builtin()?;
        registry.extend(self.sources.iter().cloned())?;
        Ok(registry)
    }

    /// HTTP client configuration.
    ///
    /// Source headers are not included; the page fetcher sends them with
    /// every request.
    pub fn http_client_config(&self) -> HttpClientConfig {
        let backoff = &self.http.retry_backoff;
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                backoff.backoff_type,
                Duration::from_millis(backoff.initial_ms),
                Duration::from_millis(backoff.max_ms),
            );

        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(limit) = &self.http.rate_limit {
            builder = builder.rate_limit(limit.clone());
        }

        builder.build()
    }

    /// Coordinator configuration
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig::new().with_pool_size(self.crawl.pool_size)
    }

    /// Default time limit for crawls
    pub fn time_limit(&self) -> Option<Duration> {
        self.crawl.time_limit_seconds.map(Duration::from_secs)
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Attempts per page, the first one included
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// User agent (sources usually set their own `User-Agent` header)
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Optional client-side rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            user_agent: None,
            rate_limit: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    5
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    5_000
}

fn default_max_ms() -> u64 {
    120_000
}

// ============================================================================
// Crawl Config
// ============================================================================

/// Coordinator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSettings {
    /// Pages fetched concurrently
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Default wall-clock budget in seconds
    #[serde(default)]
    pub time_limit_seconds: Option<u64>,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
            time_limit_seconds: None,
        }
    }
}

fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # news-crawler
//!
//! Concurrent crawler for paginated news-article search APIs.
//!
//! ## Features
//!
//! - **Resilient page fetches**: bounded retries with exponential backoff,
//!   honoring `Retry-After` on HTTP 429
//! - **Concurrent pagination**: page 0 discovers the page count, the rest are
//!   fetched by a fixed-size worker pool
//! - **Time limits**: stop collecting after a wall-clock budget
//! - **Source registry**: APIs described as YAML data, `lrytas` built in
//! - **Output**: CSV, Parquet or JSON records
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use news_crawler::{crawl_source, CrawlOptions, CrawlerConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = CrawlerConfig::default();
//!     let registry = config.registry()?;
//!
//!     let options = CrawlOptions::new().query("vakcinavimas");
//!     let result = crawl_source(&registry, &config, "lrytas", &options).await?;
//!
//!     println!("{}", news_crawler::output::to_csv_string(&result.articles)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Crawler (crawl module)                   │
//! │   page 0 → total_pages → pool of N tasks → CrawlResult   │
//! └──────────────────────────────────────────────────────────┘
//!                             │ PageSource
//! ┌──────────────┬────────────┴─────────┬─────────────────────┐
//! │ PageFetcher  │     HttpClient       │   JsonPageDecoder   │
//! ├──────────────┼──────────────────────┼─────────────────────┤
//! │ Query params │ Retry / Backoff      │ articles            │
//! │ Headers      │ Retry-After          │ totalPages          │
//! │              │ Rate limit           │                     │
//! └──────────────┴──────────────────────┴─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crawler
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with retry and rate limiting
pub mod http;

/// Page body decoders
pub mod decode;

/// Single-page fetching
pub mod fetch;

/// Concurrent pagination coordinator
pub mod crawl;

/// Source definitions and registry
pub mod sources;

/// Crawler configuration
pub mod config;

/// CSV, Parquet and JSON output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::CrawlerConfig;
pub use crawl::{crawl_source, CrawlConfig, CrawlOptions, CrawlResult, CrawlStatus, Crawler};
pub use fetch::{FetchOutcome, PageFetcher, PageRequest, PageResponse, PageSource};
pub use sources::{SourceDefinition, SourceRegistry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

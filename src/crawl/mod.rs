//! Crawl coordinator module
//!
//! Walks every page of a search.
//!
//! # Overview
//!
//! The coordinator fetches page 0 to learn the page count, then fans pages
//! `1..total_pages` out over a bounded pool of tokio tasks and collects their
//! articles in completion order. A failed page is logged and skipped; only a
//! failed page 0 ends the crawl, with an empty
//! [`CrawlStatus::InitialPageFailed`] result. An optional time limit is
//! checked each time a page completes; once exceeded, tasks still in flight
//! are left to finish on their own and their results are dropped.

mod types;

pub use types::{CrawlConfig, CrawlOptions, CrawlResult, CrawlStatus, DEFAULT_POOL_SIZE};

use crate::config::CrawlerConfig;
use crate::error::Result;
use crate::fetch::{FetchOutcome, PageFetcher, PageRequest, PageSource};
use crate::http::HttpClient;
use crate::sources::SourceRegistry;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Crawl coordinator over a page source
pub struct Crawler<S> {
    source: Arc<S>,
    config: CrawlConfig,
}

impl<S: PageSource + 'static> Crawler<S> {
    /// Create a coordinator with the default pool size
    pub fn new(source: S) -> Self {
        Self::from_arc(Arc::new(source))
    }

    /// Create a coordinator over a shared page source
    pub fn from_arc(source: Arc<S>) -> Self {
        Self {
            source,
            config: CrawlConfig::default(),
        }
    }

    /// Set crawl configuration
    #[must_use]
    pub fn with_config(mut self, config: CrawlConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the crawl configuration
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawl every page matching the options
    pub async fn crawl(&self, options: &CrawlOptions) -> CrawlResult {
        let start = Instant::now();
        let base = PageRequest::new(0)
            .with_date_from(options.date_from)
            .with_query(options.query.as_deref());

        let first = match self.source.fetch(&base).await {
            FetchOutcome::Success(page) => page,
            FetchOutcome::Exhausted { error, .. } => {
                warn!("First page failed, nothing to crawl: {error}");
                return CrawlResult::initial_failure(start.elapsed());
            }
        };

        let total_pages = first.total_pages.unwrap_or_else(|| {
            warn!("First page has no usable page count, keeping only its articles");
            0
        });
        info!(
            "Crawling {} pages ({} concurrent)",
            total_pages, self.config.pool_size
        );
        let mut result = CrawlResult::seeded(total_pages, first.articles);

        let mut completions = stream::iter(1..total_pages)
            .map(|page| {
                let source = Arc::clone(&self.source);
                let request = base.for_page(page);
                let task = tokio::spawn(async move { source.fetch(&request).await });
                async move { (page, task.await) }
            })
            .buffer_unordered(self.config.pool_size.max(1));

        while let Some((page, joined)) = completions.next().await {
            if let Some(limit) = options.time_limit {
                if start.elapsed() > limit {
                    warn!(
                        "Time limit of {:?} exceeded, stopping with {} of {} pages",
                        limit, result.pages_fetched, total_pages
                    );
                    result.status = CrawlStatus::TimedOut;
                    break;
                }
            }

            match joined {
                Ok(FetchOutcome::Success(response)) => result.add_page(response.articles),
                Ok(FetchOutcome::Exhausted { error, .. }) => {
                    warn!("Skipping page {page}: {error}");
                    result.add_failure(page);
                }
                Err(join_error) => {
                    warn!("Fetch task for page {page} failed: {join_error}");
                    result.add_failure(page);
                }
            }
        }

        result.elapsed = start.elapsed();
        info!(
            "Crawl finished: {} articles from {} pages in {:?} ({} failed)",
            result.articles.len(),
            result.pages_fetched,
            result.elapsed,
            result.failed_pages.len()
        );
        result
    }
}

impl<S> std::fmt::Debug for Crawler<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crawler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Crawl a named source.
///
/// Looks the source up in `registry`, builds its HTTP client from `config`,
/// and runs a full crawl. Errors only on setup problems (unknown source, bad
/// client configuration); fetch failures end up in the returned result.
pub async fn crawl_source(
    registry: &SourceRegistry,
    config: &CrawlerConfig,
    name: &str,
    options: &CrawlOptions,
) -> Result<CrawlResult> {
    let source = registry.get(name)?.clone();
    let client = HttpClient::with_config(config.http_client_config())?;
    let crawler = Crawler::new(PageFetcher::new(client, source)).with_config(config.crawl_config());
    Ok(crawler.crawl(options).await)
}

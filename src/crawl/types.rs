//! Crawl types
//!
//! Options, configuration and results of a crawl.

use crate::types::Article;
use chrono::NaiveDate;
use std::time::Duration;

/// Default number of pages fetched concurrently
pub const DEFAULT_POOL_SIZE: usize = 10;

/// Configuration for the crawl coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Maximum number of in-flight page fetches
    pub pool_size: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl CrawlConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pool size (raised to at least one)
    #[must_use]
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size.max(1);
        self
    }
}

/// What to crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Only articles published on or after this date
    pub date_from: Option<NaiveDate>,
    /// Free-text search query
    pub query: Option<String>,
    /// Wall-clock budget, checked whenever a page completes
    pub time_limit: Option<Duration>,
}

impl CrawlOptions {
    /// Crawl everything, without a time limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lower publish-date bound
    #[must_use]
    pub fn date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    /// Set the search query
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the time limit
    #[must_use]
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// How a crawl ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlStatus {
    /// Every dispatched page completed
    Complete,
    /// The time limit stopped collection early
    TimedOut,
    /// Page 0 could not be fetched, so nothing was crawled
    InitialPageFailed,
}

/// Articles gathered by a crawl.
///
/// `articles` holds page 0's records first, followed by the other pages'
/// records in completion order. Callers must not rely on any ordering beyond
/// that.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlResult {
    /// How the crawl ended
    pub status: CrawlStatus,
    /// Page count reported by page 0
    pub total_pages: u32,
    /// Collected article records
    pub articles: Vec<Article>,
    /// Number of pages whose records were collected
    pub pages_fetched: u32,
    /// Pages whose fetch was exhausted or whose task panicked
    pub failed_pages: Vec<u32>,
    /// Wall-clock time spent
    pub elapsed: Duration,
}

impl CrawlResult {
    /// Result of a crawl whose first page failed
    pub(crate) fn initial_failure(elapsed: Duration) -> Self {
        Self {
            status: CrawlStatus::InitialPageFailed,
            total_pages: 0,
            articles: Vec::new(),
            pages_fetched: 0,
            failed_pages: vec![0],
            elapsed,
        }
    }

    /// Result seeded with page 0
    pub(crate) fn seeded(total_pages: u32, first_page: Vec<Article>) -> Self {
        Self {
            status: CrawlStatus::Complete,
            total_pages,
            articles: first_page,
            pages_fetched: 1,
            failed_pages: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn add_page(&mut self, articles: Vec<Article>) {
        self.articles.extend(articles);
        self.pages_fetched += 1;
    }

    pub(crate) fn add_failure(&mut self, page: u32) {
        self.failed_pages.push(page);
    }

    /// Check if the crawl produced anything at all
    pub fn is_success(&self) -> bool {
        self.status != CrawlStatus::InitialPageFailed
    }

    /// Number of collected articles
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Check if no articles were collected
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

//! Fetch types
//!
//! Requests, decoded pages, and per-page outcomes.

use crate::error::Error;
use crate::types::{Article, JsonObject};
use chrono::NaiveDate;

/// Date format the search API expects for `dfrom`
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// One page of a search, with its filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    date_from: Option<NaiveDate>,
    query: Option<String>,
}

impl PageRequest {
    /// Request for the given zero-based page, without filters
    pub fn new(page: u32) -> Self {
        Self {
            page,
            date_from: None,
            query: None,
        }
    }

    /// Only articles published on or after this date
    #[must_use]
    pub fn with_date_from(mut self, date_from: Option<NaiveDate>) -> Self {
        self.date_from = date_from;
        self
    }

    /// Free-text search query
    #[must_use]
    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.query = query.map(str::to_string);
        self
    }

    /// Same filters, different page
    #[must_use]
    pub fn for_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Zero-based page index
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Lower publish-date bound
    pub fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    /// Search query
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// `date_from` formatted for the API
    pub fn date_from_param(&self) -> Option<String> {
        self.date_from
            .map(|date| date.format(DATE_FORMAT).to_string())
    }
}

/// A decoded page of search results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResponse {
    /// Total number of pages; only read from page 0
    pub total_pages: Option<u32>,
    /// Article records on this page
    pub articles: Vec<Article>,
    /// Remaining top-level fields (`authors`, `nextPage`, `tags`, ...)
    pub metadata: JsonObject,
}

/// Result of fetching one page
#[derive(Debug)]
pub enum FetchOutcome {
    /// The page was fetched and decoded
    Success(PageResponse),
    /// The page could not be fetched within the attempt budget
    Exhausted {
        /// Page index
        page: u32,
        /// The last error seen
        error: Error,
    },
}

impl FetchOutcome {
    /// Check if this is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Get the decoded page, if any
    pub fn into_response(self) -> Option<PageResponse> {
        match self {
            Self::Success(response) => Some(response),
            Self::Exhausted { .. } => None,
        }
    }
}

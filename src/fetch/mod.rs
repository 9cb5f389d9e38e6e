//! Page fetcher module
//!
//! Fetches single pages of a paginated search API.
//!
//! # Overview
//!
//! A [`PageFetcher`] turns a [`PageRequest`] into query parameters for its
//! source, performs the GET through the retrying [`HttpClient`], and decodes
//! the body. The result is always a [`FetchOutcome`]: either the decoded page
//! or `Exhausted` once the attempt budget is spent. Fetching never panics and
//! never returns `Err`, so the coordinator can treat every page uniformly.
//!
//! [`HttpClient`]: crate::http::HttpClient

mod fetcher;
mod types;

pub use fetcher::{PageFetcher, PageSource};
pub use types::{FetchOutcome, PageRequest, PageResponse};

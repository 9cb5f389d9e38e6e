//! HTTP client module
//!
//! Provides the HTTP client used by the page fetcher.
//!
//! # Features
//!
//! - **Automatic Retries**: every failed exchange counts toward a fixed attempt budget
//! - **Retry-After**: numeric hints on 429 responses replace the computed backoff
//! - **Backoff Strategies**: Constant, linear, and exponential backoff with a ceiling
//! - **Rate Limiting**: Optional token bucket throttle using governor

mod client;
mod rate_limit;

pub use client::{parse_retry_after, HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;

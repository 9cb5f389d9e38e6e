//! Decoder types and traits

use crate::error::Result;
use crate::fetch::PageResponse;
use serde::{Deserialize, Serialize};

/// Where the decoder finds things in a page body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Dot path to the array of article records
    #[serde(default = "default_records_path")]
    pub records_path: String,
    /// Dot path to the total page count
    #[serde(default = "default_total_pages_path")]
    pub total_pages_path: String,
}

fn default_records_path() -> String {
    "articles".to_string()
}

fn default_total_pages_path() -> String {
    "totalPages".to_string()
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            records_path: default_records_path(),
            total_pages_path: default_total_pages_path(),
        }
    }
}

impl DecoderConfig {
    /// Set the records path
    #[must_use]
    pub fn with_records_path(mut self, path: impl Into<String>) -> Self {
        self.records_path = path.into();
        self
    }

    /// Set the total pages path
    #[must_use]
    pub fn with_total_pages_path(mut self, path: impl Into<String>) -> Self {
        self.total_pages_path = path.into();
        self
    }
}

/// Trait for decoding a page body into a page response
pub trait PageDecoder: Send + Sync {
    /// Decode the raw body of one page
    fn decode(&self, body: &[u8]) -> Result<PageResponse>;
}

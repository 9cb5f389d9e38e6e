//! Source definition types

use crate::decode::DecoderConfig;
use crate::types::StringMap;
use serde::{Deserialize, Serialize};

/// A paginated search API the crawler knows how to walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDefinition {
    /// Unique source name (e.g., "lrytas")
    pub name: String,

    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,

    /// Search endpoint URL
    pub url: String,

    /// Records per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Sort order sent with every request
    #[serde(default = "default_order")]
    pub order: String,

    /// Query parameter names
    #[serde(default)]
    pub params: ParamNames,

    /// Fixed query parameters sent with every request
    #[serde(default)]
    pub extra_params: StringMap,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,

    /// Where records and the page count live in a page body
    #[serde(default)]
    pub decoder: DecoderConfig,
}

fn default_page_size() -> u32 {
    12
}

fn default_order() -> String {
    "pubfromdate-".to_string()
}

impl SourceDefinition {
    /// Create a source with default parameters for the given endpoint
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            url: url.into(),
            page_size: default_page_size(),
            order: default_order(),
            params: ParamNames::default(),
            extra_params: StringMap::new(),
            headers: StringMap::new(),
            decoder: DecoderConfig::default(),
        }
    }

    /// Display name
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Names of the query parameters a search API understands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamNames {
    /// Page index
    pub page: String,
    /// Page size
    pub page_size: String,
    /// Sort order
    pub order: String,
    /// Lower publish-date bound
    pub date_from: String,
    /// Free-text query
    pub query: String,
}

impl Default for ParamNames {
    fn default() -> Self {
        Self {
            page: "page".to_string(),
            page_size: "count".to_string(),
            order: "order".to_string(),
            date_from: "dfrom".to_string(),
            query: "query".to_string(),
        }
    }
}

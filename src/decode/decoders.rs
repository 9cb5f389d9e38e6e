//! Decoder implementations

use super::types::{DecoderConfig, PageDecoder};
use crate::error::{Error, Result};
use crate::fetch::PageResponse;
use crate::types::{Article, JsonObject};
use serde_json::Value;
use tracing::{debug, warn};

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON page decoder
#[derive(Debug, Clone, Default)]
pub struct JsonPageDecoder {
    config: DecoderConfig,
}

impl JsonPageDecoder {
    /// Create a decoder for the default `articles` / `totalPages` layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with custom paths
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    fn extract_articles(&self, value: &Value) -> Result<Vec<Article>> {
        let records = match extract_path(value, &self.config.records_path) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(arr)) => arr,
            Some(other) => {
                return Err(Error::decode(format!(
                    "Expected an array at '{}', found {}",
                    self.config.records_path,
                    json_kind(other)
                )))
            }
        };

        let mut articles = Vec::with_capacity(records.len());
        for record in records {
            match record {
                Value::Object(obj) => articles.push(obj.clone()),
                other => debug!("Skipping non-object record ({})", json_kind(other)),
            }
        }
        Ok(articles)
    }

    /// Page count, if present and usable.
    ///
    /// Accepts integers, integral floats and numeric strings. Anything else
    /// is logged and read as absent so the page's articles are kept.
    fn extract_total_pages(&self, value: &Value) -> Option<u32> {
        let path = &self.config.total_pages_path;
        let raw = extract_path(value, path)?;
        let total = match raw {
            Value::Null => return None,
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(integral)),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };

        if total.is_none() {
            warn!("Ignoring '{path}': {raw} is not a non-negative integer");
        }
        total.map(|n| u32::try_from(n).unwrap_or(u32::MAX))
    }
}

impl PageDecoder for JsonPageDecoder {
    fn decode(&self, body: &[u8]) -> Result<PageResponse> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

        if !value.is_object() {
            return Err(Error::decode(format!(
                "Expected a JSON object, found {}",
                json_kind(&value)
            )));
        }

        let articles = self.extract_articles(&value)?;
        let total_pages = self.extract_total_pages(&value);

        let mut metadata = JsonObject::new();
        if let Value::Object(obj) = value {
            for (key, field) in obj {
                if key != self.config.records_path && key != self.config.total_pages_path {
                    metadata.insert(key, field);
                }
            }
        }

        Ok(PageResponse {
            total_pages,
            articles,
            metadata,
        })
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Follow a simple dot-notation path (optionally prefixed with `$.`)
fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    path.split('.')
        .filter(|part| !part.is_empty())
        .try_fold(value, |current, part| current.get(part))
}

/// Non-negative whole float as an integer (`5.0` → 5)
#[allow(clippy::cast_precision_loss)]
fn integral(f: f64) -> Option<u64> {
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Arrow schema inference and article to Arrow conversion
//!
//! Articles are flattened into a single record batch. Columns appear in the
//! order their field is first seen; arrays and objects become JSON strings so
//! that every column is representable in CSV.

use crate::error::{Error, Result};
use crate::types::Article;
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Infer a flat Arrow schema from a set of articles
///
/// All fields are nullable. Fields that are only ever null become Utf8.
pub fn infer_schema(articles: &[Article]) -> Schema {
    let mut order: Vec<&str> = Vec::new();
    let mut field_types: HashMap<&str, Option<DataType>> = HashMap::new();

    for article in articles {
        for (key, value) in article {
            let inferred = infer_type(value);
            match field_types.get_mut(key.as_str()) {
                Some(existing) => {
                    *existing = match (existing.take(), inferred) {
                        (Some(a), Some(b)) => Some(merge_types(&a, &b)),
                        (a, b) => a.or(b),
                    };
                }
                None => {
                    order.push(key);
                    field_types.insert(key, inferred);
                }
            }
        }
    }

    let fields: Vec<Field> = order
        .into_iter()
        .map(|name| {
            let dtype = field_types
                .remove(name)
                .flatten()
                .unwrap_or(DataType::Utf8);
            Field::new(name, dtype, true)
        })
        .collect();

    Schema::new(fields)
}

/// Convert articles to an Arrow RecordBatch
pub fn articles_to_batch(articles: &[Article]) -> Result<RecordBatch> {
    let schema = Arc::new(infer_schema(articles));

    let columns: Vec<ArrayRef> = schema
        .fields()
        .iter()
        .map(|field| {
            let values: Vec<Option<&Value>> = articles
                .iter()
                .map(|article| article.get(field.name()).filter(|v| !v.is_null()))
                .collect();
            build_array(&values, field.data_type())
        })
        .collect();

    let options = RecordBatchOptions::new().with_row_count(Some(articles.len()));
    RecordBatch::try_new_with_options(schema, columns, &options).map_err(|e| Error::Output {
        message: format!("Failed to create RecordBatch: {e}"),
    })
}

/// Flat Arrow type for a JSON value; `None` for null
fn infer_type(value: &Value) -> Option<DataType> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some(DataType::Boolean),
        Value::Number(n) if n.is_i64() => Some(DataType::Int64),
        Value::Number(_) => Some(DataType::Float64),
        Value::String(_) | Value::Array(_) | Value::Object(_) => Some(DataType::Utf8),
    }
}

/// Merge two data types into a compatible type
fn merge_types(type1: &DataType, type2: &DataType) -> DataType {
    match (type1, type2) {
        (a, b) if a == b => a.clone(),

        // Numbers can merge (prefer Float64 for mixed)
        (DataType::Int64, DataType::Float64) | (DataType::Float64, DataType::Int64) => {
            DataType::Float64
        }

        // Different types -> fall back to String
        _ => DataType::Utf8,
    }
}

/// Build an Arrow array from JSON values
fn build_array(values: &[Option<&Value>], data_type: &DataType) -> ArrayRef {
    match data_type {
        DataType::Boolean => {
            let arr: BooleanArray = values.iter().map(|v| v.and_then(Value::as_bool)).collect();
            Arc::new(arr)
        }

        DataType::Int64 => {
            let arr: Int64Array = values.iter().map(|v| v.and_then(Value::as_i64)).collect();
            Arc::new(arr)
        }

        DataType::Float64 => {
            let arr: Float64Array = values.iter().map(|v| v.and_then(Value::as_f64)).collect();
            Arc::new(arr)
        }

        _ => {
            let arr: StringArray = values
                .iter()
                .map(|v| {
                    v.map(|v| match v {
                        Value::String(s) => s.clone(),
                        _ => v.to_string(),
                    })
                })
                .collect();
            Arc::new(arr)
        }
    }
}

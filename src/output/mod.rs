//! Output module
//!
//! Turns crawled articles into files.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Inferring a flat Arrow schema from article records
//! - Converting articles to Arrow RecordBatches
//! - Writing CSV, Parquet and JSON-records output

mod schema;
mod writer;

pub use schema::{articles_to_batch, infer_schema};
pub use writer::{
    to_csv_string, write_articles, write_csv, write_json_records, write_parquet, OutputFormat,
    ParquetCompression, ParquetWriter, ParquetWriterConfig,
};

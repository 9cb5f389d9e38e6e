//! Article writers
//!
//! CSV, Parquet and JSON-records output for crawled articles.

use super::schema::articles_to_batch;
use crate::error::{Error, Result};
use crate::types::Article;
use arrow::csv::WriterBuilder;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// Output format for crawled articles.
///
/// An empty crawl produces different output per format: CSV writes nothing
/// at all (not even a header row, since there are no columns), JSON writes
/// `[]`, and Parquet is an error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// Parquet file (requires an output path)
    Parquet,
    /// JSON array of article objects
    #[value(alias = "records")]
    #[serde(alias = "records")]
    Json,
}

impl OutputFormat {
    /// Whether the format can be written to stdout
    pub fn supports_stdout(self) -> bool {
        !matches!(self, Self::Parquet)
    }
}

// ============================================================================
// CSV
// ============================================================================

/// Write articles as CSV, returning the number of rows written.
///
/// Nothing is written for an empty article list.
pub fn write_csv<W: Write>(writer: W, articles: &[Article]) -> Result<usize> {
    if articles.is_empty() {
        return Ok(0);
    }

    let batch = articles_to_batch(articles)?;
    let mut csv = WriterBuilder::new().with_header(true).build(writer);
    csv.write(&batch)?;
    Ok(batch.num_rows())
}

/// Render articles as a CSV string
pub fn to_csv_string(articles: &[Article]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, articles)?;
    String::from_utf8(buffer).map_err(|e| Error::output(format!("CSV is not UTF-8: {e}")))
}

// ============================================================================
// JSON records
// ============================================================================

/// Write articles as a pretty-printed JSON array
pub fn write_json_records<W: Write>(mut writer: W, articles: &[Article]) -> Result<usize> {
    serde_json::to_writer_pretty(&mut writer, articles)?;
    writeln!(writer)?;
    Ok(articles.len())
}

// ============================================================================
// Parquet
// ============================================================================

/// Rows per Parquet row group
const ROW_GROUP_SIZE: usize = 1024 * 1024;

/// Parquet compression codec
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ParquetCompression {
    /// Snappy (fast, moderate ratio)
    #[default]
    Snappy,
    /// Zstandard (better ratio)
    Zstd,
    /// No compression
    #[value(name = "none")]
    #[serde(rename = "none")]
    Uncompressed,
}

impl From<ParquetCompression> for Compression {
    fn from(codec: ParquetCompression) -> Self {
        match codec {
            ParquetCompression::Snappy => Compression::SNAPPY,
            ParquetCompression::Zstd => Compression::ZSTD(ZstdLevel::default()),
            ParquetCompression::Uncompressed => Compression::UNCOMPRESSED,
        }
    }
}

/// Configuration for Parquet writer
#[derive(Debug, Clone, Default)]
pub struct ParquetWriterConfig {
    compression: ParquetCompression,
}

impl ParquetWriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compression codec
    #[must_use]
    pub fn with_compression(mut self, compression: ParquetCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Get compression codec
    pub fn compression(&self) -> ParquetCompression {
        self.compression
    }

    fn build_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression.into())
            .set_max_row_group_size(ROW_GROUP_SIZE)
            .build()
    }
}

/// Parquet file writer
pub struct ParquetWriter {
    writer: ArrowWriter<File>,
    rows_written: usize,
}

impl ParquetWriter {
    /// Create a new Parquet writer
    pub fn new(
        path: impl AsRef<Path>,
        schema: &Schema,
        config: &ParquetWriterConfig,
    ) -> Result<Self> {
        let file = File::create(path.as_ref())
            .map_err(|e| Error::output(format!("Failed to create file: {e}")))?;

        let writer = ArrowWriter::try_new(
            file,
            Arc::new(schema.clone()),
            Some(config.build_properties()),
        )?;

        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    /// Write a RecordBatch to the file
    pub fn write(&mut self, batch: &RecordBatch) -> Result<()> {
        self.writer.write(batch)?;
        self.rows_written += batch.num_rows();
        Ok(())
    }

    /// Close the writer and finalize the file
    pub fn close(self) -> Result<usize> {
        let rows = self.rows_written;
        self.writer.close()?;
        Ok(rows)
    }
}

/// Write articles to a Parquet file.
///
/// Parquet needs at least one column, so an empty article list is an error.
pub fn write_parquet(
    path: impl AsRef<Path>,
    articles: &[Article],
    config: &ParquetWriterConfig,
) -> Result<usize> {
    if articles.is_empty() {
        return Err(Error::output("No articles to write"));
    }

    let batch = articles_to_batch(articles)?;
    let mut writer = ParquetWriter::new(path, batch.schema().as_ref(), config)?;
    writer.write(&batch)?;
    writer.close()
}

// ============================================================================
// Dispatch
// ============================================================================

/// Write articles in the given format to a file, or to stdout when no path
/// is given. Returns the number of articles written.
///
/// `parquet` only applies to [`OutputFormat::Parquet`].
pub fn write_articles(
    output: Option<&Path>,
    format: OutputFormat,
    articles: &[Article],
    parquet: &ParquetWriterConfig,
) -> Result<usize> {
    match (format, output) {
        (OutputFormat::Parquet, Some(path)) => write_parquet(path, articles, parquet),
        (OutputFormat::Parquet, None) => Err(Error::output(
            "Parquet output requires an output path",
        )),
        (format, Some(path)) => {
            let file = File::create(path).map_err(|e| {
                Error::output(format!("Failed to create '{}': {e}", path.display()))
            })?;
            let mut writer = BufWriter::new(file);
            let written = write_text(&mut writer, format, articles)?;
            writer.flush()?;
            Ok(written)
        }
        (format, None) => {
            let mut stdout = io::stdout().lock();
            let written = write_text(&mut stdout, format, articles)?;
            stdout.flush()?;
            Ok(written)
        }
    }
}

fn write_text<W: Write>(writer: W, format: OutputFormat, articles: &[Article]) -> Result<usize> {
    match format {
        OutputFormat::Json => write_json_records(writer, articles),
        _ => write_csv(writer, articles),
    }
}

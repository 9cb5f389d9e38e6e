//! CLI commands and argument parsing

use crate::output::{OutputFormat, ParquetCompression};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Concurrent crawler for paginated news search APIs
#[derive(Parser, Debug)]
#[command(name = "news-crawler")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl every page of a source
    Crawl(CrawlArgs),

    /// Fetch a single page and print it as JSON
    Page {
        /// Source name
        source: String,

        /// Zero-based page index
        #[arg(short, long, default_value = "0")]
        page: u32,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// List available sources
    Sources,
}

/// Search filters shared by `crawl` and `page`
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Only articles published on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub date_from: Option<NaiveDate>,

    /// Free-text search query
    #[arg(short, long)]
    pub query: Option<String>,
}

/// Arguments for `crawl`
#[derive(Args, Debug, Clone)]
pub struct CrawlArgs {
    /// Source name
    pub source: String,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Stop collecting after this many seconds
    #[arg(long)]
    pub time_limit: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Output file (stdout when omitted; required for parquet)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Parquet compression codec
    #[arg(long, value_enum, default_value = "snappy")]
    pub compression: ParquetCompression,

    /// Pages fetched concurrently
    #[arg(long)]
    pub pool_size: Option<usize>,

    /// Attempts per page, the first one included
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Initial retry delay in milliseconds
    #[arg(long)]
    pub base_delay_ms: Option<u64>,

    /// Maximum retry delay in milliseconds
    #[arg(long)]
    pub max_delay_ms: Option<u64>,
}

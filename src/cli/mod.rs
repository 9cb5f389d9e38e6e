//! CLI module
//!
//! Command-line interface for running crawls.
//!
//! # Commands
//!
//! - `crawl` - Crawl every page of a source and write the articles
//! - `page` - Fetch a single page and print it as JSON
//! - `sources` - List available sources

mod commands;
mod runner;

pub use commands::{Cli, Commands, CrawlArgs, SearchArgs};
pub use runner::Runner;

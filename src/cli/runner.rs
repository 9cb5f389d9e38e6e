//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, CrawlArgs, SearchArgs};
use crate::config::CrawlerConfig;
use crate::crawl::{crawl_source, CrawlOptions, CrawlStatus};
use crate::error::Result;
use crate::fetch::{FetchOutcome, PageFetcher, PageRequest, PageSource};
use crate::http::HttpClient;
use crate::output::{write_articles, ParquetWriterConfig};
use crate::types::OptionStringExt;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Crawl(args) => self.crawl(config, args).await,
            Commands::Page {
                source,
                page,
                search,
            } => self.page(&config, source, *page, search).await,
            Commands::Sources => self.list_sources(&config),
        }
    }

    /// Load configuration, falling back to defaults
    fn load_config(&self) -> Result<CrawlerConfig> {
        match &self.cli.config {
            Some(path) => CrawlerConfig::from_file(path),
            None => Ok(CrawlerConfig::default()),
        }
    }

    /// Crawl a source and write its articles
    async fn crawl(&self, mut config: CrawlerConfig, args: &CrawlArgs) -> Result<()> {
        apply_overrides(&mut config, args);
        let registry = config.registry()?;

        let mut options = search_options(&args.search);
        if let Some(limit) = args
            .time_limit
            .map(Duration::from_secs)
            .or_else(|| config.time_limit())
        {
            options = options.time_limit(limit);
        }

        let result = crawl_source(&registry, &config, &args.source, &options).await?;

        match result.status {
            CrawlStatus::InitialPageFailed => {
                warn!("No articles collected from '{}'", args.source);
            }
            CrawlStatus::TimedOut => {
                warn!(
                    "Crawl stopped by time limit after {} of {} pages",
                    result.pages_fetched, result.total_pages
                );
            }
            CrawlStatus::Complete => {}
        }

        let parquet = ParquetWriterConfig::new().with_compression(args.compression);
        let written = write_articles(
            args.output.as_deref(),
            args.format,
            &result.articles,
            &parquet,
        )?;
        if let Some(path) = &args.output {
            info!("Wrote {written} articles to {}", path.display());
        }
        Ok(())
    }

    /// Fetch one page and print it
    async fn page(
        &self,
        config: &CrawlerConfig,
        name: &str,
        page: u32,
        search: &SearchArgs,
    ) -> Result<()> {
        let registry = config.registry()?;
        let source = registry.get(name)?.clone();
        let client = HttpClient::with_config(config.http_client_config())?;
        let fetcher = PageFetcher::new(client, source);

        let request = PageRequest::new(page)
            .with_date_from(search.date_from)
            .with_query(search.query.clone().none_if_empty().as_deref());

        match fetcher.fetch(&request).await {
            FetchOutcome::Success(response) => {
                let output = json!({
                    "page": page,
                    "total_pages": response.total_pages,
                    "articles": response.articles,
                    "metadata": response.metadata,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
                Ok(())
            }
            FetchOutcome::Exhausted { error, .. } => Err(error),
        }
    }

    /// List available sources
    fn list_sources(&self, config: &CrawlerConfig) -> Result<()> {
        let registry = config.registry()?;

        let sources: Vec<Value> = registry
            .iter()
            .map(|source| {
                json!({
                    "name": source.name,
                    "title": source.display_title(),
                    "url": source.url,
                    "page_size": source.page_size,
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&sources)?);
        Ok(())
    }
}

/// Crawl options from the search flags
fn search_options(search: &SearchArgs) -> CrawlOptions {
    let mut options = CrawlOptions::new();
    if let Some(date) = search.date_from {
        options = options.date_from(date);
    }
    if let Some(query) = search.query.clone().none_if_empty() {
        options = options.query(query);
    }
    options
}

/// Command-line flags take precedence over the config file
fn apply_overrides(config: &mut CrawlerConfig, args: &CrawlArgs) {
    if let Some(pool_size) = args.pool_size {
        config.crawl.pool_size = pool_size;
    }
    if let Some(retries) = args.max_retries {
        config.http.max_retries = retries;
    }
    if let Some(delay) = args.base_delay_ms {
        config.http.retry_backoff.initial_ms = delay;
    }
    if let Some(delay) = args.max_delay_ms {
        config.http.retry_backoff.max_ms = delay;
    }
}

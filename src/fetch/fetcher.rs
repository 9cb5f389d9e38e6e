//! Page fetcher implementation

use super::types::{FetchOutcome, PageRequest};
use crate::decode::{JsonPageDecoder, PageDecoder};
use crate::http::{HttpClient, RequestConfig};
use crate::sources::SourceDefinition;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Anything that can produce pages for the crawl coordinator
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page. Never fails; exhaustion is an outcome.
    async fn fetch(&self, request: &PageRequest) -> FetchOutcome;
}

/// Fetches pages of one search source over HTTP
#[derive(Clone)]
pub struct PageFetcher {
    client: HttpClient,
    source: SourceDefinition,
    decoder: Arc<dyn PageDecoder>,
}

impl PageFetcher {
    /// Create a fetcher decoding pages with the source's JSON layout
    pub fn new(client: HttpClient, source: SourceDefinition) -> Self {
        let decoder = Arc::new(JsonPageDecoder::with_config(source.decoder.clone()));
        Self {
            client,
            source,
            decoder,
        }
    }

    /// Replace the page decoder
    #[must_use]
    pub fn with_decoder(mut self, decoder: Arc<dyn PageDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// The source this fetcher walks
    pub fn source(&self) -> &SourceDefinition {
        &self.source
    }

    /// Build the query parameters and headers for one page
    pub fn request_config(&self, request: &PageRequest) -> RequestConfig {
        let names = &self.source.params;
        let mut config = RequestConfig::new();

        for (key, value) in &self.source.extra_params {
            config = config.query(key, value);
        }

        config = config
            .query(&names.page_size, self.source.page_size.to_string())
            .query(&names.order, &self.source.order)
            .query(&names.page, request.page().to_string());

        if let Some(date_from) = request.date_from_param() {
            config = config.query(&names.date_from, date_from);
        }
        if let Some(query) = request.query() {
            config = config.query(&names.query, query);
        }

        for (key, value) in &self.source.headers {
            config = config.header(key, value);
        }

        config
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    async fn fetch(&self, request: &PageRequest) -> FetchOutcome {
        let page = request.page();
        let config = self.request_config(request);

        let body = match self.client.get_with_config(&self.source.url, config).await {
            Ok(body) => body,
            Err(error) => {
                warn!("Failed to fetch page {} of '{}': {}", page, self.source.name, error);
                return FetchOutcome::Exhausted { page, error };
            }
        };

        match self.decoder.decode(&body) {
            Ok(response) => {
                debug!(
                    "Fetched page {} of '{}': {} articles",
                    page,
                    self.source.name,
                    response.articles.len()
                );
                FetchOutcome::Success(response)
            }
            Err(error) => {
                warn!("Failed to decode page {} of '{}': {}", page, self.source.name, error);
                FetchOutcome::Exhausted { page, error }
            }
        }
    }
}

impl std::fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("client", &self.client)
            .field("source", &self.source.name)
            .finish_non_exhaustive()
    }
}

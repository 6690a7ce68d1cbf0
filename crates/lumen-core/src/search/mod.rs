//! Web search backends.

mod error;
mod tavily;

pub use error::SearchError;
pub use tavily::TavilyClient;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;

/// A single hit returned by the search service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }
}

/// Trait for web search services.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search for `query`, returning at most `max_results` hits in the
    /// order the service ranked them.
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<SearchResult>, SearchError>;
}

/// Blanket implementation for boxed trait objects.
#[async_trait]
impl SearchProvider for Box<dyn SearchProvider> {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        (**self).search(query, max_results).await
    }
}

/// Search backend configuration.
#[derive(Debug, Clone)]
pub enum SearchBackend {
    Tavily { base_url: String, api_key: String },
}

impl SearchBackend {
    /// Creates a backend from SearchConfig, using `api_key` as the credential.
    pub fn from_config(config: &SearchConfig, api_key: impl Into<String>) -> Result<Self, SearchError> {
        match config.provider.as_str() {
            "tavily" => Ok(SearchBackend::Tavily {
                base_url: config.base_url_or_default(),
                api_key: api_key.into(),
            }),
            other => Err(SearchError::UnknownProvider(other.to_string())),
        }
    }

    /// Creates a search client from the backend configuration.
    pub fn build(self, timeout: Duration) -> Result<Box<dyn SearchProvider>, SearchError> {
        match self {
            SearchBackend::Tavily { base_url, api_key } => {
                if api_key.is_empty() {
                    return Err(SearchError::MissingApiKey);
                }
                Ok(Box::new(
                    TavilyClient::new(api_key)
                        .with_base_url(base_url)
                        .with_timeout(timeout),
                ))
            }
        }
    }
}

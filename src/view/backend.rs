use std::sync::Arc;

use async_trait::async_trait;

use crate::api::search::search_titles;
use crate::config::WatchmodeConfig;
use crate::watchmode::client::http_client;
use crate::watchmode::{ProviderError, SearchResponse, SearchResult, WatchmodeClient};

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Search proxy returned status {0}")]
    Status(u16),
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Where the search view sends its queries.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;
}

/// Runs the proxy logic in-process against the provider.
pub struct ProxyBackend {
    client: Arc<WatchmodeClient>,
}

impl ProxyBackend {
    pub fn new(client: Arc<WatchmodeClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchBackend for ProxyBackend {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        Ok(search_titles(&self.client, query).await?)
    }
}

/// Talks to a search proxy over HTTP, e.g. `http://api.local/api/search`.
pub struct HttpSearchBackend {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpSearchBackend {
    /// Uses the provider section's user agent and timeout.
    pub fn new(endpoint: impl Into<String>, config: &WatchmodeConfig) -> reqwest::Result<Self> {
        Ok(Self {
            http: http_client(config)?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("query", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::Status(response.status().as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.results)
    }
}

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{ListTitlesResponse, ProviderSearchResponse};
use crate::config::WatchmodeConfig;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API key not found in environment variables")]
    MissingApiKey,
    #[error("Provider returned {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Raw outcome of the regions probe. Non-success statuses are reported, not
/// treated as errors.
#[derive(Debug, Clone)]
pub struct ProviderProbe {
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<serde_json::Value>,
}

/// HTTP client carrying the configured `Accept`/`User-Agent` headers and
/// request timeout. Shared by every outbound search path.
pub fn http_client(config: &WatchmodeConfig) -> reqwest::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Ok(agent) = HeaderValue::from_str(&config.user_agent) {
        headers.insert(USER_AGENT, agent);
    }

    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

pub struct WatchmodeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WatchmodeClient {
    pub fn new(config: &WatchmodeConfig) -> ProviderResult<Self> {
        Self::with_api_key(config, config.resolve_api_key())
    }

    pub fn with_api_key(config: &WatchmodeConfig, api_key: Option<String>) -> ProviderResult<Self> {
        Ok(Self {
            http: http_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// First eight characters of the key, for diagnostics.
    pub fn masked_api_key(&self) -> String {
        match &self.api_key {
            Some(key) => format!("{}...", key.chars().take(8).collect::<String>()),
            None => "NOT_SET".to_string(),
        }
    }

    fn api_key(&self) -> ProviderResult<&str> {
        self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}/", self.base_url, endpoint)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> ProviderResult<T> {
        let api_key = self.api_key()?;
        let url = self.url(endpoint);
        debug!(url = %url, "Provider request");

        let response = self
            .http
            .get(&url)
            .query(&[("apiKey", api_key)])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `GET /search/?search_field=name&search_value=<query>`
    pub async fn search(&self, query: &str) -> ProviderResult<ProviderSearchResponse> {
        self.get_json(
            "search",
            &[("search_field", "name"), ("search_value", query)],
        )
        .await
    }

    /// `GET /list-titles/?limit=<limit>&types=<types>`
    pub async fn list_titles(&self, limit: u32, types: &str) -> ProviderResult<ListTitlesResponse> {
        let limit = limit.to_string();
        self.get_json("list-titles", &[("limit", limit.as_str()), ("types", types)])
            .await
    }

    /// `GET /regions/`, used to check that the key is accepted.
    pub async fn probe(&self) -> ProviderResult<ProviderProbe> {
        let api_key = self.api_key()?;

        let response = self
            .http
            .get(self.url("regions"))
            .query(&[("apiKey", api_key)])
            .send()
            .await?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let text = response.text().await?;
        let body = if text.is_empty() {
            None
        } else {
            Some(serde_json::from_str(&text)?)
        };

        Ok(ProviderProbe {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use super::error::ApiError;
use crate::server::AppState;
use crate::watchmode::{ProviderResult, SearchResponse, SearchResult, WatchmodeClient};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
}

/// One provider search, people filtered out.
pub async fn search_titles(client: &WatchmodeClient, query: &str) -> ProviderResult<Vec<SearchResult>> {
    let results = client.search(query).await?.into_titles();
    info!(query = %query, count = results.len(), "Search completed");
    Ok(results)
}

/// `GET /api/search?query=`
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or(ApiError::MissingQuery)?;

    let results = search_titles(&state.watchmode, &query).await?;
    Ok(Json(SearchResponse { results }))
}

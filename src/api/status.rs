use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;

use super::error::ApiError;
use crate::server::AppState;
use crate::watchmode::ProviderError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status: u16,
    pub status_text: String,
    pub api_key: String,
    pub response: Option<serde_json::Value>,
    pub headers: BTreeMap<String, String>,
}

/// `GET /api/status`: check the configured key against the provider.
pub async fn provider_status(State(state): State<AppState>) -> Result<Json<StatusReport>, ApiError> {
    let probe = state.watchmode.probe().await.map_err(|e| match e {
        ProviderError::MissingApiKey => ApiError::MissingApiKey,
        other => ApiError::Probe(other),
    })?;

    Ok(Json(StatusReport {
        status: probe.status,
        status_text: probe.status_text,
        api_key: state.watchmode.masked_api_key(),
        response: probe.body,
        headers: probe.headers,
    }))
}

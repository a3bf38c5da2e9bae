use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::watchmode::ProviderError;

/// Failures of the JSON endpoints. Upstream details are logged, the client
/// only sees a generic message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Query is required")]
    MissingQuery,
    #[error("API key not found in environment variables")]
    MissingApiKey,
    #[error("Upstream request failed: {0}")]
    Upstream(ProviderError),
    #[error("Upstream response could not be decoded: {0}")]
    Decode(ProviderError),
    #[error("Provider probe failed: {0}")]
    Probe(ProviderError),
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::MissingApiKey => ApiError::MissingApiKey,
            ProviderError::Decode(_) => ApiError::Decode(e),
            _ => ApiError::Upstream(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::MissingQuery => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Query is required" }),
            ),
            ApiError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "API key not found in environment variables" }),
            ),
            ApiError::Upstream(e) => {
                error!(error = %e, "Error fetching search results");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to fetch search results" }),
                )
            }
            ApiError::Decode(e) => {
                error!(error = %e, "Error decoding search results");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            ApiError::Probe(e) => {
                error!(error = %e, "Provider probe failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Test failed", "details": e.to_string() }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

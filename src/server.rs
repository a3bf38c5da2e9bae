use axum::{
    extract::Request,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::Config;
use crate::session::SessionRegistry;
use crate::view::{HttpSearchBackend, ProxyBackend, SearchBackend};
use crate::watchmode::{ProviderError, WatchmodeClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub watchmode: Arc<WatchmodeClient>,
    pub sessions: Arc<SessionRegistry>,
    pub search: Arc<dyn SearchBackend>,
}

impl AppState {
    pub fn new(
        config: Config,
        watchmode: Arc<WatchmodeClient>,
        sessions: Arc<SessionRegistry>,
        search: Arc<dyn SearchBackend>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            watchmode,
            sessions,
            search,
        }
    }

    /// Wire up the provider client, session registry and search backend
    /// described by `config`.
    pub fn from_config(config: Config) -> Result<Self, ProviderError> {
        let watchmode = Arc::new(WatchmodeClient::new(&config.watchmode)?);
        let sessions = Arc::new(SessionRegistry::new(config.session.idle_timeout_secs));

        let search: Arc<dyn SearchBackend> = match &config.search.proxy_url {
            Some(url) => {
                info!("Searching through remote proxy {}", url);
                Arc::new(HttpSearchBackend::new(url.clone(), &config.watchmode)?)
            }
            None => Arc::new(ProxyBackend::new(watchmode.clone())),
        };

        Ok(Self::new(config, watchmode, sessions, search))
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/search", get(crate::api::search))
        .route("/api/status", get(crate::api::provider_status));

    let page_routes = Router::new()
        .route("/", get(crate::web::index))
        .route("/search", post(crate::web::submit_search))
        .route("/favorites/:id", post(crate::web::toggle_favorite))
        .route("/theme", post(crate::web::toggle_theme));

    Router::new()
        .route("/robots.txt", get(robots_txt_handler))
        .merge(api_routes)
        .merge(page_routes)
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /api/\n"
}

async fn fallback_handler(req: Request) -> impl IntoResponse {
    // CORS preflight for paths without a route
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}

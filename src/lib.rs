pub mod api;
pub mod config;
pub mod listing;
pub mod middleware;
pub mod movie;
pub mod server;
pub mod session;
pub mod store;
pub mod view;
pub mod watchmode;
pub mod web;

use std::net::SocketAddr;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Provider client error: {0}")]
    Provider(#[from] watchmode::ProviderError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: Option<&str>, debug_logs: bool) -> Result<(), ServerError> {
    let config = match config_path {
        Some(path) => {
            info!("Using config file: {}", path);
            config::Config::from_file(path)?
        }
        None => {
            info!("No config file given, using defaults");
            config::Config::default()
        }
    };

    if debug_logs {
        info!("Debug logging enabled");
    }

    let state = server::AppState::from_config(config.clone())?;
    if state.watchmode.has_api_key() {
        info!("Watchmode API key: {}", state.watchmode.masked_api_key());
    } else {
        warn!(
            "{} is not set, listings will be empty and searches will fail",
            config.watchmode.api_key_env
        );
    }

    state.sessions.clone().start_background_sweep();

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let app = server::build_router(state);

    match (&config.listen.tlscert, &config.listen.tlskey) {
        (Some(cert_path), Some(key_path)) => {
            info!("Loading TLS certificate from {}", cert_path);
            info!("Loading TLS key from {}", key_path);

            let tls_config =
                axum_server::tls_rustls::RustlsConfig::from_pem_file(cert_path, key_path)
                    .await
                    .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

            info!("Serving HTTPS on {}", addr);

            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service())
                .await
                .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
        }
        _ => {
            info!("Serving HTTP on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

            axum::serve(listener, app)
                .await
                .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
        }
    }

    Ok(())
}

//! HTTP API for the content tree
//!
//! Exposes the content service as a REST API. All operations on the store
//! are synchronous in-memory tree walks, so handlers call the service
//! directly without offloading to a blocking pool.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin content-server
//! ```
//!
//! # Security
//!
//! - CORS restricted to the configured origins
//! - No authentication

use axum::{
    http::{header, Method},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use contentspace_core::{ContentService, ContentStore};

use crate::config::ServerConfig;

mod content_endpoints;
mod http_error;
mod validation;

pub use content_endpoints::{SearchQuery, DELETE_CONFIRMATION};
pub use http_error::{ErrorResponse, HttpError};
pub use validation::validate_content;

/// Application state shared across all endpoints
///
/// The store inside the service serializes its own mutations, so no extra
/// request-level lock is needed here.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ContentService>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(service: ContentService, config: ServerConfig) -> Self {
        Self {
            service: Arc::new(service),
            config: Arc::new(config),
        }
    }

    /// State backed by a fresh, empty store built from `config.store`
    pub fn from_config(config: ServerConfig) -> Self {
        let store = Arc::new(ContentStore::with_config(config.store.clone()));
        Self::new(ContentService::new(store), config)
    }
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    Router::new()
        .merge(content_endpoints::routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Create CORS layer for the configured origins
///
/// Origins are checked by `ServerConfig::validate`; any that still fail to
/// parse are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<header::HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse::<header::HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any)
        .allow_credentials(false)
}

/// Start the HTTP server and run until Ctrl+C
///
/// # Errors
///
/// Returns error if the configuration is invalid or the server fails to bind.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;
    let addr = config.bind_address();
    let state = AppState::from_config(config);
    let store = Arc::clone(state.service.store());
    let app = create_router(state);

    tracing::info!("🚀 Content server starting on http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let remaining = store.len()?;
    store.clear()?;
    tracing::info!("🛑 Content server stopped, discarded {} nodes", remaining);

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
    }
}

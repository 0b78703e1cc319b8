//! ContentSpace HTTP Server
//!
//! Boundary layer around `contentspace-core`: routing, request validation,
//! error envelopes and runtime configuration.
//!
//! - [`api`] - axum router and content endpoints
//! - [`config`] - `ServerConfig` loaded from environment variables

pub mod api;
pub mod config;

pub use api::{create_router, start_server, AppState};
pub use config::ServerConfig;

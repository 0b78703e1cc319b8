//! Content Server Binary
//!
//! Starts the HTTP API over a fresh in-memory content store. All content is
//! lost when the process exits.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (127.0.0.1:8080)
//! cargo run --bin content-server
//!
//! # Custom port, debug logging
//! CONTENT_SERVER_PORT=9000 RUST_LOG=debug cargo run --bin content-server
//! ```
//!
//! See `config.rs` for the full list of environment variables.

use contentspace_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🚀 ContentSpace Server");
    tracing::info!("==================================");

    let config = ServerConfig::from_env()?;

    tracing::info!("📡 Address: {}", config.bind_address());
    tracing::info!("🌐 CORS origins: {:?}", config.cors_origins);
    tracing::info!("🏷️ Default search tag: {:?}", config.search_default_tag);
    tracing::info!(
        "🌳 Replaced children policy: {:?}",
        config.store.replaced_children
    );

    contentspace_server::start_server(config).await?;

    Ok(())
}

//! HTTP server for place-picker
//!
//! Provides REST API endpoints for search, reverse geocoding, location
//! resolution and the session's selection history.

pub mod routes;
pub mod state;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::locale::Locale;
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Start the HTTP server
///
/// # Arguments
/// * `config` - Server configuration
/// * `locale` - Language and region for geocoding
///
/// # Returns
/// Never returns unless the server shuts down
pub async fn run(config: Config, locale: Locale) -> Result<()> {
    let addr = config.server_addr();
    run_on(&addr, config, locale).await
}

/// Start the HTTP server with a specific address
///
/// Useful for tests or when you want to override config
pub async fn run_on(addr: &str, config: Config, locale: Locale) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| Error::Server(format!("Invalid server address: {}", e)))?;

    info!(locale = %locale, provider = %config.provider.url, "geocoding setup");

    let state = Arc::new(AppState::from_config(config, locale)?);
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}

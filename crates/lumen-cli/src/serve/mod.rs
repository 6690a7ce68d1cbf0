//! Local web server with a browser UI for asking questions.
//!
//! # Module Structure
//!
//! - `handlers` - HTTP route handlers
//! - `models` - API request/response types (DTOs)
//! - `templates` - HTML/CSS/JS template rendering

mod handlers;
mod models;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use color_eyre::eyre;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use lumen_core::Config;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state for the server.
///
/// Read-only; every request builds its own pipeline from these settings.
pub struct AppState {
    pub settings: Config,
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the web server.
pub struct ServeConfig {
    /// Port to listen on.
    pub port: u16,
    /// Whether to open the browser automatically.
    pub open_browser: bool,
    /// Loaded configuration.
    pub settings: Config,
}

// =============================================================================
// Server Entry Point
// =============================================================================

/// Build the router for the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/options", get(handlers::api_options))
        .route("/api/ask", post(handlers::api_ask))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Start the web server.
pub async fn start_server(config: ServeConfig) -> eyre::Result<()> {
    let state = Arc::new(AppState {
        settings: config.settings,
    });

    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let url = format!("http://localhost:{}", config.port);

    println!("Starting Lumen server...");
    println!("Open: {}", url);
    println!("Press Ctrl+C to stop\n");

    if config.open_browser {
        if let Err(e) = open::that(&url) {
            warn!("could not open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

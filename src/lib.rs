//! # Collection Admin
//!
//! Host for a browser admin panel over a generic collections REST API
//! (`GET /collections`, `GET/POST /{collection}`, `PUT/DELETE /{collection}/{id}`).
//!
//! The panel itself is the `collection-admin-ui` crate, compiled to WASM and
//! embedded here. This crate serves it, publishes its runtime configuration
//! at `/config.json` and exposes health endpoints.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use collection_admin::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load admin.toml and config/collections/* from the working directory
//!     let settings = Settings::new()?;
//!     println!("Serving on {}:{}", settings.server.host, settings.server.port);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;

use crate::adapters::config_handler;
use crate::adapters::health_handler::HealthHandler;
use crate::config::Settings;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Creates the Axum application router with all endpoints configured.
///
/// # Arguments
///
/// * `settings` - Validated application settings
/// * `health_handler` - Health check handler
pub fn create_app(settings: Arc<Settings>, health_handler: Arc<HealthHandler>) -> Router {
    let health_router = Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/health/ready", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.ready().await }
            }
        }))
        .route("/health/live", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.live().await }
            }
        }));

    let config_router = Router::new()
        .route("/config.json", get(config_handler::get_client_config))
        .with_state(settings);

    health_router
        .merge(config_router)
        // UI endpoint (catch-all for SPA)
        .fallback(crate::adapters::ui_handler::UIHandler::serve)
        .layer(TraceLayer::new_for_http())
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}

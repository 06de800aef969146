use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::ui_handler::UIHandler;
use crate::config::Settings;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub config: String,
    pub ui: String,
}

pub struct HealthHandler {
    settings: Arc<Settings>,
    ui_bundled: bool,
    start_time: std::time::Instant,
}

impl HealthHandler {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self::with_ui_bundled(settings, UIHandler::is_bundled())
    }

    pub fn with_ui_bundled(settings: Arc<Settings>, ui_bundled: bool) -> Self {
        Self {
            settings,
            ui_bundled,
            start_time: std::time::Instant::now(),
        }
    }

    /// Basic health check - returns 200 if server is running
    pub async fn health(&self) -> impl IntoResponse {
        let uptime = self.start_time.elapsed().as_secs();
        let status = HealthStatus {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            checks: HealthChecks {
                config: format!("{} declared collection(s)", self.settings.collections.len()),
                ui: if self.ui_bundled { "bundled" } else { "missing" }.to_string(),
            },
        };

        (StatusCode::OK, Json(status))
    }

    /// Readiness check - the server is only useful once it can hand out the UI
    pub async fn ready(&self) -> impl IntoResponse {
        if self.ui_bundled {
            (StatusCode::OK, Json(serde_json::json!({
                "status": "ready",
                "message": "Server is ready to accept requests"
            })))
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, Json(serde_json::json!({
                "status": "not_ready",
                "message": "UI bundle was not embedded at build time"
            })))
        }
    }

    /// Liveness check - returns 200 if server is alive
    pub async fn live(&self) -> impl IntoResponse {
        (StatusCode::OK, Json(serde_json::json!({
            "status": "alive",
            "message": "Server is alive"
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiSettings, ServerSettings, Settings};

    fn settings() -> Arc<Settings> {
        Arc::new(Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            api: ApiSettings::default(),
            collections: vec![],
        })
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let handler = HealthHandler::new(settings());

        let response = handler.health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_requires_ui_bundle() {
        let handler = HealthHandler::with_ui_bundled(settings(), false);
        let response = handler.ready().await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let handler = HealthHandler::with_ui_bundled(settings(), true);
        let response = handler.ready().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_live_endpoint() {
        let handler = HealthHandler::new(settings());

        let response = handler.live().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

use collection_admin::adapters::health_handler::HealthHandler;
use collection_admin::config::{ApiSettings, CollectionConfig, ServerSettings, Settings};
use std::net::SocketAddr;
use std::sync::Arc;

pub struct TestServer {
    pub addr: SocketAddr,
    pub base_url: String,
}

impl TestServer {
    pub async fn new() -> Self {
        Self::with_settings(Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            api: ApiSettings {
                development_url: Some("http://localhost:5000/api".to_string()),
                ..ApiSettings::default()
            },
            collections: vec![CollectionConfig {
                name: "tasks".to_string(),
                fields: vec!["title".to_string(), "comments".to_string()],
            }],
        })
        .await
    }

    pub async fn with_settings(settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let health_handler = Arc::new(HealthHandler::new(settings.clone()));
        let app = collection_admin::create_app(settings, health_handler);

        // Start server on random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestServer { addr, base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

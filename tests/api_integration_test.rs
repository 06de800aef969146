use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use collection_admin::adapters::health_handler::HealthHandler;
use collection_admin::config::{ApiSettings, CollectionConfig, Environment, ServerSettings, Settings};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

fn app() -> axum::Router {
    let settings = Arc::new(Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 8080,
        },
        api: ApiSettings {
            base_url: Some("https://data.example.com/api".to_string()),
            environment: Some(Environment::Production),
            id_field: "id".to_string(),
            ..ApiSettings::default()
        },
        collections: vec![CollectionConfig {
            name: "tasks".to_string(),
            fields: vec!["title".to_string(), "dueDate".to_string()],
        }],
    });
    let health_handler = Arc::new(HealthHandler::new(settings.clone()));
    collection_admin::create_app(settings, health_handler)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_config_json() {
    let request = Request::builder()
        .uri("/config.json")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["api_base_url"], "https://data.example.com/api");
    assert_eq!(body["environment"], "production");
    assert_eq!(body["id_field"], "id");
    assert_eq!(body["enforce_required"], false);
    assert_eq!(body["collections"][0]["name"], "tasks");
    assert_eq!(body["collections"][0]["fields"][1], "dueDate");
}

#[tokio::test]
async fn test_health_live() {
    let request = Request::builder()
        .uri("/health/live")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_cors_preflight_allowed() {
    let request = Request::builder()
        .uri("/config.json")
        .method("OPTIONS")
        .header("Origin", "https://admin.example.com")
        .header("Access-Control-Request-Method", "GET")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_unknown_path_falls_back_to_ui() {
    let request = Request::builder()
        .uri("/some/client/route")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    // index.html when the bundle is embedded, 404 otherwise
    if collection_admin::adapters::ui_handler::UIHandler::is_bundled() {
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()["content-type"].to_str().unwrap().starts_with("text/html"));
    } else {
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

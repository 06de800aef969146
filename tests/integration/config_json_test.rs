use super::common;

use collection_admin::adapters::config_handler::ClientConfig;
use common::test_server::TestServer;

#[tokio::test]
async fn test_config_json_round_trip() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/config.json"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);

    let config: ClientConfig = response.json().await.unwrap();
    assert!(config.api_base_url.is_none());
    assert!(config.environment.is_none());
    assert_eq!(config.development_url.as_deref(), Some("http://localhost:5000/api"));
    assert_eq!(config.id_field, "_id");
    assert_eq!(config.collections.len(), 1);
    assert_eq!(config.collections[0].fields, vec!["title", "comments"]);
}

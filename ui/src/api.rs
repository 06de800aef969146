//! API client for the collections backend

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::config::RuntimeConfig;
use crate::error::ApiError;
use crate::types::{Record, RecordId};

/// Same-origin path where the host publishes [`RuntimeConfig`]
const RUNTIME_CONFIG_PATH: &str = "/config.json";

/// Client bound to one resolved base URL
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn collections_url(&self) -> String {
        format!("{}/collections", self.base_url)
    }

    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(collection))
    }

    pub fn record_url(&self, collection: &str, id: &RecordId) -> String {
        format!(
            "{}/{}",
            self.collection_url(collection),
            urlencoding::encode(id.as_str())
        )
    }

    // ========================================================================
    // Collections
    // ========================================================================

    pub async fn list_collections(&self) -> Result<Vec<String>, ApiError> {
        fetch_json::<Vec<String>>(&self.collections_url()).await
    }

    // ========================================================================
    // Records
    // ========================================================================

    pub async fn list_records(&self, collection: &str) -> Result<Vec<Record>, ApiError> {
        fetch_json::<Vec<Record>>(&self.collection_url(collection)).await
    }

    pub async fn create_record(&self, collection: &str, payload: &Record) -> Result<(), ApiError> {
        let request = Request::post(&self.collection_url(collection))
            .json(payload)
            .map_err(|e| ApiError::Transport(format!("Failed to serialize body: {}", e)))?;
        let response = request.send().await.map_err(transport)?;
        expect_success(response).await
    }

    pub async fn update_record(&self, collection: &str, id: &RecordId, payload: &Record) -> Result<(), ApiError> {
        let request = Request::put(&self.record_url(collection, id))
            .json(payload)
            .map_err(|e| ApiError::Transport(format!("Failed to serialize body: {}", e)))?;
        let response = request.send().await.map_err(transport)?;
        expect_success(response).await
    }

    pub async fn delete_record(&self, collection: &str, id: &RecordId) -> Result<(), ApiError> {
        let response = Request::delete(&self.record_url(collection, id))
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }
}

/// Fetch the host-published configuration. Fails when the bundle is served
/// by something that does not publish one.
pub async fn fetch_runtime_config() -> Result<RuntimeConfig, ApiError> {
    fetch_json::<RuntimeConfig>(RUNTIME_CONFIG_PATH).await
}

fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = Request::get(url).send().await.map_err(transport)?;

    if !response.ok() {
        return Err(status_error(response).await);
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Write endpoints answer with the stored record or a confirmation; the
/// list is re-fetched afterwards, so the body is not needed.
async fn expect_success(response: Response) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else {
        Err(status_error(response).await)
    }
}

async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ApiError::from_status(status, &body)
}

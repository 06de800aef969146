//! Publishes the UI's runtime configuration at `/config.json`.
//!
//! The field names match what the UI deserializes, so a host-served bundle
//! needs no rebuild to point at a different backend.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{CollectionConfig, Environment, Settings};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: Option<String>,
    pub environment: Option<Environment>,
    pub development_url: Option<String>,
    pub production_url: Option<String>,
    pub id_field: String,
    pub enforce_required: bool,
    pub collections: Vec<CollectionConfig>,
}

impl From<&Settings> for ClientConfig {
    fn from(settings: &Settings) -> Self {
        let api = &settings.api;
        Self {
            api_base_url: api.base_url.clone(),
            environment: api.environment,
            development_url: api.development_url.clone(),
            production_url: api.production_url.clone(),
            id_field: api.id_field.clone(),
            enforce_required: api.enforce_required,
            collections: settings.collections.clone(),
        }
    }
}

pub async fn get_client_config(State(settings): State<Arc<Settings>>) -> Json<ClientConfig> {
    Json(ClientConfig::from(settings.as_ref()))
}

use std::collections::HashMap;
use thiserror::Error;

use crate::config::{normalize_api_url, ApiSettings, CollectionConfig, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    /// Check the whole configuration, collecting every problem found.
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_server(&settings.server) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_api(&settings.api) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_collections(&settings.collections, &settings.api.id_field) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &crate::config::ServerSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_api(api: &ApiSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let urls = [
            ("api.base_url", &api.base_url),
            ("api.development_url", &api.development_url),
            ("api.production_url", &api.production_url),
        ];
        for (field, value) in urls {
            if let Some(value) = value {
                if let Err(reason) = check_url(value) {
                    errors.push(ValidationError::InvalidValue {
                        field: field.to_string(),
                        reason,
                    });
                }
            }
        }

        if api.id_field.trim().is_empty() {
            errors.push(ValidationError::MissingField("api.id_field".to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_collections(collections: &[CollectionConfig], id_field: &str) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen_names = HashMap::new();

        for (idx, collection) in collections.iter().enumerate() {
            if let Some(prev_idx) = seen_names.insert(&collection.name, idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "Collection '{}' appears at indices {} and {}",
                    collection.name, prev_idx, idx
                )));
            }

            if collection.name.trim().is_empty() {
                errors.push(ValidationError::MissingField(format!("collections[{}].name", idx)));
            }

            if collection.fields.is_empty() {
                errors.push(ValidationError::InvalidValue {
                    field: format!("collections[{}].fields", idx),
                    reason: "At least one field must be declared".to_string(),
                });
            }

            if collection.fields.iter().any(|f| f == id_field) {
                errors.push(ValidationError::InvalidValue {
                    field: format!("collections[{}].fields", idx),
                    reason: format!("'{}' is the identifier and cannot be declared as a field", id_field),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A configured API root must be an absolute http(s) URL once normalized;
/// a bare host counts as `https://`.
fn check_url(value: &str) -> Result<(), String> {
    let Some(normalized) = normalize_api_url(value) else {
        return Err("URL is empty".to_string());
    };
    let parsed = url::Url::parse(&normalized).map_err(|e| e.to_string())?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("Unsupported scheme '{}'", other)),
    }
}

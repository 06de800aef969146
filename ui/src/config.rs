//! Runtime configuration and API base URL resolution.
//!
//! The base URL is resolved once at startup and handed to the
//! [`ApiClient`](crate::api::ApiClient). A resolved URL is always the full
//! API root: nothing is appended to a configured value. Only the same-origin
//! fallback adds `/api`.

use serde::{Deserialize, Serialize};

use crate::form::RequiredPolicy;
use crate::types::DEFAULT_ID_FIELD;

/// Used when the page is served from a local host and nothing is configured.
pub const LOCAL_API_URL: &str = "http://localhost:5000/api";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Environment implied by how this bundle was compiled
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }
}

/// Field list declared for one collection
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSchemaConfig {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

/// Configuration published by the host at `/config.json`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Explicit override; wins over everything else
    pub api_base_url: Option<String>,
    pub environment: Option<Environment>,
    pub development_url: Option<String>,
    pub production_url: Option<String>,
    pub id_field: String,
    pub enforce_required: bool,
    pub collections: Vec<CollectionSchemaConfig>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            environment: None,
            development_url: None,
            production_url: None,
            id_field: DEFAULT_ID_FIELD.to_string(),
            enforce_required: false,
            collections: Vec::new(),
        }
    }
}

impl RuntimeConfig {
    /// Values baked in at compile time (`ADMIN_API_URL`, `ADMIN_DEV_API_URL`,
    /// `ADMIN_PROD_API_URL`, `ADMIN_ID_FIELD`).
    pub fn from_build_env() -> Self {
        Self {
            api_base_url: option_env!("ADMIN_API_URL").map(str::to_string),
            environment: None,
            development_url: option_env!("ADMIN_DEV_API_URL").map(str::to_string),
            production_url: option_env!("ADMIN_PROD_API_URL").map(str::to_string),
            id_field: option_env!("ADMIN_ID_FIELD").unwrap_or(DEFAULT_ID_FIELD).to_string(),
            ..Self::default()
        }
    }

    /// Fill URLs the host left unset from `fallback`.
    pub fn or_else(mut self, fallback: RuntimeConfig) -> Self {
        self.api_base_url = self.api_base_url.or(fallback.api_base_url);
        self.development_url = self.development_url.or(fallback.development_url);
        self.production_url = self.production_url.or(fallback.production_url);
        if self.id_field.trim().is_empty() {
            self.id_field = fallback.id_field;
        }
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_else(Environment::from_build)
    }

    pub fn required_policy(&self) -> RequiredPolicy {
        RequiredPolicy::from_flag(self.enforce_required)
    }

    pub fn declared_fields(&self, collection: &str) -> Option<&[String]> {
        self.collections
            .iter()
            .find(|c| c.name == collection)
            .map(|c| c.fields.as_slice())
    }

    fn environment_url(&self) -> Option<&str> {
        match self.environment() {
            Environment::Development => self.development_url.as_deref(),
            Environment::Production => self.production_url.as_deref(),
        }
    }
}

// ============================================================================
// Page Location
// ============================================================================

/// The parts of `window.location` used for the same-origin fallback
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLocation {
    pub protocol: String,
    pub hostname: String,
    pub port: String,
}

impl PageLocation {
    pub fn current() -> Option<Self> {
        let location = web_sys::window()?.location();
        Some(Self {
            protocol: location.protocol().ok()?,
            hostname: location.hostname().ok()?,
            port: location.port().unwrap_or_default(),
        })
    }

    pub fn is_local(&self) -> bool {
        matches!(self.hostname.as_str(), "localhost" | "127.0.0.1")
    }

    /// `protocol//hostname[:port]/api`
    pub fn api_url(&self) -> String {
        if self.port.is_empty() {
            format!("{}//{}/api", self.protocol, self.hostname)
        } else {
            format!("{}//{}:{}/api", self.protocol, self.hostname, self.port)
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Trim whitespace and trailing slashes; default to `https://` when no
/// scheme is given. Empty input yields `None`.
pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains("://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{}", trimmed))
    }
}

/// Pick the API root: explicit override, then the URL of the active
/// environment, then the page's own origin (non-local hosts only), then
/// [`LOCAL_API_URL`].
pub fn resolve_base_url(config: &RuntimeConfig, page: Option<&PageLocation>) -> String {
    let configured = config
        .api_base_url
        .as_deref()
        .and_then(normalize_base_url)
        .or_else(|| config.environment_url().and_then(normalize_base_url));
    if let Some(url) = configured {
        return url;
    }

    match page {
        Some(page) if !page.is_local() => page.api_url(),
        _ => LOCAL_API_URL.to_string(),
    }
}

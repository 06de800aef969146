use config::{Config, File};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

use crate::cli::Cli;

pub const DEFAULT_ID_FIELD: &str = "_id";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub api: ApiSettings,
    /// Declared field lists; collections not listed here get their fields
    /// inferred from their first record
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Which of the per-environment URLs the UI should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

/// How the UI reaches the collections backend
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiSettings {
    /// Explicit API root. Wins over the per-environment URLs.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub environment: Option<Environment>,
    #[serde(default)]
    pub development_url: Option<String>,
    #[serde(default)]
    pub production_url: Option<String>,
    /// Primary-key field of every record
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Reject saves that leave any field blank
    #[serde(default)]
    pub enforce_required: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            environment: None,
            development_url: None,
            production_url: None,
            id_field: default_id_field(),
            enforce_required: false,
        }
    }
}

fn default_id_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}

impl ApiSettings {
    /// Rewrite every configured URL into the form the UI publishes. A value
    /// without a scheme gets `https://`; blank values are dropped.
    pub fn normalize_urls(&mut self) {
        for url in [&mut self.base_url, &mut self.development_url, &mut self.production_url] {
            *url = url.as_deref().and_then(normalize_api_url);
        }
    }
}

/// Canonical form of a configured API root, or `None` when blank
pub fn normalize_api_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else if trimmed.contains("://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{}", trimmed))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CollectionConfig {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let config_path = &cli.config;
        let root = config_path
            .parent()
            .and_then(|p| p.to_str())
            .filter(|p| !p.is_empty())
            .unwrap_or(".");

        let mut settings = Self::load(File::from(config_path.clone()).required(false))?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);
        settings.api.normalize_urls();

        settings.load_external_configs(root)?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("admin");
        let mut settings = Self::load(File::from(config_path).required(false))?;
        settings.api.normalize_urls();

        settings.load_external_configs(root)?;
        settings.validate()?;

        Ok(settings)
    }

    fn load<S>(source: S) -> Result<Self, anyhow::Error>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let s = Config::builder()
            .add_source(source)
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("api.id_field", DEFAULT_ID_FIELD)?
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(url) = &cli.api_url {
            self.api.base_url = Some(url.clone());
        }
        if let Some(environment) = cli.environment {
            self.api.environment = Some(environment);
        }
    }

    fn load_external_configs(&mut self, root: &str) -> Result<(), anyhow::Error> {
        let collections = load_dir::<CollectionConfig>(&format!("{}/config/collections", root))?;
        if !collections.is_empty() {
            tracing::info!("Loaded {} collection schema file(s)", collections.len());
        }
        Self::merge_vec_by_key(&mut self.collections, collections, |c| c.name.clone());
        Ok(())
    }

    /// Merge `other` into `base`, replacing items with the same key. Later
    /// items win over earlier ones.
    fn merge_vec_by_key<T, K, F>(base: &mut Vec<T>, other: Vec<T>, key_fn: F)
    where
        K: Eq + std::hash::Hash,
        F: Fn(&T) -> K,
    {
        use std::collections::HashMap;

        let mut key_to_index: HashMap<K, usize> = HashMap::new();
        for (i, item) in base.iter().enumerate() {
            key_to_index.insert(key_fn(item), i);
        }

        for item in other {
            let key = key_fn(&item);
            if let Some(&idx) = key_to_index.get(&key) {
                base[idx] = item;
            } else {
                key_to_index.insert(key, base.len());
                base.push(item);
            }
        }
    }
}

/// One item per `*.json`, `*.yaml` or `*.yml` file in `path`, in file name
/// order. A missing directory yields nothing.
fn load_dir<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, anyhow::Error> {
    let pattern = format!("{}/*", path);
    let mut items = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) => {
                if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                    if matches!(ext, "json" | "yaml" | "yml") {
                        let content = std::fs::read_to_string(&path)?;
                        let item: T = if ext == "json" {
                            serde_json::from_str(&content)
                                .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?
                        } else {
                            serde_yaml::from_str(&content)
                                .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?
                        };
                        items.push(item);
                    }
                }
            }
            Err(e) => tracing::warn!("Failed to read glob entry: {}", e),
        }
    }
    Ok(items)
}

use clap::Parser;
use collection_admin::adapters::config_handler::ClientConfig;
use collection_admin::cli::Cli;
use collection_admin::config::{Environment, Settings};
use std::fs;
use tempfile::TempDir;

fn declared_fields<'a>(settings: &'a Settings, name: &str) -> Option<&'a [String]> {
    settings
        .collections
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.fields.as_slice())
}

#[test]
fn test_load_external_configs() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::create_dir_all(root.join("config/collections"))?;

    let admin_toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[api]
production_url = "https://data.example.com/api"

[[collections]]
name = "tasks"
fields = ["title"]

[[collections]]
name = "users"
fields = ["email", "name"]
"#;
    fs::write(root.join("admin.toml"), admin_toml)?;

    // Overrides the inline entry
    let tasks_json = r#"
{
    "name": "tasks",
    "fields": ["title", "dueDate", "comments"]
}
"#;
    fs::write(root.join("config/collections/tasks.json"), tasks_json)?;

    let orders_yaml = r#"
name: orders
fields:
  - customer
  - total
"#;
    fs::write(root.join("config/collections/orders.yaml"), orders_yaml)?;

    // Ignored: not a schema file
    fs::write(root.join("config/collections/README.md"), "# notes")?;

    let settings = Settings::from_root(root.to_str().unwrap())?;

    assert_eq!(settings.collections.len(), 3);
    assert_eq!(
        declared_fields(&settings, "tasks").unwrap(),
        ["title", "dueDate", "comments"]
    );
    assert_eq!(declared_fields(&settings, "users").unwrap(), ["email", "name"]);
    assert_eq!(declared_fields(&settings, "orders").unwrap(), ["customer", "total"]);
    assert_eq!(settings.api.production_url.as_deref(), Some("https://data.example.com/api"));
    assert_eq!(settings.api.id_field, "_id");

    Ok(())
}

#[test]
fn test_defaults_without_config_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;

    let settings = Settings::from_root(temp_dir.path().to_str().unwrap())?;

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.api.id_field, "_id");
    assert!(!settings.api.enforce_required);
    assert!(settings.collections.is_empty());

    Ok(())
}

#[test]
fn test_cli_overrides_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(
        &config_path,
        r#"
[server]
host = "0.0.0.0"
port = 3000

[api]
base_url = "https://old.example.com/api"
environment = "development"
"#,
    )?;

    let cli = Cli::parse_from([
        "collection-admin",
        "--config",
        config_path.to_str().unwrap(),
        "--port",
        "9000",
        "--api-url",
        "https://new.example.com/api",
        "--environment",
        "production",
    ]);
    let settings = Settings::new_with_cli(&cli)?;

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 9000);
    assert_eq!(settings.api.base_url.as_deref(), Some("https://new.example.com/api"));
    assert_eq!(settings.api.environment, Some(Environment::Production));

    Ok(())
}

#[test]
fn test_invalid_schema_file_is_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("config/collections"))?;
    fs::write(
        root.join("config/collections/users.yml"),
        "name: users\nfields:\n  - _id\n  - email\n",
    )?;

    let err = Settings::from_root(root.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Configuration validation failed"));
    assert!(err.to_string().contains("identifier"));

    Ok(())
}

#[test]
fn test_bare_host_is_published_with_scheme() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("admin.toml");
    fs::write(
        &config_path,
        r#"
[api]
production_url = "djrbserver.vercel.app"
development_url = "http://localhost:5000/api/"
"#,
    )?;

    let cli = Cli::parse_from(["collection-admin", "--config", config_path.to_str().unwrap()]);
    let settings = Settings::new_with_cli(&cli)?;

    assert_eq!(settings.api.production_url.as_deref(), Some("https://djrbserver.vercel.app"));
    assert_eq!(settings.api.development_url.as_deref(), Some("http://localhost:5000/api"));

    let published = ClientConfig::from(&settings);
    assert_eq!(published.production_url.as_deref(), Some("https://djrbserver.vercel.app"));

    Ok(())
}

#[test]
fn test_unsupported_scheme_is_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(
        temp_dir.path().join("admin.toml"),
        "[api]\nproduction_url = \"ftp://files.example.com\"\n",
    )?;

    let err = Settings::from_root(temp_dir.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("api.production_url"));

    Ok(())
}

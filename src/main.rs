use clap::Parser;
use collection_admin::adapters::health_handler::HealthHandler;
use collection_admin::cli::Cli;
use collection_admin::config::Settings;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting Collection Admin on {}:{}", host, port);
    match (&settings.api.base_url, settings.api.environment) {
        (Some(url), _) => info!("UI will use API at {}", url),
        (None, Some(env)) => info!("UI will use the {:?} API URL", env),
        (None, None) => info!("No API URL configured; UI falls back to its own origin"),
    }
    info!("{} collection schema(s) declared", settings.collections.len());

    let settings = Arc::new(settings);
    let health_handler = Arc::new(HealthHandler::new(settings.clone()));
    if !collection_admin::adapters::ui_handler::UIHandler::is_bundled() {
        warn!("UI bundle not found; run `trunk build --release` in ui/ before building the server");
    }

    let app = collection_admin::create_app(settings, health_handler);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

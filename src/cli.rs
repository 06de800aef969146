use clap::Parser;
use std::path::PathBuf;

use crate::config::Environment;

/// Collection Admin - browser admin panel for a collections REST API
#[derive(Parser, Debug, Clone)]
#[command(name = "collection-admin", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "ADMIN_CONFIG", default_value = "admin.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "ADMIN_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "ADMIN_PORT")]
    pub port: Option<u16>,

    /// API root handed to the UI as-is (e.g. "https://data.example.com/api")
    #[arg(long, env = "ADMIN_API_URL")]
    pub api_url: Option<String>,

    /// Selects which of the per-environment API URLs the UI uses
    #[arg(long, env = "ADMIN_ENV", value_enum)]
    pub environment: Option<Environment>,
}

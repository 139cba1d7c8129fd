//! Server bootstrap
//!
//! Loads configuration and runs the server; the binary's whole job.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use std::path::Path;
use tracing::{info, warn};

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

/// Run the server with configuration from `path` (or env-only defaults
/// when the file is absent)
pub async fn run_server(path: Option<&Path>) -> Result<()> {
    info!("Starting blockforge gateway");

    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    let config = if path.exists() {
        Config::from_file(path).await?
    } else {
        warn!(
            "Configuration file {:?} not found, using environment/defaults",
            path
        );
        Config::from_env()?
    };

    if config.provider.api_key.trim().is_empty() {
        warn!("No OpenAI API key configured; generation requests will fail until one is set");
    }

    let server = HttpServer::new(config)?;
    server.start().await
}

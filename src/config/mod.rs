//! Configuration management for the gateway
//!
//! This module handles loading and validation of all gateway configuration.
//! The [`Config`] struct is built once at startup (YAML file plus environment
//! overrides) and is read-only for the lifetime of the process; nothing reads
//! settings ambiently mid-request.

pub mod models;
pub mod validation;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// OpenAI provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Generation parameters (system prompt override, sampling)
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Job store and worker settings
    #[serde(default)]
    pub jobs: JobsConfig,
    /// Local media resolution for vision requests
    #[serde(default)]
    pub media: MediaConfig,
    /// Caller authentication
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        config.apply_env_overrides();
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build configuration from environment variables alone
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Config::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Environment variables win over file values
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("BLOCKFORGE_OPENAI_API_KEY") {
            self.provider.api_key = key;
        }
        if let Ok(base) = std::env::var("BLOCKFORGE_OPENAI_API_BASE") {
            self.provider.api_base = base;
        }
        if let Ok(model) = std::env::var("BLOCKFORGE_MODEL") {
            self.provider.model = model;
        }
        if let Ok(host) = std::env::var("BLOCKFORGE_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("BLOCKFORGE_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(token) = std::env::var("BLOCKFORGE_AUTH_TOKEN") {
            self.auth.token = Some(token);
        }
    }
}

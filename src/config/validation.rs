//! Configuration validation

use super::Config;
use crate::utils::error::{GatewayError, Result};

impl Config {
    /// Validate the loaded configuration
    ///
    /// An empty API key is allowed here so the server can boot for
    /// operators to probe; generation requests fail with a configuration
    /// error until a key is set.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(GatewayError::Config(
                "server.port must be non-zero".to_string(),
            ));
        }

        if self.provider.api_base.is_empty() {
            return Err(GatewayError::Config(
                "provider.api_base must not be empty".to_string(),
            ));
        }

        if self.provider.model.trim().is_empty() {
            return Err(GatewayError::Config(
                "provider.model must not be empty".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(GatewayError::Config(format!(
                "generation.temperature must be within 0.0..=2.0, got {}",
                self.generation.temperature
            )));
        }

        if let Some(top_p) = self.generation.top_p {
            if !(0.0..=1.0).contains(&top_p) {
                return Err(GatewayError::Config(format!(
                    "generation.top_p must be within 0.0..=1.0, got {}",
                    top_p
                )));
            }
        }

        if self.generation.max_tokens == 0 {
            return Err(GatewayError::Config(
                "generation.max_tokens must be positive".to_string(),
            ));
        }

        if self.jobs.ttl_secs == 0 {
            return Err(GatewayError::Config(
                "jobs.ttl_secs must be positive".to_string(),
            ));
        }

        // Upload mapping is all-or-nothing
        if self.media.upload_base_url.is_some() != self.media.upload_root.is_some() {
            return Err(GatewayError::Config(
                "media.upload_base_url and media.upload_root must be set together".to_string(),
            ));
        }

        Ok(())
    }
}

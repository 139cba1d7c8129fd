//! Outbound HTTP client
//!
//! POSTs the built request body to the selected endpoint with auth header
//! and a long timeout; generations can take minutes. Returns status and
//! raw body, never retries internally — retry policy lives in the job
//! runner.

use crate::config::ProviderConfig;
use crate::core::provider::error::ProviderError;
use crate::core::provider::request::Endpoint;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Raw provider answer: HTTP status plus unparsed body
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

/// Seam between the job runner and the network
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// POST a JSON body to an endpoint; transport failures become
    /// [`ProviderError::Network`]
    async fn post(
        &self,
        endpoint: Endpoint,
        body: &serde_json::Value,
    ) -> Result<RawResponse, ProviderError>;
}

/// Real client over reqwest
pub struct OpenAiHttpClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl OpenAiHttpClient {
    /// Build a client from provider configuration
    pub fn new(provider: &ProviderConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(provider.request_timeout_secs))
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_base: provider.api_base.trim_end_matches('/').to_string(),
            api_key: provider.api_key.clone(),
        })
    }

    fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.api_base, endpoint.path())
    }
}

#[async_trait]
impl ProviderClient for OpenAiHttpClient {
    async fn post(
        &self,
        endpoint: Endpoint,
        body: &serde_json::Value,
    ) -> Result<RawResponse, ProviderError> {
        let url = self.url_for(endpoint);
        debug!(%url, "POSTing provider request");

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

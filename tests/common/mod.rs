//! Common test utilities for blockforge

pub mod clients;

use blockforge::config::Config;
use blockforge::core::jobs::{JobRunner, JobStore};
use blockforge::core::provider::{OpenAiHttpClient, ProviderClient};
use std::sync::Arc;
use std::time::Duration;

/// Configuration pointed at a test provider base URL
pub fn test_config(api_base: &str) -> Config {
    let mut config = Config::default();
    config.provider.api_key = "sk-test".to_string();
    config.provider.api_base = api_base.trim_end_matches('/').to_string();
    config.provider.request_timeout_secs = 5;
    config
}

/// Runner over an arbitrary provider client
pub fn runner_with_client(config: Config, client: Arc<dyn ProviderClient>) -> Arc<JobRunner> {
    let store = Arc::new(JobStore::new(Duration::from_secs(60)));
    Arc::new(JobRunner::new(Arc::new(config), store, client))
}

/// Runner whose HTTP client points at a wiremock server
pub fn runner_against(config: Config) -> Arc<JobRunner> {
    let client = OpenAiHttpClient::new(&config.provider).expect("client builds");
    runner_with_client(config, Arc::new(client))
}

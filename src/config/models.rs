//! Configuration model types

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads (defaults to actix's own choice)
    pub workers: Option<usize>,
    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the server bind address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Whether CORS headers are emitted
    #[serde(default)]
    pub enabled: bool,
    /// Allowed origins; `*` allows any
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_origins: Vec::new(),
        }
    }
}

impl CorsConfig {
    /// Check if any origin is allowed
    pub fn allows_all_origins(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Which OpenAI API surface to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    /// Responses for the reasoning/text family, Chat Completions otherwise
    #[default]
    Auto,
    /// Force the Chat Completions endpoint
    Chat,
    /// Force the Responses endpoint
    Responses,
}

/// OpenAI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key; empty means unconfigured
    #[serde(default)]
    pub api_key: String,
    /// API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// API surface selection
    #[serde(default)]
    pub api_mode: ApiMode,
    /// Outbound request timeout in seconds. Generations can take minutes,
    /// so this defaults far above interactive timeouts.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_api_base(),
            model: default_model(),
            api_mode: ApiMode::default(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// System prompt override; empty falls back to the built-in guardrail
    #[serde(default)]
    pub system_prompt: String,
    /// Sampling temperature (ignored for temperature-locked models)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Nucleus sampling parameter
    pub top_p: Option<f32>,
    /// Reply length bound, named per model family at request time
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Frequency penalty
    pub frequency_penalty: Option<f32>,
    /// Presence penalty
    pub presence_penalty: Option<f32>,
    /// Stop sequences
    #[serde(default)]
    pub stop_sequences: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            system_prompt: String::new(),
            temperature: default_temperature(),
            top_p: None,
            max_tokens: default_max_tokens(),
            frequency_penalty: None,
            presence_penalty: None,
            stop_sequences: Vec::new(),
        }
    }
}

/// Job store and worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsConfig {
    /// Retention for job records, seconds. Expired records read as absent.
    #[serde(default = "default_job_ttl")]
    pub ttl_secs: u64,
    /// Interval between expired-entry sweeps, seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_job_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

/// Local media resolution for vision requests
///
/// Images whose URL starts with `upload_base_url` are read from the
/// corresponding path under `upload_root` and inlined as base64 data URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Public base URL of the upload directory
    pub upload_base_url: Option<String>,
    /// Filesystem root of the upload directory
    pub upload_root: Option<std::path::PathBuf>,
    /// Inline size cap in bytes
    #[serde(default = "default_max_inline_bytes")]
    pub max_inline_bytes: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            upload_base_url: None,
            upload_root: None,
            max_inline_bytes: default_max_inline_bytes(),
        }
    }
}

/// Caller authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer token required on /v1 routes; `None` leaves them open
    pub token: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_request_timeout() -> u64 {
    300
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_job_ttl() -> u64 {
    3600
}

fn default_sweep_interval() -> u64 {
    300
}

fn default_max_inline_bytes() -> u64 {
    20 * 1024 * 1024
}

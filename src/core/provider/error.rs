//! Provider error taxonomy
//!
//! Non-200 provider answers are classified by message content into the
//! categories callers can act on. Nothing here is retried automatically;
//! the only retry in the system is the empty-output retry in the job
//! runner.

use thiserror::Error;

/// Bound on the raw-response snapshot carried by empty-response errors
pub const SNAPSHOT_CHARS: usize = 2000;

/// Classified provider failure
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// No API key configured; fatal to the request
    #[error("OpenAI API key is not configured")]
    MissingApiKey,

    /// Transport failure reaching the provider
    #[error("Failed to connect to OpenAI API: {0}")]
    Network(String),

    /// HTTP 429 without a quota signature
    #[error("OpenAI rate limit reached: {0}")]
    RateLimited(String),

    /// Quota exhausted or billing problem
    #[error("OpenAI quota or billing error: {0}")]
    QuotaExceeded(String),

    /// Requested model does not exist or is not accessible
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Any other non-200 answer
    #[error("OpenAI API error: {0}")]
    Api(String),

    /// HTTP 200 with a blank generation after all retries
    #[error("OpenAI returned an empty response")]
    EmptyResponse {
        /// Truncated raw body for diagnostics
        snapshot: String,
    },

    /// Response body did not parse as expected
    #[error("Failed to parse OpenAI response: {0}")]
    ResponseParsing(String),
}

impl ProviderError {
    /// Stable machine-readable code for the classification
    pub fn code(&self) -> &'static str {
        match self {
            ProviderError::MissingApiKey => "no_api_key",
            ProviderError::Network(_) => "network_error",
            ProviderError::RateLimited(_) => "rate_limited",
            ProviderError::QuotaExceeded(_) => "quota_exceeded",
            ProviderError::ModelUnavailable(_) => "model_unavailable",
            ProviderError::Api(_) => "provider_error",
            ProviderError::EmptyResponse { .. } => "empty_response",
            ProviderError::ResponseParsing(_) => "response_parsing",
        }
    }
}

/// Classify a non-200 provider answer
///
/// The provider's error envelope is `{"error":{"message":...}}`; when the
/// body is not JSON the raw text is classified instead.
pub fn classify_api_error(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                truncate_chars(body, SNAPSHOT_CHARS)
            }
        });

    let lowered = message.to_ascii_lowercase();

    if status == 429 || lowered.contains("rate limit") {
        if lowered.contains("quota") || lowered.contains("billing") {
            return ProviderError::QuotaExceeded(message);
        }
        return ProviderError::RateLimited(message);
    }

    if lowered.contains("insufficient_quota")
        || lowered.contains("quota")
        || lowered.contains("billing")
    {
        return ProviderError::QuotaExceeded(message);
    }

    if status == 404
        || (lowered.contains("model")
            && (lowered.contains("does not exist") || lowered.contains("not found")))
    {
        return ProviderError::ModelUnavailable(message);
    }

    ProviderError::Api(message)
}

/// Build the empty-response error with a bounded snapshot of the raw body
pub fn empty_response_error(raw_body: &str) -> ProviderError {
    ProviderError::EmptyResponse {
        snapshot: truncate_chars(raw_body, SNAPSHOT_CHARS),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

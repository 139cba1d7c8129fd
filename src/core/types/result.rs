//! Generation result types

use serde::{Deserialize, Serialize};

/// Which OpenAI API surface served a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFamily {
    /// `/chat/completions`
    Chat,
    /// `/responses`
    Responses,
}

impl ApiFamily {
    /// Wire name, as reported in results
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiFamily::Chat => "chat",
            ApiFamily::Responses => "responses",
        }
    }
}

/// Token accounting as reported by the provider
///
/// Field names differ between the two API families; aliases fold the
/// Responses naming into the classic one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt
    #[serde(alias = "input_tokens")]
    pub prompt_tokens: Option<u32>,
    /// Tokens in the generated reply
    #[serde(alias = "output_tokens")]
    pub completion_tokens: Option<u32>,
    /// Total tokens billed
    pub total_tokens: Option<u32>,
}

/// Outcome of one generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Whether generation produced usable output
    pub success: bool,
    /// Normalized markup or plain code; empty on failure
    pub code: String,
    /// Model that served the request
    pub model_used: String,
    /// API surface that served the request
    pub api_family: ApiFamily,
    /// Token accounting, when the provider reported it
    pub usage: Option<Usage>,
    /// Classified error message on failure
    pub error_message: Option<String>,
    /// Stable classification code on failure (e.g. `rate_limited`)
    pub error_code: Option<String>,
}

impl GenerationResult {
    /// Build a success result
    pub fn ok(code: String, model: &str, family: ApiFamily, usage: Option<Usage>) -> Self {
        Self {
            success: true,
            code,
            model_used: model.to_string(),
            api_family: family,
            usage,
            error_message: None,
            error_code: None,
        }
    }

    /// Build a failure result carrying a classified message
    pub fn failed(message: String, model: &str, family: ApiFamily) -> Self {
        Self {
            success: false,
            code: String::new(),
            model_used: model.to_string(),
            api_family: family,
            usage: None,
            error_message: Some(message),
            error_code: None,
        }
    }

    /// Failure result with the stable classification code attached
    pub fn failed_with_code(
        error_code: &str,
        message: String,
        model: &str,
        family: ApiFamily,
    ) -> Self {
        let mut result = Self::failed(message, model, family);
        result.error_code = Some(error_code.to_string());
        result
    }
}

//! Model capability profiles
//!
//! A single lookup table replaces per-call-site model string matching.
//! Every model identifier the gateway accepts resolves to a profile;
//! unknown identifiers get the most conservative one (chat family, classic
//! token parameter, temperature allowed, no vision).

use crate::core::types::ApiFamily;

/// Name of the reply-length field for a chat-family request
///
/// The Responses endpoint always uses `max_output_tokens`, regardless of
/// what the profile says for chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLimitParam {
    /// Classic `max_tokens`
    MaxTokens,
    /// `max_completion_tokens`, used by gpt-4o/gpt-4-turbo/gpt-5 on chat
    MaxCompletionTokens,
}

impl TokenLimitParam {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenLimitParam::MaxTokens => "max_tokens",
            TokenLimitParam::MaxCompletionTokens => "max_completion_tokens",
        }
    }
}

/// Static capability profile for one model identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelProfile {
    /// Model accepts image parts in chat messages
    pub supports_vision: bool,
    /// Preferred API surface
    pub api_family: ApiFamily,
    /// Reply-length field name on the chat surface
    pub token_limit_param: TokenLimitParam,
    /// Model ignores or rejects a custom temperature
    pub temperature_locked: bool,
}

impl ModelProfile {
    /// The fallback profile for unknown identifiers
    pub const CONSERVATIVE: ModelProfile = ModelProfile {
        supports_vision: false,
        api_family: ApiFamily::Chat,
        token_limit_param: TokenLimitParam::MaxTokens,
        temperature_locked: false,
    };
}

/// Resolve the profile for a model identifier
pub fn profile_for(model: &str) -> ModelProfile {
    match model {
        "gpt-4o" | "gpt-4o-mini" => ModelProfile {
            supports_vision: true,
            api_family: ApiFamily::Chat,
            token_limit_param: TokenLimitParam::MaxCompletionTokens,
            temperature_locked: true,
        },
        "gpt-4-vision-preview" => ModelProfile {
            supports_vision: true,
            api_family: ApiFamily::Chat,
            token_limit_param: TokenLimitParam::MaxTokens,
            temperature_locked: false,
        },
        "gpt-4-turbo" | "gpt-4-turbo-preview" => ModelProfile {
            supports_vision: false,
            api_family: ApiFamily::Chat,
            token_limit_param: TokenLimitParam::MaxCompletionTokens,
            temperature_locked: false,
        },
        // Reasoning/text family: Responses endpoint, no official multimodal
        // path here, temperature fixed by the provider.
        "gpt-5" | "gpt-5-mini" | "gpt-5-nano" => ModelProfile {
            supports_vision: false,
            api_family: ApiFamily::Responses,
            token_limit_param: TokenLimitParam::MaxCompletionTokens,
            temperature_locked: true,
        },
        "gpt-4" | "gpt-3.5-turbo" => ModelProfile::CONSERVATIVE,
        _ => ModelProfile::CONSERVATIVE,
    }
}

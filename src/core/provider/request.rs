//! Provider request building
//!
//! Shapes the JSON payload for the selected API family: message roles,
//! image parts, the token-limit field name, and temperature eligibility
//! all come from the model profile and the configured API mode.

use crate::config::{ApiMode, GenerationConfig, MediaConfig};
use crate::core::images::resolve_image;
use crate::core::profile::ModelProfile;
use crate::core::prompt::ComposedPrompt;
use crate::core::types::{ApiFamily, GenerationRequest};
use serde_json::{Value, json};
use tracing::debug;

/// Provider endpoint selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/chat/completions`
    ChatCompletions,
    /// `/responses`
    Responses,
}

impl Endpoint {
    /// Path relative to the API base
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ChatCompletions => "/chat/completions",
            Endpoint::Responses => "/responses",
        }
    }
}

/// A fully shaped provider request
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// Target endpoint
    pub endpoint: Endpoint,
    /// Family the body is shaped for
    pub family: ApiFamily,
    /// JSON body
    pub body: Value,
}

/// Choose the API family for a request
///
/// The configured mode wins outright; `auto` follows the profile. Images
/// force chat either way, because the reasoning/text family is not used
/// multimodally here.
pub fn select_family(profile: &ModelProfile, api_mode: ApiMode, has_images: bool) -> ApiFamily {
    let family = match api_mode {
        ApiMode::Chat => ApiFamily::Chat,
        ApiMode::Responses => ApiFamily::Responses,
        ApiMode::Auto => profile.api_family,
    };

    if family == ApiFamily::Responses && has_images {
        ApiFamily::Chat
    } else {
        family
    }
}

/// Build the provider request body and endpoint for one generation
pub fn build_provider_request(
    model: &str,
    prompt: &ComposedPrompt,
    request: &GenerationRequest,
    generation: &GenerationConfig,
    media: &MediaConfig,
    api_mode: ApiMode,
    profile: &ModelProfile,
) -> ProviderRequest {
    let family = select_family(profile, api_mode, !request.images.is_empty());
    debug!(
        model,
        family = family.as_str(),
        prompt_bytes = prompt.byte_len,
        "Building provider request"
    );

    match family {
        ApiFamily::Responses => build_responses_request(model, prompt, request, generation),
        ApiFamily::Chat => {
            if profile.supports_vision && !request.images.is_empty() {
                build_vision_chat_request(model, prompt, request, generation, media, profile)
            } else {
                build_text_chat_request(model, prompt, request, generation, profile)
            }
        }
    }
}

/// Two-message chat request: system + user
fn build_text_chat_request(
    model: &str,
    prompt: &ComposedPrompt,
    request: &GenerationRequest,
    generation: &GenerationConfig,
    profile: &ModelProfile,
) -> ProviderRequest {
    let mut body = json!({
        "model": model,
        "messages": [
            { "role": "system", "content": prompt.system },
            { "role": "user", "content": request.prompt },
        ],
    });
    body[profile.token_limit_param.as_str()] = json!(generation.max_tokens);
    apply_sampling(&mut body, generation, profile);

    ProviderRequest {
        endpoint: Endpoint::ChatCompletions,
        family: ApiFamily::Chat,
        body,
    }
}

/// Single user message whose content is a text part followed by one image
/// part per resolvable image
fn build_vision_chat_request(
    model: &str,
    prompt: &ComposedPrompt,
    request: &GenerationRequest,
    generation: &GenerationConfig,
    media: &MediaConfig,
    profile: &ModelProfile,
) -> ProviderRequest {
    let mut content = vec![json!({
        "type": "text",
        "text": combined_prompt(prompt, request),
    })];

    for image in &request.images {
        if let Some(resolved) = resolve_image(image, media) {
            content.push(json!({
                "type": "image_url",
                "image_url": { "url": resolved.as_url(), "detail": "auto" },
            }));
        }
    }

    let mut body = json!({
        "model": model,
        "messages": [ { "role": "user", "content": content } ],
    });
    body[profile.token_limit_param.as_str()] = json!(generation.max_tokens);
    apply_sampling(&mut body, generation, profile);

    ProviderRequest {
        endpoint: Endpoint::ChatCompletions,
        family: ApiFamily::Chat,
        body,
    }
}

/// Responses-API request: one input item, distinct token-limit field, and
/// an explicit text output format
fn build_responses_request(
    model: &str,
    prompt: &ComposedPrompt,
    request: &GenerationRequest,
    generation: &GenerationConfig,
) -> ProviderRequest {
    // Images never reach this path (select_family forces chat), but a
    // resolvable image list would serialize as input_image parts.
    let content = vec![json!({
        "type": "input_text",
        "text": combined_prompt(prompt, request),
    })];

    let body = json!({
        "model": model,
        "input": [ { "role": "user", "content": content } ],
        "max_output_tokens": generation.max_tokens,
        "text": { "format": { "type": "text" } },
    });

    ProviderRequest {
        endpoint: Endpoint::Responses,
        family: ApiFamily::Responses,
        body,
    }
}

fn combined_prompt(prompt: &ComposedPrompt, request: &GenerationRequest) -> String {
    format!("{}\n\nRequest: \"{}\"", prompt.system, request.prompt)
}

/// Temperature only when the model honors it; the remaining sampling
/// parameters ride along whenever configured
fn apply_sampling(body: &mut Value, generation: &GenerationConfig, profile: &ModelProfile) {
    if !profile.temperature_locked {
        body["temperature"] = json!(generation.temperature);
    }
    if let Some(top_p) = generation.top_p {
        body["top_p"] = json!(top_p);
    }
    if let Some(frequency_penalty) = generation.frequency_penalty {
        body["frequency_penalty"] = json!(frequency_penalty);
    }
    if let Some(presence_penalty) = generation.presence_penalty {
        body["presence_penalty"] = json!(presence_penalty);
    }
    if !generation.stop_sequences.is_empty() {
        body["stop"] = json!(generation.stop_sequences);
    }
}

//! Provider response extraction
//!
//! Pulls the generated text and token accounting out of either response
//! shape. Extraction is lenient: a missing field yields an empty string,
//! which the runner's empty-output policy then handles.

use crate::core::types::{ApiFamily, Usage};
use serde_json::Value;

/// Text and usage extracted from a provider response body
#[derive(Debug, Clone, Default)]
pub struct Extracted {
    /// Generated text; empty when the provider produced none
    pub content: String,
    /// Token accounting, when present
    pub usage: Option<Usage>,
}

/// Extract the generated text and usage for the given family
pub fn extract_generated_text(family: ApiFamily, body: &Value) -> Extracted {
    let content = match family {
        ApiFamily::Chat => chat_content(body),
        ApiFamily::Responses => responses_content(body),
    };

    let usage = body
        .get("usage")
        .and_then(|u| serde_json::from_value::<Usage>(u.clone()).ok());

    Extracted {
        content: content.trim().to_string(),
        usage,
    }
}

/// `choices[0].message.content`
fn chat_content(body: &Value) -> String {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Concatenated `output_text` parts of every `message` output item
fn responses_content(body: &Value) -> String {
    // Some SDK dumps carry a convenience field; prefer it when present.
    if let Some(text) = body.get("output_text").and_then(Value::as_str) {
        return text.to_string();
    }

    let Some(output) = body.get("output").and_then(Value::as_array) else {
        return String::new();
    };

    let mut pieces = Vec::new();
    for item in output {
        if item.get("type").and_then(Value::as_str) != Some("message") {
            continue;
        }
        let Some(content) = item.get("content").and_then(Value::as_array) else {
            continue;
        };
        for part in content {
            if part.get("type").and_then(Value::as_str) == Some("output_text") {
                if let Some(text) = part.get("text").and_then(Value::as_str) {
                    pieces.push(text.to_string());
                }
            }
        }
    }
    pieces.join("")
}

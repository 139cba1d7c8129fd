//! Incoming generation request types

use serde::{Deserialize, Serialize};

/// A single generation request as submitted by a caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Natural-language prompt; must be non-empty
    pub prompt: String,
    /// Image references, in caller order
    #[serde(default)]
    pub images: Vec<ImageRef>,
    /// Queue the job instead of generating inline
    #[serde(rename = "async", default = "default_async")]
    pub async_mode: bool,
}

impl GenerationRequest {
    /// Build a synchronous request with no images
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            images: Vec::new(),
            async_mode: false,
        }
    }
}

fn default_async() -> bool {
    true
}

/// Reference to an image attached to a request
///
/// Only `url` is load-bearing; the rest is metadata forwarded to the model
/// in the prompt's image manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageRef {
    /// Image URL, remote or under the configured upload root
    #[serde(default)]
    pub url: String,
    /// Alt text
    #[serde(default)]
    pub alt: String,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Original filename
    #[serde(default)]
    pub filename: String,
}

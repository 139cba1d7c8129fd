//! Image resolution for vision requests
//!
//! Remote image URLs pass through to the provider untouched. Local images
//! (host heuristics or upload-root prefix) are read from disk and inlined
//! as base64 data URLs, with a size cap. An image that cannot be resolved
//! is skipped rather than failing the request.

use crate::config::MediaConfig;
use crate::core::types::ImageRef;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::net::IpAddr;
use std::path::Path;
use tracing::{debug, warn};

/// Host suffixes that mark a URL as local/development
const LOCAL_SUFFIXES: &[&str] = &[
    ".local",
    ".test",
    ".example",
    ".invalid",
    ".localhost",
    ".dev",
    ".loca.lt",
    ".ngrok.io",
];

/// An image resolved into a form the provider accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImage {
    /// Publicly reachable URL, passed through
    Remote(String),
    /// `data:<mime>;base64,` payload for a local file
    Inline(String),
}

impl ResolvedImage {
    /// The URL string to place in the request body
    pub fn as_url(&self) -> &str {
        match self {
            ResolvedImage::Remote(url) => url,
            ResolvedImage::Inline(data_url) => data_url,
        }
    }
}

/// Resolve one image reference, or `None` if it is unusable
pub fn resolve_image(image: &ImageRef, media: &MediaConfig) -> Option<ResolvedImage> {
    if image.url.is_empty() {
        return None;
    }

    if is_local_url(&image.url) {
        match inline_local_image(&image.url, media) {
            Some(data_url) => Some(ResolvedImage::Inline(data_url)),
            None => {
                warn!(url = %image.url, "Failed to inline local image, skipping");
                None
            }
        }
    } else {
        Some(ResolvedImage::Remote(image.url.clone()))
    }
}

/// Check whether a URL points at a local/development host
pub fn is_local_url(raw: &str) -> bool {
    let Ok(parsed) = url::Url::parse(raw) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };

    if host == "localhost" {
        return true;
    }

    if let Ok(ip) = host.parse::<IpAddr>() {
        return match ip {
            IpAddr::V4(v4) => {
                v4.is_loopback() || v4.is_private() || v4.is_link_local() || v4.is_unspecified()
            }
            IpAddr::V6(v6) => v6.is_loopback() || v6.is_unspecified(),
        };
    }

    LOCAL_SUFFIXES
        .iter()
        .any(|suffix| host.ends_with(suffix) || host == suffix.trim_start_matches('.'))
}

/// Map a local URL beneath the upload base to a data URL
///
/// A file that resolves outside the upload root is not embeddable and
/// yields `None`.
fn inline_local_image(image_url: &str, media: &MediaConfig) -> Option<String> {
    let base_url = media.upload_base_url.as_deref()?;
    let base_dir = media.upload_root.as_deref()?;

    let relative = image_url.strip_prefix(base_url)?;
    let relative = relative.trim_start_matches('/');
    let file_path = base_dir.join(relative);

    // Canonicalize to defeat `..` traversal out of the upload root
    let canonical = file_path.canonicalize().ok()?;
    let canonical_root = base_dir.canonicalize().ok()?;
    if !canonical.starts_with(&canonical_root) {
        warn!(path = %canonical.display(), "Image resolves outside the upload root, skipping");
        return None;
    }

    let metadata = std::fs::metadata(&canonical).ok()?;
    if metadata.len() > media.max_inline_bytes {
        warn!(
            size = metadata.len(),
            cap = media.max_inline_bytes,
            "Image too large to inline, skipping"
        );
        return None;
    }

    let bytes = std::fs::read(&canonical).ok()?;
    let mime = mime_for_path(&canonical);
    debug!(path = %canonical.display(), mime, "Inlining local image");
    Some(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
}

fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "image/jpeg",
    }
}

//! Prompt composition
//!
//! Assembles the final system prompt from the configured override (or the
//! built-in guardrail), the vision addendum, and the image manifest. Pure
//! function of its inputs; no side effects.

use crate::config::GenerationConfig;
use crate::core::profile::ModelProfile;
use crate::core::types::GenerationRequest;

/// Built-in guardrail prompt used when no override is configured
///
/// Demands raw code / valid block markup only, and carries the exact block
/// forms the editor validates against.
const DEFAULT_GUARDRAIL: &str = "You are an expert JavaScript, HTML, and WordPress block editor \
programmer. Write only the raw code for the following request. Do not include any explanation, \
markdown formatting (like ```js or ```html), or any text other than the code itself. Your entire \
response should be executable in a browser or valid WordPress block markup.\n\
\n\
For WordPress block requests, you MUST use the exact block format that WordPress expects:\n\
CRITICAL RULES:\n\
1. Each block comment MUST be on its own line with NO trailing spaces\n\
2. Block names use only lowercase and hyphens (wp:heading, wp:paragraph, wp:group)\n\
3. HTML tags must match the block type exactly (h2 for heading level 2, p for paragraph)\n\
4. Attributes must be valid JSON: {\"level\":2} not {level:2}\n\
5. Include proper WordPress CSS classes on HTML elements\n\
\n\
EXACT FORMATS:\n\
- Heading: <!-- wp:heading {\"level\":2} -->\n<h2 class=\"wp-block-heading\">Text</h2>\n<!-- /wp:heading -->\n\
- Paragraph: <!-- wp:paragraph -->\n<p>Text</p>\n<!-- /wp:paragraph -->\n\
- Button: <!-- wp:buttons -->\n<div class=\"wp-block-buttons\"><!-- wp:button -->\n<div class=\"wp-block-button\"><a class=\"wp-block-button__link wp-element-button\">Text</a></div>\n<!-- /wp:button --></div>\n<!-- /wp:buttons -->\n\
- Group: <!-- wp:group -->\n<div class=\"wp-block-group\">\n<!-- wp:paragraph -->\n<p>Content</p>\n<!-- /wp:paragraph -->\n</div>\n<!-- /wp:group -->\n\
- Cover: <!-- wp:cover {\"dimRatio\":50} -->\n<div class=\"wp-block-cover\"><span aria-hidden=\"true\" class=\"wp-block-cover__background has-background-dim\"></span><div class=\"wp-block-cover__inner-container\">\ncontent\n</div></div>\n<!-- /wp:cover -->\n\
- Image: <!-- wp:image {\"id\":123,\"sizeSlug\":\"large\",\"linkDestination\":\"none\"} -->\n<figure class=\"wp-block-image size-large\"><img src=\"URL\" alt=\"Alt text\" class=\"wp-image-123\"/></figure>\n<!-- /wp:image -->\n\
- Gallery: <!-- wp:gallery {\"linkTo\":\"none\"} -->\n<figure class=\"wp-block-gallery has-nested-images\">\n<!-- wp:image {\"id\":1} -->\n<figure class=\"wp-block-image\"><img src=\"URL1\" alt=\"\" class=\"wp-image-1\"/></figure>\n<!-- /wp:image -->\n</figure>\n<!-- /wp:gallery -->";

/// Addendum appended when the model can see the attached images
const VISION_ADDENDUM: &str = "You can see and analyze the content of the images provided. When \
asked to extract text or describe image content, create appropriate WordPress blocks with that \
content.";

/// Instruction appended after the image manifest
const IMAGE_USAGE_NOTE: &str = "When generating WordPress blocks, use the provided images in \
appropriate blocks like wp:image, wp:cover (with the url attribute), or wp:media-text. Use the \
exact URLs provided.";

/// Length of the observability preview, in characters
const PREVIEW_CHARS: usize = 1200;

/// A composed system prompt plus observability metadata
#[derive(Debug, Clone)]
pub struct ComposedPrompt {
    /// Final system prompt text
    pub system: String,
    /// Byte length of `system`
    pub byte_len: usize,
    /// Bounded preview for logging
    pub preview: String,
}

/// Compose the system prompt for a request
///
/// The configured override replaces the base text entirely; the vision
/// addendum and image manifest are always appended rather than replacing
/// it, so user customization survives.
pub fn compose_system_prompt(
    request: &GenerationRequest,
    generation: &GenerationConfig,
    profile: &ModelProfile,
) -> ComposedPrompt {
    let mut system = if generation.system_prompt.trim().is_empty() {
        DEFAULT_GUARDRAIL.to_string()
    } else {
        generation.system_prompt.clone()
    };

    if profile.supports_vision && !request.images.is_empty() {
        system.push_str("\n\n");
        system.push_str(VISION_ADDENDUM);
    }

    if !request.images.is_empty() {
        system.push_str(&image_manifest(request));
        system.push_str("\n\n");
        system.push_str(IMAGE_USAGE_NOTE);
    }

    let byte_len = system.len();
    let preview = bounded_preview(&system, PREVIEW_CHARS);

    ComposedPrompt {
        system,
        byte_len,
        preview,
    }
}

/// Textual manifest of image metadata, so non-vision models can still
/// reference images by URL in generated markup
fn image_manifest(request: &GenerationRequest) -> String {
    let mut manifest = String::from("\n\nImages provided in the request:");
    for (index, image) in request.images.iter().enumerate() {
        manifest.push_str(&format!("\n\nImage {}:", index + 1));
        if !image.title.is_empty() {
            manifest.push_str(&format!("\n- Title: {}", image.title));
        }
        if !image.alt.is_empty() {
            manifest.push_str(&format!("\n- Alt text: {}", image.alt));
        }
        if !image.filename.is_empty() {
            manifest.push_str(&format!("\n- Filename: {}", image.filename));
        }
        if !image.url.is_empty() {
            manifest.push_str(&format!("\n- URL: {}", image.url));
        }
    }
    manifest
}

fn bounded_preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}

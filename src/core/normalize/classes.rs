//! Block class-list patching
//!
//! The editor rejects heading and button markup that is missing the base
//! classes its serializer always emits, and colored buttons additionally
//! need their modifier classes. Models get this wrong constantly, so the
//! two known cases are patched here before the block round trip.

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_AFTER_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)(<!--\s*wp:heading(?:\s+\{.*?\})?\s*-->\s*)(<h[1-6][^>]*>)")
        .expect("valid regex")
});

static BUTTON_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<(?:a|button)\b[^>]*class="[^"]*wp-block-button__link[^"]*"[^>]*>"#)
        .expect("valid regex")
});

static CLASS_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"class="([^"]*)""#).expect("valid regex"));

static STYLE_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"style="([^"]*)""#).expect("valid regex"));

static TEXT_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|;)\s*color\s*:").expect("valid regex"));

/// Patch class lists for the two known block types
pub fn patch_block_classes(markup: &str) -> String {
    let with_headings = HEADING_AFTER_COMMENT.replace_all(markup, |caps: &regex::Captures<'_>| {
        format!("{}{}", &caps[1], ensure_class(&caps[2], "wp-block-heading"))
    });

    BUTTON_LINK
        .replace_all(&with_headings, |caps: &regex::Captures<'_>| {
            patch_button_tag(&caps[0])
        })
        .into_owned()
}

/// Base class plus the modifiers implied by the inline style
fn patch_button_tag(tag: &str) -> String {
    let mut patched = ensure_class(tag, "wp-element-button");

    if let Some(style) = STYLE_ATTR.captures(tag).map(|c| c[1].to_string()) {
        if style.contains("background") {
            patched = ensure_class(&patched, "has-background");
        }
        if TEXT_COLOR.is_match(&style) {
            patched = ensure_class(&patched, "has-text-color");
        }
        if style.contains("font-size") {
            patched = ensure_class(&patched, "has-custom-font-size");
        }
    }

    patched
}

/// Add a class to a tag's class attribute, creating the attribute if the
/// tag has none
fn ensure_class(tag: &str, class: &str) -> String {
    if let Some(caps) = CLASS_ATTR.captures(tag) {
        let existing = &caps[1];
        if existing.split_whitespace().any(|c| c == class) {
            return tag.to_string();
        }
        let replacement = if existing.is_empty() {
            format!(r#"class="{}""#, class)
        } else {
            format!(r#"class="{} {}""#, existing, class)
        };
        CLASS_ATTR.replace(tag, replacement.as_str()).into_owned()
    } else if let Some(rest) = tag.strip_prefix('<') {
        // Insert after the tag name
        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '>')
            .unwrap_or(rest.len());
        let (name, tail) = rest.split_at(name_end);
        format!(r#"<{} class="{}"{}"#, name, class, tail)
    } else {
        tag.to_string()
    }
}

//! Inline style normalization
//!
//! Rewrites every double-quoted `style="..."` attribute: drops placeholder
//! values the models like to emit, expands `padding`/`margin` shorthand
//! into per-side longhand, and re-emits declarations in a stable preferred
//! order followed by the rest in original order.

use once_cell::sync::Lazy;
use regex::Regex;

static STYLE_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"style="([^"]*)""#).expect("valid regex"));

/// Longhand properties emitted first, in this order
const PREFERRED_ORDER: &[&str] = &[
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
];

/// Rewrite every inline style attribute in the markup
pub fn rewrite_inline_styles(markup: &str) -> String {
    STYLE_ATTR
        .replace_all(markup, |caps: &regex::Captures<'_>| {
            let normalized = normalize_declarations(&caps[1]);
            format!(r#"style="{}""#, normalized)
        })
        .into_owned()
}

/// Normalize one declaration list
fn normalize_declarations(style: &str) -> String {
    let mut declarations: Vec<(String, String)> = Vec::new();

    for declaration in style.split(';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let value = value.trim().to_string();

        if is_placeholder_value(&value) {
            continue;
        }

        match expand_box_shorthand(&property, &value) {
            Some(sides) => declarations.extend(sides),
            None => declarations.push((property, value)),
        }
    }

    // Preferred longhands first, everything else keeps original order.
    let mut ordered: Vec<(String, String)> = Vec::with_capacity(declarations.len());
    for preferred in PREFERRED_ORDER {
        if let Some(position) = declarations.iter().position(|(p, _)| p == preferred) {
            ordered.push(declarations.remove(position));
        }
    }
    ordered.extend(declarations);

    let mut out = String::new();
    for (property, value) in &ordered {
        out.push_str(property);
        out.push(':');
        out.push_str(value);
        out.push(';');
    }
    out
}

/// Tokens models emit when they have nothing real to say
fn is_placeholder_value(value: &str) -> bool {
    value.is_empty()
        || value.eq_ignore_ascii_case("undefined")
        || value.eq_ignore_ascii_case("null")
        || value.contains("{{")
}

/// Expand `padding`/`margin` 1–4 value shorthand into per-side longhand
///
/// Returns `None` for properties that are not box shorthand, and for
/// shorthand values this expansion cannot represent (e.g. `calc()` with
/// embedded spaces is still fine; five-plus tokens are not).
fn expand_box_shorthand(property: &str, value: &str) -> Option<Vec<(String, String)>> {
    if property != "padding" && property != "margin" {
        return None;
    }

    let values: Vec<&str> = value.split_whitespace().collect();
    let (top, right, bottom, left) = match values.as_slice() {
        [all] => (*all, *all, *all, *all),
        [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
        [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
        [top, right, bottom, left] => (*top, *right, *bottom, *left),
        _ => return None,
    };

    Some(vec![
        (format!("{}-top", property), top.to_string()),
        (format!("{}-right", property), right.to_string()),
        (format!("{}-bottom", property), bottom.to_string()),
        (format!("{}-left", property), left.to_string()),
    ])
}

//! Block markup parsing and canonical serialization
//!
//! Implements enough of the block-comment grammar to round-trip generated
//! markup: `<!-- wp:name {attrs} -->` openers, `<!-- /wp:name -->` closers,
//! and self-closing `<!-- wp:name {attrs} /-->` voids, with freeform HTML
//! between them. Re-serializing through this grammar yields the canonical
//! form the editor's validator accepts.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--\s*(/)?wp:([a-z][a-z0-9_-]*(?:/[a-z][a-z0-9_-]*)?)\s*(\{.*?\})?\s*(/)?-->")
        .expect("valid regex")
});

/// One node of parsed markup
#[derive(Debug, Clone, PartialEq)]
pub enum BlockNode {
    /// A block with optional attributes and nested content
    Block {
        /// Block name with the implicit `core/` prefix stripped
        name: String,
        /// Parsed JSON attributes; `None` when absent or empty
        attrs: Option<Value>,
        /// Nested nodes, in order
        inner: Vec<BlockNode>,
        /// Self-closing block with no inner content
        void: bool,
    },
    /// Freeform HTML between block comments
    Html(String),
}

/// Parse markup into nodes, returning the total number of blocks found
pub fn parse_blocks(input: &str) -> (Vec<BlockNode>, usize) {
    // Stack of open blocks; frame 0 is the virtual root.
    let mut stack: Vec<(String, Option<Value>, Vec<BlockNode>)> =
        vec![(String::new(), None, Vec::new())];
    let mut block_count = 0usize;
    let mut cursor = 0usize;

    for caps in BLOCK_COMMENT.captures_iter(input) {
        let whole = caps.get(0).expect("match");

        let between = &input[cursor..whole.start()];
        push_html(&mut stack, between);
        cursor = whole.end();

        let is_closer = caps.get(1).is_some();
        let name = normalize_name(&caps[2]);
        let attrs = caps.get(3).and_then(|m| parse_attrs(m.as_str()));
        let is_void = caps.get(4).is_some();

        if is_closer {
            close_frame(&mut stack, &name);
        } else if is_void {
            block_count += 1;
            top_children(&mut stack).push(BlockNode::Block {
                name,
                attrs,
                inner: Vec::new(),
                void: true,
            });
        } else {
            block_count += 1;
            stack.push((name, attrs, Vec::new()));
        }
    }

    push_html(&mut stack, &input[cursor..]);

    // Auto-close anything the model left open.
    while stack.len() > 1 {
        let (name, attrs, inner) = stack.pop().expect("non-root frame");
        top_children(&mut stack).push(BlockNode::Block {
            name,
            attrs,
            inner,
            void: false,
        });
    }

    let (_, _, nodes) = stack.pop().expect("root frame");
    (nodes, block_count)
}

/// Serialize nodes back to canonical block markup
pub fn serialize_blocks(nodes: &[BlockNode]) -> String {
    let pieces: Vec<String> = nodes.iter().map(serialize_node).collect();
    pieces.join("\n")
}

fn serialize_node(node: &BlockNode) -> String {
    match node {
        BlockNode::Html(html) => html.clone(),
        BlockNode::Block {
            name,
            attrs,
            inner,
            void,
        } => {
            let attr_text = attrs
                .as_ref()
                .and_then(|a| serde_json::to_string(a).ok())
                .map(|json| format!(" {}", json))
                .unwrap_or_default();

            if *void {
                format!("<!-- wp:{}{} /-->", name, attr_text)
            } else if inner.is_empty() {
                format!("<!-- wp:{}{} -->\n<!-- /wp:{} -->", name, attr_text, name)
            } else {
                format!(
                    "<!-- wp:{}{} -->\n{}\n<!-- /wp:{} -->",
                    name,
                    attr_text,
                    serialize_blocks(inner),
                    name
                )
            }
        }
    }
}

fn normalize_name(raw: &str) -> String {
    raw.strip_prefix("core/").unwrap_or(raw).to_string()
}

/// Invalid or empty attribute JSON is dropped; the serializer emits a bare
/// comment, which is what the editor's fixer would do anyway
fn parse_attrs(raw: &str) -> Option<Value> {
    let value: Value = serde_json::from_str(raw).ok()?;
    match &value {
        Value::Object(map) if map.is_empty() => None,
        Value::Object(_) => Some(value),
        _ => None,
    }
}

fn push_html(stack: &mut [(String, Option<Value>, Vec<BlockNode>)], text: &str) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }
    stack
        .last_mut()
        .expect("root frame")
        .2
        .push(BlockNode::Html(trimmed.to_string()));
}

fn top_children(stack: &mut [(String, Option<Value>, Vec<BlockNode>)]) -> &mut Vec<BlockNode> {
    &mut stack.last_mut().expect("root frame").2
}

/// Close the innermost frame matching `name`; stray closers are dropped
fn close_frame(stack: &mut Vec<(String, Option<Value>, Vec<BlockNode>)>, name: &str) {
    let Some(position) = stack.iter().rposition(|(n, _, _)| n == name) else {
        return;
    };
    if position == 0 {
        return;
    }

    // Auto-close any deeper frames the model forgot about.
    while stack.len() > position + 1 {
        let (inner_name, attrs, inner) = stack.pop().expect("frame");
        top_children(stack).push(BlockNode::Block {
            name: inner_name,
            attrs,
            inner,
            void: false,
        });
    }

    let (frame_name, attrs, inner) = stack.pop().expect("frame");
    top_children(stack).push(BlockNode::Block {
        name: frame_name,
        attrs,
        inner,
        void: false,
    });
}

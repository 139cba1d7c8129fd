//! Response normalization
//!
//! Rewrites the model's raw markup so it passes block editor validation:
//! fence stripping, inline style normalization, class-list patching, and a
//! parse/serialize round trip through the block grammar. Non-block output
//! (plain JS/HTML/text) passes through after fence stripping only.

pub mod blocks;
pub mod classes;
pub mod fences;
pub mod style;

pub use blocks::{BlockNode, parse_blocks, serialize_blocks};
pub use classes::patch_block_classes;
pub use fences::strip_markdown_fences;
pub use style::rewrite_inline_styles;

use tracing::debug;

/// Run the full normalization pipeline over raw provider output
pub fn normalize_generated_code(raw: &str) -> String {
    let stripped = strip_markdown_fences(raw);

    if !stripped.contains("<!-- wp:") {
        return stripped;
    }

    let styled = rewrite_inline_styles(&stripped);
    let patched = patch_block_classes(&styled);

    let (nodes, block_count) = parse_blocks(&patched);
    if block_count > 0 {
        debug!(block_count, "Re-serializing block markup canonically");
        serialize_blocks(&nodes)
    } else {
        patched
    }
}

//! Tagged content blocks

use crate::text::passes::{
    break_lines, collapse_spaces, drop_noise_lines, squeeze_newlines, strip_noise,
    strip_short_items, trim, TextPass, TreePass,
};
use crate::text::tree::{children_of, join_text};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// Content-bearing tags, visited tag by tag in this order
pub const BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "article", "section", "main",
];

/// Class substrings that disqualify an element from becoming a block
const SKIPPED_CLASS_MARKERS: &[&str] = &["menu", "nav", "footer", "header", "sidebar"];

/// Blocks must have more than this many characters of cleaned text
const MIN_BLOCK_CHARS: usize = 10;

const BLOCK_TREE_PASSES: &[TreePass] = &[strip_noise, strip_short_items, break_lines];

const BLOCK_TEXT_PASSES: &[TextPass] = &[collapse_spaces, squeeze_newlines, drop_noise_lines, trim];

/// A cleaned excerpt of one content element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentBlock {
    /// Tag name, one of [`BLOCK_TAGS`]
    pub tag: String,
    /// The element's `id` attribute, or empty
    pub id: String,
    /// The element's classes joined by single spaces, or empty
    pub class: String,
    /// Cleaned text, always longer than ten characters
    pub text: String,
}

/// Extracts content blocks from a page
///
/// All `<p>` blocks come first in document order, then all `<h1>`, and so on
/// through [`BLOCK_TAGS`]. Nested matches are reported on their own as well as
/// inside their ancestors.
pub fn extract_content_blocks(document: &Html) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();

    for tag in BLOCK_TAGS {
        let selector = match Selector::parse(tag) {
            Ok(selector) => selector,
            Err(_) => continue,
        };

        for element in document.select(&selector) {
            if is_skipped(element) {
                continue;
            }

            let text = element_text(element);
            if text.chars().count() <= MIN_BLOCK_CHARS {
                continue;
            }

            let value = element.value();
            blocks.push(ContentBlock {
                tag: (*tag).to_string(),
                id: value.attr("id").unwrap_or("").to_string(),
                class: value
                    .attr("class")
                    .map(|c| c.split_whitespace().collect::<Vec<_>>().join(" "))
                    .unwrap_or_default(),
                text,
            });
        }
    }

    blocks
}

fn is_skipped(element: ElementRef<'_>) -> bool {
    let class = element.value().attr("class").unwrap_or("").to_lowercase();
    SKIPPED_CLASS_MARKERS
        .iter()
        .any(|marker| class.contains(marker))
}

/// Cleans the text below one element
///
/// The element itself is kept; only its descendants go through noise removal.
fn element_text(element: ElementRef<'_>) -> String {
    let mut nodes = children_of(element);
    for pass in BLOCK_TREE_PASSES {
        pass(&mut nodes);
    }

    let flattened = join_text(&nodes, " ");
    BLOCK_TEXT_PASSES
        .iter()
        .fold(flattened, |text, pass| pass(text))
}

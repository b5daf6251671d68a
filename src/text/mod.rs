//! Text cleaning for extracted pages
//!
//! This module turns arbitrary markup into:
//! - a single readable plain-text rendering of the page ([`format_page_text`])
//! - an ordered list of tagged, cleaned content blocks ([`extract_content_blocks`])
//!
//! Both are built from the same small passes in [`passes`], applied to an owned
//! copy of the parsed tree.

mod blocks;
mod formatter;
pub mod passes;
pub mod tree;

pub use blocks::{extract_content_blocks, ContentBlock, BLOCK_TAGS};
pub use formatter::format_page_text;

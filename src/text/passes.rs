//! Individual cleaning passes
//!
//! Tree passes edit a node list in place; text passes take the flattened string
//! and return the rewritten string. Each pass does one thing, and the formatter
//! and block extractor compose them in a fixed order.

use crate::text::tree::{DomNode, ElementNode};
use lazy_static::lazy_static;
use regex::Regex;

/// A pass over the editable tree
pub type TreePass = fn(&mut Vec<DomNode>);

/// A pass over flattened text
pub type TextPass = fn(String) -> String;

/// Tags whose whole subtree is chrome rather than content
const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "head", "meta", "link", "footer", "nav", "header",
    "aside",
];

/// Class substrings marking chrome; matched against the lowercased class attribute
const NOISE_CLASS_MARKERS: &[&str] = &[
    "menu",
    "navigation",
    "footer",
    "header",
    "sidebar",
    "nav",
    "social-media",
    "cookie-notice",
    "ad",
    "advertisement",
    "popup",
];

/// Items removed when their visible text is shorter than [`SHORT_ITEM_MIN_CHARS`]
const SHORT_ITEM_TAGS: &[&str] = &["li", "span", "a"];
const SHORT_ITEM_MIN_CHARS: usize = 3;

/// Block elements that start on a new line
const BLOCK_TAGS: &[&str] = &["p", "div", "li", "tr"];

pub(crate) const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Glyphs that make up separator-only lines
const SEPARATOR_GLYPHS: &[char] = &[
    '©', '•', '-', '–', '—', '|', '/', '\\', ':', ';', ',', '.',
];

/// Lines shorter than this are treated as "short" when reflowing
const SHORT_LINE_CHARS: usize = 40;

/// Lines shorter than this may count as headings without being all upper-case
const HEADING_LINE_CHARS: usize = 60;

lazy_static! {
    static ref SPACE_RUN: Regex = Regex::new(r" +").unwrap();
    static ref NEWLINE_RUN_3: Regex = Regex::new(r"\n{3,}").unwrap();
    static ref NEWLINE_RUN_2: Regex = Regex::new(r"\n{2,}").unwrap();
    static ref COPYRIGHT: Regex =
        Regex::new(r"(?im)©\s*\d{4}.*?(rights reserved|all rights).*?$").unwrap();
}

// ===== Tree passes =====

/// Removes chrome subtrees selected by tag name or class substring
pub fn strip_noise(nodes: &mut Vec<DomNode>) {
    nodes.retain(|node| match node {
        DomNode::Element(element) => !is_noise(element),
        DomNode::Text(_) => true,
    });
    recurse(nodes, strip_noise);
}

fn is_noise(element: &ElementNode) -> bool {
    if element.is_one_of(NOISE_TAGS) {
        return true;
    }
    let class = element.class_lower();
    NOISE_CLASS_MARKERS
        .iter()
        .any(|marker| class.contains(marker))
}

/// Removes list items, spans, and anchors with almost no visible text
pub fn strip_short_items(nodes: &mut Vec<DomNode>) {
    nodes.retain(|node| match node {
        DomNode::Element(element) => !is_short_item(element),
        DomNode::Text(_) => true,
    });
    recurse(nodes, strip_short_items);
}

fn is_short_item(element: &ElementNode) -> bool {
    element.is_one_of(SHORT_ITEM_TAGS)
        && element.stripped_text().chars().count() < SHORT_ITEM_MIN_CHARS
}

/// Inserts a newline marker before every block element
pub fn mark_blocks(nodes: &mut Vec<DomNode>) {
    let mut marked = Vec::with_capacity(nodes.len());
    for mut node in nodes.drain(..) {
        if let DomNode::Element(element) = &mut node {
            mark_blocks(&mut element.children);
            if element.is_one_of(BLOCK_TAGS) {
                marked.push(DomNode::text("\n"));
            }
        }
        marked.push(node);
    }
    *nodes = marked;
}

/// Surrounds headings with line breaks and upper-cases their text
pub fn mark_headings(nodes: &mut Vec<DomNode>) {
    let mut marked = Vec::with_capacity(nodes.len());
    for node in nodes.drain(..) {
        match node {
            DomNode::Element(mut element) if element.is_one_of(HEADING_TAGS) => {
                let heading = element
                    .raw_text()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_uppercase();
                element.children = vec![DomNode::Text(heading)];
                marked.push(DomNode::text("\n\n"));
                marked.push(DomNode::Element(element));
                marked.push(DomNode::text("\n"));
            }
            DomNode::Element(mut element) => {
                mark_headings(&mut element.children);
                marked.push(DomNode::Element(element));
            }
            text => marked.push(text),
        }
    }
    *nodes = marked;
}

/// Replaces every `<br>` with a newline marker
pub fn break_lines(nodes: &mut Vec<DomNode>) {
    for node in nodes.iter_mut() {
        match node {
            DomNode::Element(element) if element.tag == "br" => *node = DomNode::text("\n"),
            DomNode::Element(element) => break_lines(&mut element.children),
            DomNode::Text(_) => {}
        }
    }
}

fn recurse(nodes: &mut [DomNode], pass: TreePass) {
    for node in nodes.iter_mut() {
        if let DomNode::Element(element) = node {
            pass(&mut element.children);
        }
    }
}

// ===== Text passes =====

/// Collapses runs of spaces to one space
pub fn collapse_spaces(text: String) -> String {
    SPACE_RUN.replace_all(&text, " ").into_owned()
}

/// Collapses runs of three or more newlines to a blank line
pub fn limit_blank_lines(text: String) -> String {
    NEWLINE_RUN_3.replace_all(&text, "\n\n").into_owned()
}

/// Collapses runs of two or more newlines to a single newline
pub fn squeeze_newlines(text: String) -> String {
    NEWLINE_RUN_2.replace_all(&text, "\n").into_owned()
}

/// Trims every line and drops empty, single-character, and separator-only lines
pub fn drop_noise_lines(text: String) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| keep_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn keep_line(line: &str) -> bool {
    line.chars().count() > 1 && !line.chars().all(|c| SEPARATOR_GLYPHS.contains(&c))
}

/// Re-flows lines into paragraphs
///
/// A heading-like line always gets a blank line before it. Otherwise a line gets
/// a blank line after a long line, and a single newline after a short one. The
/// heading check wins when both could apply.
pub fn reflow_lines(text: String) -> String {
    let mut formatted = String::with_capacity(text.len());
    let mut prev_short = false;

    for (i, line) in text.lines().filter(|l| !l.is_empty()).enumerate() {
        if i > 0 {
            if is_heading_like(line) || !prev_short {
                formatted.push_str("\n\n");
            } else {
                formatted.push('\n');
            }
        }
        formatted.push_str(line);
        prev_short = line.chars().count() < SHORT_LINE_CHARS;
    }

    formatted
}

/// Entirely upper-case, or a short capitalised line without closing punctuation
pub fn is_heading_like(line: &str) -> bool {
    if is_all_upper(line) {
        return true;
    }

    let mut chars = line.chars();
    let first = chars.next();
    let last = line.chars().last();
    line.chars().count() < HEADING_LINE_CHARS
        && first.map_or(false, char::is_uppercase)
        && last.map_or(false, |c| !matches!(c, '.' | ',' | ':' | ';'))
}

fn is_all_upper(line: &str) -> bool {
    let mut cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Removes a trailing "© <year> ... all rights reserved" fragment
pub fn strip_copyright(text: String) -> String {
    COPYRIGHT.replace_all(&text, "").trim_end().to_string()
}

/// Trims leading and trailing whitespace
pub fn trim(text: String) -> String {
    text.trim().to_string()
}

//! Owned, editable copy of a parsed HTML subtree
//!
//! `scraper` trees are read-only through its public API, so the cleaning passes
//! work on this small owned tree instead. Only elements and text survive the
//! copy; comments, doctypes, and processing instructions are dropped.

use scraper::node::Node;
use scraper::ElementRef;

/// A node of the editable tree
#[derive(Debug, Clone, PartialEq)]
pub enum DomNode {
    Element(ElementNode),
    Text(String),
}

/// An element with its lowercased tag name, raw class attribute, and children
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: String,
    pub class: Option<String>,
    pub children: Vec<DomNode>,
}

impl DomNode {
    /// Creates a text node
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[cfg(test)]
    fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }
}

impl ElementNode {
    /// Returns true if the tag is one of `tags`
    pub fn is_one_of(&self, tags: &[&str]) -> bool {
        tags.contains(&self.tag.as_str())
    }

    /// Lowercased class attribute, or an empty string
    pub fn class_lower(&self) -> String {
        self.class.as_deref().unwrap_or("").to_lowercase()
    }

    /// Raw concatenation of every text node below this element
    pub fn raw_text(&self) -> String {
        let mut out = String::new();
        push_raw_text(&self.children, &mut out);
        out
    }

    /// Text with each piece trimmed and empty pieces dropped, joined without a separator
    pub fn stripped_text(&self) -> String {
        let mut pieces = Vec::new();
        collect_pieces(&self.children, &mut pieces);
        pieces
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// Element nesting kept as structure by a copy
///
/// Children of an element at this depth are copied as one flat text node, so
/// every pass over the copy recurses a bounded number of levels however deeply
/// the source markup nests.
pub const MAX_COPY_DEPTH: usize = 256;

/// Copies the children of `element` into an editable node list
pub fn children_of(element: ElementRef<'_>) -> Vec<DomNode> {
    children_at(element, 0)
}

/// Copies `element` itself, including its own tag, into an editable node
pub fn copy_element(element: ElementRef<'_>) -> DomNode {
    copy_at(element, 0)
}

fn children_at(element: ElementRef<'_>, depth: usize) -> Vec<DomNode> {
    element
        .children()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(DomNode::text(&**text)),
            Node::Element(_) => ElementRef::wrap(node).map(|child| copy_at(child, depth + 1)),
            _ => None,
        })
        .collect()
}

fn copy_at(element: ElementRef<'_>, depth: usize) -> DomNode {
    let value = element.value();
    let children = if depth >= MAX_COPY_DEPTH {
        vec![DomNode::Text(element.text().collect())]
    } else {
        children_at(element, depth)
    };

    DomNode::Element(ElementNode {
        tag: value.name().to_lowercase(),
        class: value.attr("class").map(str::to_string),
        children,
    })
}

/// Joins every text node in document order with `separator`
pub fn join_text(nodes: &[DomNode], separator: &str) -> String {
    let mut pieces = Vec::new();
    collect_pieces(nodes, &mut pieces);
    pieces.join(separator)
}

fn collect_pieces<'a>(nodes: &'a [DomNode], out: &mut Vec<&'a str>) {
    for node in nodes {
        match node {
            DomNode::Text(text) => out.push(text),
            DomNode::Element(element) => collect_pieces(&element.children, out),
        }
    }
}

fn push_raw_text(nodes: &[DomNode], out: &mut String) {
    for node in nodes {
        match node {
            DomNode::Text(text) => out.push_str(text),
            DomNode::Element(element) => push_raw_text(&element.children, out),
        }
    }
}

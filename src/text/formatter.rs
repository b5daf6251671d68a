//! Whole-page readable text

use crate::text::passes::{
    break_lines, collapse_spaces, drop_noise_lines, limit_blank_lines, mark_blocks,
    mark_headings, reflow_lines, strip_copyright, strip_noise, strip_short_items, TextPass,
    TreePass,
};
use crate::text::tree::{copy_element, join_text};
use scraper::Html;

/// Tree passes applied to the whole document, in order
const PAGE_TREE_PASSES: &[TreePass] = &[
    strip_noise,
    strip_short_items,
    mark_blocks,
    mark_headings,
    break_lines,
];

/// Text passes applied to the flattened page, in order
const PAGE_TEXT_PASSES: &[TextPass] = &[
    collapse_spaces,
    limit_blank_lines,
    drop_noise_lines,
    reflow_lines,
    limit_blank_lines,
    strip_copyright,
];

/// Produces a single readable plain-text rendering of a page
///
/// Chrome (navigation, headers, footers, scripts, ads) is removed, headings are
/// upper-cased on their own lines, and the remaining text is re-flowed into
/// paragraphs.
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use site_digest::text::format_page_text;
///
/// let html = Html::parse_document("<nav>Home</nav><h1>Welcome</h1><p>Hello there, reader.</p>");
/// assert_eq!(format_page_text(&html), "WELCOME\nHello there, reader.");
/// ```
pub fn format_page_text(document: &Html) -> String {
    let mut nodes = vec![copy_element(document.root_element())];
    for pass in PAGE_TREE_PASSES {
        pass(&mut nodes);
    }

    let flattened = join_text(&nodes, " ");
    PAGE_TEXT_PASSES
        .iter()
        .fold(flattened, |text, pass| pass(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(html: &str) -> String {
        format_page_text(&Html::parse_document(html))
    }

    #[test]
    fn test_removes_chrome() {
        let text = format(
            r#"<html><head><title>Title</title><style>p { color: red }</style></head>
            <body>
                <header>Site header</header>
                <nav><a href="/">Home</a></nav>
                <div class="sidebar">Sidebar stuff</div>
                <p>The actual article body lives here.</p>
                <footer>Footer links</footer>
                <script>var tracking = true;</script>
            </body></html>"#,
        );
        assert_eq!(text, "The actual article body lives here.");
    }

    #[test]
    fn test_headings_are_uppercased_and_separated() {
        let text = format(
            "<body><p>this paragraph is definitely longer than forty chars.</p>\
             <h2>Next steps</h2><p>follow the guide below to get going.</p></body>",
        );
        assert_eq!(
            text,
            "this paragraph is definitely longer than forty chars.\n\nNEXT STEPS\nfollow the guide below to get going."
        );
    }

    #[test]
    fn test_br_splits_lines() {
        let text = format("<body><p>first line here.<br>second line here.</p></body>");
        assert_eq!(text, "first line here.\nsecond line here.");
    }

    #[test]
    fn test_separator_lines_removed() {
        let text = format("<body><p>Alpha paragraph text.</p><p>---</p><p>•</p></body>");
        assert_eq!(text, "Alpha paragraph text.");
    }

    #[test]
    fn test_copyright_trailer_removed() {
        let text = format(
            "<body><p>Some body copy for the page.</p><p>©2024 Example Inc. All Rights Reserved</p></body>",
        );
        assert_eq!(text, "Some body copy for the page.");
    }

    #[test]
    fn test_short_menu_items_removed() {
        let text = format(
            "<body><ul><li>»</li><li><span>ok</span></li></ul><p>Paragraph body text.</p></body>",
        );
        assert_eq!(text, "Paragraph body text.");
    }

    #[test]
    fn test_malformed_markup_survives() {
        let text = format("<body><p>Unclosed paragraph &amp; stray <b>bold<p>Next para");
        assert!(text.contains("Unclosed paragraph & stray bold"));
        assert!(text.contains("Next para"));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(format(""), "");
    }
}

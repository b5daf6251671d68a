//! HTML parser for extracting page content
//!
//! This module handles parsing a fetched page to extract:
//! - Page title and meta description
//! - Top-level heading text
//! - Same-domain links and image references (resolved to absolute URLs)
//! - The readable full text and content blocks (see [`crate::text`])
//!
//! Parsing is tolerant: malformed markup is repaired the way a browser would,
//! so extraction never fails.

use crate::crawler::types::{Image, Link, PageResult, PaginationInfo, NO_ALT_TEXT, NO_TITLE};
use crate::text::{extract_content_blocks, format_page_text};
use crate::url::{is_excluded_reference, is_same_domain, resolve_reference};
use scraper::{Html, Selector};

/// Anchors considered for the link list
const MAX_LINK_CANDIDATES: usize = 30;

/// Images considered for the image list
const MAX_IMAGE_CANDIDATES: usize = 10;

/// Parses a page body and extracts everything reported for it
///
/// # Arguments
///
/// * `url` - The URL the page was requested from; used to resolve references
/// * `html` - The page body
///
/// # Example
///
/// ```
/// use site_digest::crawler::extract_page;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let page = extract_page("https://example.com/", html);
/// assert_eq!(page.title, "Test");
/// assert_eq!(page.links[0].href, "https://example.com/page");
/// ```
pub fn extract_page(url: &str, html: &str) -> PageResult {
    let document = Html::parse_document(html);

    PageResult {
        url: url.to_string(),
        title: extract_title(&document).unwrap_or_else(|| NO_TITLE.to_string()),
        meta_description: extract_meta_description(&document),
        headings: extract_headings(&document),
        links: extract_links(&document, url),
        images: extract_images(&document, url),
        full_text: format_page_text(&document),
        content_blocks: extract_content_blocks(&document),
        subpages: Vec::new(),
        pagination: PaginationInfo::default(),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

/// Extracts the `content` of `<meta name="description">`, or an empty string
fn extract_meta_description(document: &Html) -> String {
    let selector = match Selector::parse(r#"meta[name="description"]"#) {
        Ok(selector) => selector,
        Err(_) => return String::new(),
    };

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .unwrap_or("")
        .to_string()
}

/// Extracts the trimmed text of every `<h1>`
fn extract_headings(document: &Html) -> Vec<String> {
    let selector = match Selector::parse("h1") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect()
}

/// Extracts same-domain links from the first anchors that carry an href
///
/// Script, mail, phone, and bare `#` references are skipped before resolution;
/// links to other domains are skipped after it.
fn extract_links(document: &Html, page_url: &str) -> Vec<Link> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector).take(MAX_LINK_CANDIDATES) {
            let href = match element.value().attr("href") {
                Some(href) => href,
                None => continue,
            };

            if is_excluded_reference(href) {
                continue;
            }

            let absolute = resolve_reference(page_url, href);
            if !is_same_domain(page_url, &absolute) {
                continue;
            }

            links.push(Link {
                text: element.text().collect::<String>().trim().to_string(),
                href: absolute,
            });
        }
    }

    links
}

/// Extracts the first images that carry a src
fn extract_images(document: &Html, page_url: &str) -> Vec<Image> {
    let mut images = Vec::new();

    if let Ok(img_selector) = Selector::parse("img[src]") {
        for element in document.select(&img_selector).take(MAX_IMAGE_CANDIDATES) {
            if let Some(src) = element.value().attr("src") {
                images.push(Image {
                    src: resolve_reference(page_url, src),
                    alt: element
                        .value()
                        .attr("alt")
                        .unwrap_or(NO_ALT_TEXT)
                        .to_string(),
                });
            }
        }
    }

    images
}

//! Request and result types for crawl operations

use crate::text::ContentBlock;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Number of subpage URLs fetched per batch
pub const BATCH_SIZE: usize = 20;

/// Title reported when a page has no `<title>` element
pub const NO_TITLE: &str = "No title found";

/// Alt text reported when an image has no `alt` attribute
pub const NO_ALT_TEXT: &str = "No alt text";

/// Everything extracted from one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult {
    pub url: String,
    pub title: String,
    pub meta_description: String,
    /// Trimmed text of every `<h1>`, in document order
    pub headings: Vec<String>,
    /// Same-domain links among the first 30 anchors
    pub links: Vec<Link>,
    /// Images among the first 10 `<img>` elements
    pub images: Vec<Image>,
    pub full_text: String,
    pub content_blocks: Vec<ContentBlock>,
    /// Subpages one hop from the seed; always empty on a subpage itself
    pub subpages: Vec<PageResult>,
    pub pagination: PaginationInfo,
}

/// A same-domain hyperlink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// An image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

/// Position of a batch within the full subpage list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_subpages: usize,
    pub has_next: bool,
}

impl PaginationInfo {
    /// Computes pagination for `page` of a list with `total_subpages` entries
    ///
    /// # Example
    ///
    /// ```
    /// use site_digest::PaginationInfo;
    ///
    /// let info = PaginationInfo::for_page(45, 1);
    /// assert_eq!(info.total_pages, 3);
    /// assert!(info.has_next);
    /// ```
    pub fn for_page(total_subpages: usize, page: usize) -> Self {
        let total_pages = (total_subpages + BATCH_SIZE - 1) / BATCH_SIZE;
        Self {
            current_page: page,
            total_pages,
            total_subpages,
            has_next: page + 1 < total_pages,
        }
    }
}

/// Index range of batch `page` within a list of `total` URLs, if non-empty
pub fn batch_range(total: usize, page: usize) -> Option<Range<usize>> {
    let start = page.checked_mul(BATCH_SIZE)?;
    if start >= total {
        return None;
    }
    Some(start..(start + BATCH_SIZE).min(total))
}

/// One batch of fetched subpages with its pagination
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubpageBatch {
    pub subpages: Vec<PageResult>,
    pub pagination: PaginationInfo,
}

/// Parameters of a top-level crawl
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartCrawlRequest {
    /// Seed URL; a missing scheme becomes `https://`
    #[serde(default)]
    pub url: String,
    /// 0 fetches only the seed page; anything above 1 counts as 1
    #[serde(default)]
    pub crawl_depth: Option<i64>,
    /// Zero-based subpage batch
    #[serde(default)]
    pub page: Option<i64>,
}

impl StartCrawlRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_depth(mut self, crawl_depth: i64) -> Self {
        self.crawl_depth = Some(crawl_depth);
        self
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    /// Requested depth clamped to 0 or 1
    pub fn depth(&self) -> u8 {
        clamp_depth(self.crawl_depth.unwrap_or(0))
    }

    /// Requested batch, defaulting to 0
    pub fn page(&self) -> usize {
        clamp_page(self.page.unwrap_or(0))
    }
}

/// Parameters for fetching a further batch of an earlier crawl
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContinueCrawlRequest {
    /// Any URL on the previously crawled domain
    #[serde(default)]
    pub url: String,
    /// Zero-based subpage batch
    #[serde(default)]
    pub page: Option<i64>,
}

impl ContinueCrawlRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            page: None,
        }
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    /// Requested batch, defaulting to 1 (the batch after the one a start crawl returns)
    pub fn page(&self) -> usize {
        clamp_page(self.page.unwrap_or(1))
    }
}

/// Clamps a requested crawl depth to 0 or 1
pub fn clamp_depth(requested: i64) -> u8 {
    if requested > 0 {
        1
    } else {
        0
    }
}

fn clamp_page(requested: i64) -> usize {
    usize::try_from(requested).unwrap_or(0)
}

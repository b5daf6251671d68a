//! Crawler module for page fetching and subpage batches
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a browser identity and timeout
//! - HTML parsing into a [`PageResult`]
//! - Subpage enumeration from a seed page's links
//! - A bounded worker pool for fetching subpage batches
//! - The [`Crawler`] that serves start and continue requests

mod coordinator;
mod fetcher;
mod parser;
mod pool;
mod subpages;
mod types;

pub use crate::text::ContentBlock;
pub use coordinator::Crawler;
pub use fetcher::{build_http_client, fetch_page};
pub use parser::extract_page;
pub use pool::{BatchFetcher, WORKER_COUNT};
pub use subpages::enumerate_subpages;
pub use types::{
    batch_range, clamp_depth, ContinueCrawlRequest, Image, Link, PageResult, PaginationInfo,
    StartCrawlRequest, SubpageBatch, BATCH_SIZE, NO_ALT_TEXT, NO_TITLE,
};

use crate::DigestError;
use reqwest::Client;

/// Fetches a page and extracts its content
///
/// Parsing runs on the blocking pool so large documents do not stall the
/// runtime's worker threads.
///
/// # Arguments
///
/// * `client` - The HTTP client to fetch with
/// * `url` - Absolute URL of the page
///
/// # Returns
///
/// * `Ok(PageResult)` - The extracted page, with no subpages
/// * `Err(DigestError)` - The fetch failed
pub async fn scrape_page(client: &Client, url: &str) -> crate::Result<PageResult> {
    let body = fetch_page(client, url).await?;

    let page_url = url.to_string();
    let result = tokio::task::spawn_blocking(move || extract_page(&page_url, &body))
        .await
        .map_err(|e| DigestError::Scrape(e.to_string()))?;

    tracing::debug!(
        "Extracted {} ({} links, {} blocks)",
        url,
        result.links.len(),
        result.content_blocks.len()
    );
    Ok(result)
}

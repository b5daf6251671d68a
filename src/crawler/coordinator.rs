//! Crawl orchestration
//!
//! [`Crawler`] ties the pieces together for the two public operations:
//! - `start_crawl`: fetch the seed page, enumerate and persist its subpages,
//!   then fetch the requested batch
//! - `continue_crawl`: fetch another batch from the persisted list

use crate::config::Config;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::pool::BatchFetcher;
use crate::crawler::scrape_page;
use crate::crawler::subpages::enumerate_subpages;
use crate::crawler::types::{ContinueCrawlRequest, PageResult, StartCrawlRequest, SubpageBatch};
use crate::storage::SessionStore;
use crate::url::{domain_key, prepare_seed_url};
use crate::{DigestError, UrlError};
use reqwest::Client;
use std::sync::Arc;

/// Handles crawl requests against a shared client and session store
#[derive(Clone)]
pub struct Crawler {
    client: Client,
    store: Arc<dyn SessionStore>,
    batches: Arc<BatchFetcher>,
}

impl Crawler {
    /// Creates a crawler from configuration and a session store
    ///
    /// # Arguments
    ///
    /// * `config` - The loaded configuration
    /// * `store` - Where enumerated subpage lists are kept between requests
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to serve requests
    /// * `Err(DigestError)` - The HTTP client could not be built
    pub fn new(config: &Config, store: Arc<dyn SessionStore>) -> crate::Result<Self> {
        let client = build_http_client(&config.fetcher)?;
        let batches = Arc::new(BatchFetcher::new(
            client.clone(),
            config.crawler.politeness_delay(),
        ));

        Ok(Self {
            client,
            store,
            batches,
        })
    }

    /// The session store this crawler writes to
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Crawls a seed page and, at depth 1, one batch of its subpages
    ///
    /// At depth 1 with at least one same-domain link, the enumerated subpage list
    /// replaces any stored session for the seed's domain before the batch is
    /// fetched. Subpage failures are skipped; a seed failure fails the request.
    pub async fn start_crawl(&self, request: &StartCrawlRequest) -> crate::Result<PageResult> {
        let seed_url = prepare_seed_url(&request.url)?;
        let depth = request.depth();
        let page = request.page();

        tracing::info!(
            "Starting crawl of {} (depth {}, page {})",
            seed_url,
            depth,
            page
        );

        let mut result = match scrape_page(&self.client, &seed_url).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Failed to crawl seed page {}: {}", seed_url, e);
                return Err(e);
            }
        };

        if depth == 0 || result.links.is_empty() {
            tracing::debug!("Not following links from {}", seed_url);
            return Ok(result);
        }

        let subpage_urls = enumerate_subpages(&seed_url, &result.links);
        let domain = domain_key(&seed_url).ok_or(UrlError::MissingDomain)?;
        self.store.save(&domain, &seed_url, &subpage_urls)?;
        tracing::info!(
            "Stored {} subpages for {}",
            subpage_urls.len(),
            domain
        );

        let batch = self.batches.fetch(&subpage_urls, page, depth).await;
        result.subpages = batch.subpages;
        result.pagination = batch.pagination;

        Ok(result)
    }

    /// Fetches another batch of subpages from the stored session for a domain
    ///
    /// # Errors
    ///
    /// Returns `DigestError::SessionNotFound` if no non-empty list is stored for
    /// the URL's domain.
    pub async fn continue_crawl(
        &self,
        request: &ContinueCrawlRequest,
    ) -> crate::Result<SubpageBatch> {
        let url = prepare_seed_url(&request.url)?;
        let domain = domain_key(&url).ok_or(UrlError::MissingDomain)?;
        let page = request.page();

        let subpage_urls = self.store.load(&domain);
        if subpage_urls.is_empty() {
            return Err(DigestError::SessionNotFound { domain });
        }

        tracing::info!(
            "Continuing crawl of {} (page {}, {} stored subpages)",
            domain,
            page,
            subpage_urls.len()
        );

        Ok(self.batches.fetch(&subpage_urls, page, 1).await)
    }
}

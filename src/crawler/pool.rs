//! Bounded worker pool for fetching a batch of subpages
//!
//! At most [`WORKER_COUNT`] fetches run at once. Each worker waits for the
//! politeness delay after taking its slot and before issuing its request, which
//! caps the request rate at roughly `WORKER_COUNT / delay`.
//!
//! Failures are isolated: every task settles to an outcome, failed ones are
//! logged and left out, and the batch is assembled only after all tasks settle.

use crate::crawler::scrape_page;
use crate::crawler::types::{batch_range, PageResult, PaginationInfo, SubpageBatch};
use crate::DigestError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Maximum number of subpage fetches in flight
pub const WORKER_COUNT: usize = 3;

/// How one subpage task settled
enum FetchOutcome {
    Fetched(PageResult),
    Failed { url: String, error: DigestError },
}

/// Fetches one batch of subpages
pub struct BatchFetcher {
    client: Client,
    politeness_delay: Duration,
}

impl BatchFetcher {
    pub fn new(client: Client, politeness_delay: Duration) -> Self {
        Self {
            client,
            politeness_delay,
        }
    }

    /// Fetches batch `page` of `subpage_urls`
    ///
    /// Returns an empty batch with zeroed pagination when `depth` is 0, the list
    /// is empty, or `page` is past the end of the list. Otherwise the subpages
    /// come back in completion order, each with its own `subpages` emptied.
    pub async fn fetch(&self, subpage_urls: &[String], page: usize, depth: u8) -> SubpageBatch {
        if depth == 0 || subpage_urls.is_empty() {
            return SubpageBatch::default();
        }

        let range = match batch_range(subpage_urls.len(), page) {
            Some(range) => range,
            None => {
                tracing::debug!(
                    "Page {} is past the end of {} subpages",
                    page,
                    subpage_urls.len()
                );
                return SubpageBatch::default();
            }
        };

        tracing::info!(
            "Fetching subpages {}..{} of {} (page {})",
            range.start,
            range.end,
            subpage_urls.len(),
            page
        );

        let outcomes = self.run_workers(&subpage_urls[range]).await;

        let mut subpages = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                FetchOutcome::Fetched(mut result) => {
                    result.subpages.clear();
                    subpages.push(result);
                }
                FetchOutcome::Failed { url, error } => {
                    tracing::warn!("Error crawling {}: {}", url, error);
                }
            }
        }

        SubpageBatch {
            subpages,
            pagination: PaginationInfo::for_page(subpage_urls.len(), page),
        }
    }

    /// Runs one task per URL and waits for every task to settle
    async fn run_workers(&self, urls: &[String]) -> Vec<FetchOutcome> {
        let semaphore = Arc::new(Semaphore::new(WORKER_COUNT));
        let mut tasks = JoinSet::new();

        for url in urls {
            let url = url.clone();
            let client = self.client.clone();
            let semaphore = Arc::clone(&semaphore);
            let delay = self.politeness_delay;

            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        tokio::time::sleep(delay).await;
                        scrape_page(&client, &url).await
                    }
                    Err(e) => Err(DigestError::Scrape(e.to_string())),
                };

                match result {
                    Ok(page) => FetchOutcome::Fetched(page),
                    Err(error) => FetchOutcome::Failed { url, error },
                }
            });
        }

        let mut outcomes = Vec::with_capacity(urls.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => tracing::warn!("Subpage task did not complete: {}", e),
            }
        }
        outcomes
    }
}

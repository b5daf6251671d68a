//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the browser identity and timeout
//! - GET requests that fail on any non-2xx status
//! - Error classification (timeout vs. other transport failures)

use crate::config::FetcherConfig;
use crate::DigestError;
use reqwest::Client;

/// Builds an HTTP client with proper configuration
///
/// The client sends the configured User-Agent, applies the whole-request
/// timeout, and follows redirects.
///
/// # Example
///
/// ```no_run
/// use site_digest::config::FetcherConfig;
/// use site_digest::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout | `DigestError::Timeout` |
/// | Non-2xx status | `DigestError::HttpStatus` |
/// | Connection or body failure | `DigestError::Http` |
///
/// Nothing is retried.
pub async fn fetch_page(client: &Client, url: &str) -> crate::Result<String> {
    tracing::debug!("Fetching {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DigestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| classify_error(url, e))
}

fn classify_error(url: &str, error: reqwest::Error) -> DigestError {
    if error.is_timeout() {
        DigestError::Timeout {
            url: url.to_string(),
        }
    } else {
        DigestError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

//! Site-Digest: a single-site page reader with resumable subpage batches
//!
//! This crate fetches a seed page, extracts structured and readable content from
//! it, and crawls same-domain subpages one hop away in fixed-size batches. The
//! enumerated subpage list is persisted per domain so later requests can continue
//! where an earlier one stopped.

pub mod config;
pub mod crawler;
pub mod storage;
pub mod text;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Digest operations
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("No saved crawl session found for {domain}")]
    SessionNotFound { domain: String },

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::StorageError),

    #[error("Error scraping content: {0}")]
    Scrape(String),
}

/// Coarse classification of a [`DigestError`] for callers at the request boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or unusable seed URL
    Input,
    /// Timeout, network failure, or non-2xx status
    Fetch,
    /// Continue requested for a domain without a stored session
    SessionNotFound,
    /// Anything else that went wrong while processing the request
    Internal,
}

impl DigestError {
    /// Returns the error kind this error reports as
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UrlError(_) => ErrorKind::Input,
            Self::Http { .. } | Self::Timeout { .. } | Self::HttpStatus { .. } => ErrorKind::Fetch,
            Self::SessionNotFound { .. } => ErrorKind::SessionNotFound,
            Self::Reqwest(_) | Self::StorageError(_) | Self::Scrape(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Returns true if this error came from fetching a page
    pub fn is_fetch_error(&self) -> bool {
        self.kind() == ErrorKind::Fetch
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("URL is required")]
    Empty,
}

/// Result type alias for Site-Digest operations
pub type Result<T> = std::result::Result<T, DigestError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{
    ContentBlock, ContinueCrawlRequest, Crawler, Image, Link, PageResult, PaginationInfo,
    StartCrawlRequest, SubpageBatch,
};
pub use storage::{MemorySessionStore, SessionStore, SqliteSessionStore};
pub use url::{domain_key, is_same_domain, resolve_reference};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            DigestError::UrlError(UrlError::Empty).kind(),
            ErrorKind::Input
        );
        assert_eq!(
            DigestError::HttpStatus {
                url: "https://example.com/".to_string(),
                status: 500,
            }
            .kind(),
            ErrorKind::Fetch
        );
        assert_eq!(
            DigestError::SessionNotFound {
                domain: "example.com".to_string(),
            }
            .kind(),
            ErrorKind::SessionNotFound
        );
        assert_eq!(
            DigestError::Scrape("boom".to_string()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_timeout_is_fetch_error() {
        let err = DigestError::Timeout {
            url: "https://example.com/".to_string(),
        };
        assert!(err.is_fetch_error());
        assert_eq!(err.to_string(), "Request timeout for https://example.com/");
    }
}

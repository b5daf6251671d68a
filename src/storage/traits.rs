//! Storage traits and error types
//!
//! This module defines the trait interface for session store backends and
//! associated error types.

use crate::storage::CrawlSession;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for crawl session store implementations
///
/// A store holds at most one session per domain. Implementations must be safe to
/// share between concurrent requests.
pub trait SessionStore: Send + Sync {
    /// Saves the subpage list for a domain, replacing any existing session
    ///
    /// # Arguments
    ///
    /// * `domain` - The domain key (see [`crate::url::domain_key`])
    /// * `seed_url` - The seed URL the list was enumerated from
    /// * `subpage_urls` - The ordered, deduplicated subpage URLs
    fn save(&self, domain: &str, seed_url: &str, subpage_urls: &[String]) -> StorageResult<()>;

    /// Loads the full session record for a domain
    ///
    /// Never fails: a missing record, missing backing storage, or unreadable data
    /// all come back as `None`.
    fn load_session(&self, domain: &str) -> Option<CrawlSession>;

    /// Loads the stored subpage URLs for a domain, or an empty list
    fn load(&self, domain: &str) -> Vec<String> {
        self.load_session(domain)
            .map(|session| session.subpage_urls)
            .unwrap_or_default()
    }
}

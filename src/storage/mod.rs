//! Storage module for crawl sessions
//!
//! A crawl session records, per domain, the subpage URL list enumerated by the
//! most recent top-level crawl so later requests can fetch further batches
//! without re-fetching the seed page. This module provides:
//! - the [`SessionStore`] trait
//! - a SQLite-backed store for persistent use
//! - an in-memory store for tests and embedding

mod memory;
mod schema;
mod sqlite;
mod traits;

pub use memory::MemorySessionStore;
pub use sqlite::SqliteSessionStore;
pub use traits::{SessionStore, StorageError, StorageResult};

use chrono::{DateTime, Utc};
use std::path::Path;

/// Opens the persistent session store at `path`
///
/// See [`SqliteSessionStore::new`] for how unreadable files are handled.
pub fn open_session_store(path: &Path) -> StorageResult<SqliteSessionStore> {
    SqliteSessionStore::new(path)
}

/// The stored record of one domain's enumerated subpages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSession {
    /// Lowercased host with a leading `www.` removed
    pub domain: String,
    /// The seed URL whose links produced the list
    pub seed_url: String,
    /// Deduplicated subpage URLs in first-occurrence order
    pub subpage_urls: Vec<String>,
    /// When the list was saved
    pub captured_at: DateTime<Utc>,
}

impl CrawlSession {
    /// Creates a session captured now
    pub fn new(domain: &str, seed_url: &str, subpage_urls: Vec<String>) -> Self {
        Self {
            domain: domain.to_string(),
            seed_url: seed_url.to_string(),
            subpage_urls,
            captured_at: Utc::now(),
        }
    }
}

//! In-memory session store

use crate::storage::traits::{SessionStore, StorageResult};
use crate::storage::CrawlSession;
use std::collections::HashMap;
use std::sync::Mutex;

/// Session store backed by a map; nothing survives the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, CrawlSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, domain: &str, seed_url: &str, subpage_urls: &[String]) -> StorageResult<()> {
        let session = CrawlSession::new(domain, seed_url, subpage_urls.to_vec());
        // A poisoned lock still holds a usable map
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions.insert(domain.to_string(), session);
        Ok(())
    }

    fn load_session(&self, domain: &str) -> Option<CrawlSession> {
        let sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions.get(domain).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_load_missing_domain() {
        let store = MemorySessionStore::new();
        assert!(store.load("example.com").is_empty());
        assert!(store.load_session("example.com").is_none());
    }

    #[test]
    fn test_save_and_load() {
        let store = MemorySessionStore::new();
        let list = urls(&["https://example.com/a", "https://example.com/b"]);
        store.save("example.com", "https://example.com/", &list).unwrap();

        assert_eq!(store.load("example.com"), list);
        let session = store.load_session("example.com").unwrap();
        assert_eq!(session.seed_url, "https://example.com/");
    }

    #[test]
    fn test_save_replaces_existing() {
        let store = MemorySessionStore::new();
        store
            .save("example.com", "https://example.com/", &urls(&["https://example.com/a"]))
            .unwrap();
        store
            .save("example.com", "https://example.com/x", &urls(&["https://example.com/z"]))
            .unwrap();

        assert_eq!(store.load("example.com"), urls(&["https://example.com/z"]));
    }

    #[test]
    fn test_domains_are_independent() {
        let store = MemorySessionStore::new();
        store
            .save("a.com", "https://a.com/", &urls(&["https://a.com/1"]))
            .unwrap();
        store
            .save("b.com", "https://b.com/", &urls(&["https://b.com/1"]))
            .unwrap();

        assert_eq!(store.load("a.com"), urls(&["https://a.com/1"]));
        assert_eq!(store.load("b.com"), urls(&["https://b.com/1"]));
    }
}

//! URL handling module for Site-Digest
//!
//! This module resolves page-relative references, prepares seed URLs, and
//! decides whether two URLs belong to the same site.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{domain_key, extract_domain, is_same_domain};
pub use normalize::{ensure_scheme, is_excluded_reference, resolve_reference};

use crate::UrlError;
use url::Url;

/// Prepares a caller-supplied seed URL for crawling
///
/// Trims the input, inserts an `https://` prefix when the caller left the scheme
/// off, and checks that the result parses with a host.
///
/// # Examples
///
/// ```
/// use site_digest::url::prepare_seed_url;
///
/// let seed = prepare_seed_url("example.com/docs").unwrap();
/// assert_eq!(seed, "https://example.com/docs");
/// ```
pub fn prepare_seed_url(raw: &str) -> Result<String, UrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let seed = ensure_scheme(trimmed);
    let parsed = Url::parse(&seed).map_err(|e| UrlError::Parse(e.to_string()))?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_adds_https() {
        assert_eq!(
            prepare_seed_url("example.com").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_prepare_keeps_http() {
        assert_eq!(
            prepare_seed_url("http://example.com/page").unwrap(),
            "http://example.com/page"
        );
    }

    #[test]
    fn test_prepare_trims_whitespace() {
        assert_eq!(
            prepare_seed_url("  https://example.com/  ").unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_prepare_rejects_empty() {
        assert!(matches!(prepare_seed_url("   "), Err(UrlError::Empty)));
    }

    #[test]
    fn test_prepare_rejects_unparseable() {
        assert!(prepare_seed_url("https://exa mple.com").is_err());
    }
}

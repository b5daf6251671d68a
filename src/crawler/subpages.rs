//! Subpage enumeration from a seed page's links

use crate::crawler::types::Link;
use crate::url::is_same_domain;
use std::collections::HashSet;

/// Builds the ordered, deduplicated list of same-domain subpage URLs
///
/// Keeps the first occurrence of each href. Empty hrefs and hrefs on another
/// domain than `seed_url` are skipped.
///
/// # Example
///
/// ```
/// use site_digest::crawler::enumerate_subpages;
/// use site_digest::Link;
///
/// let links = vec![
///     Link { text: "B".into(), href: "https://example.com/b".into() },
///     Link { text: "A".into(), href: "https://example.com/a".into() },
///     Link { text: "B again".into(), href: "https://example.com/b".into() },
/// ];
/// let urls = enumerate_subpages("https://example.com/", &links);
/// assert_eq!(urls, vec!["https://example.com/b", "https://example.com/a"]);
/// ```
pub fn enumerate_subpages(seed_url: &str, links: &[Link]) -> Vec<String> {
    let mut seen = HashSet::new();

    links
        .iter()
        .map(|link| link.href.as_str())
        .filter(|href| !href.is_empty() && is_same_domain(seed_url, href))
        .filter(|href| seen.insert(*href))
        .map(str::to_string)
        .collect()
}

use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_digest::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}

/// Computes the comparison key for a URL's domain
///
/// The key is the lowercased host with a single leading `www.` removed. The port
/// is not part of the key. Returns None when the URL cannot be parsed or has no
/// host.
///
/// # Examples
///
/// ```
/// use site_digest::url::domain_key;
///
/// assert_eq!(domain_key("https://WWW.Example.com/a"), Some("example.com".to_string()));
/// assert_eq!(domain_key("not a url"), None);
/// ```
pub fn domain_key(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = extract_domain(&parsed)?;
    match host.strip_prefix("www.") {
        Some(stripped) => Some(stripped.to_string()),
        None => Some(host),
    }
}

/// Checks whether two URLs belong to the same domain
///
/// Malformed URLs, or URLs without a host, never match anything.
pub fn is_same_domain(a: &str, b: &str) -> bool {
    match (domain_key(a), domain_key(b)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

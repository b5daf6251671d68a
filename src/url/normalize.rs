use url::Url;

/// Reference prefixes that never produce a followable link
const EXCLUDED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:"];

/// Checks whether an href should be discarded before resolution
///
/// Script-triggering, mail, and phone references are dropped, as is the bare
/// fragment `#`. Other fragment references (`#section`) are resolved normally.
pub fn is_excluded_reference(href: &str) -> bool {
    let href = href.trim();
    href == "#" || EXCLUDED_PREFIXES.iter().any(|p| href.starts_with(p))
}

/// Inserts an `https://` scheme when the input has neither `http://` nor `https://`
pub fn ensure_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Resolves an href or src relative to the page it was found on
///
/// # Resolution Rules
///
/// 1. Absolute `http://` / `https://` references are kept as they are
/// 2. Protocol-relative references (`//host/path`) take the page's scheme
/// 3. Absolute-path references (`/a/b`) are joined to the page's scheme and host
/// 4. Anything else is joined to the page URL: one trailing slash is removed from
///    the page URL, one leading slash from the reference, and the two are joined
///    with a single slash
///
/// If the page URL cannot be parsed, rules 2 and 3 leave the reference unchanged.
///
/// # Examples
///
/// ```
/// use site_digest::url::resolve_reference;
///
/// assert_eq!(resolve_reference("https://x.com/p", "/a/b"), "https://x.com/a/b");
/// assert_eq!(resolve_reference("https://x.com/dir/", "a/b"), "https://x.com/dir/a/b");
/// ```
pub fn resolve_reference(page_url: &str, href: &str) -> String {
    let href = href.trim();

    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    if href.starts_with("//") {
        return match Url::parse(page_url) {
            Ok(page) => format!("{}:{}", page.scheme(), href),
            Err(_) => href.to_string(),
        };
    }

    if href.starts_with('/') {
        return match site_root(page_url) {
            Some(root) => format!("{}{}", root, href),
            None => href.to_string(),
        };
    }

    let base = page_url.strip_suffix('/').unwrap_or(page_url);
    let reference = href.strip_prefix('/').unwrap_or(href);
    format!("{}/{}", base, reference)
}

/// Returns `scheme://host[:port]` for an HTTP(S) URL
fn site_root(page_url: &str) -> Option<String> {
    let page = Url::parse(page_url).ok()?;
    if page.scheme() != "http" && page.scheme() != "https" {
        return None;
    }
    let host = page.host_str()?;
    Some(match page.port() {
        Some(port) => format!("{}://{}:{}", page.scheme(), host, port),
        None => format!("{}://{}", page.scheme(), host),
    })
}

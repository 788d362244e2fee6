use crate::url::validate::check_crawlable;
use url::Url;

/// Resolves a raw link string against the URL of the page it was found on
///
/// Returns None if the link should be discarded:
/// - empty or fragment-only links (same page anchors)
/// - links containing whitespace or control characters
/// - links that fail to resolve against the base
/// - non-HTTP(S) targets after resolution (`javascript:`, `mailto:`, `data:`, ...)
///
/// # Arguments
///
/// * `base_url` - The URL of the page the link was found on
/// * `raw` - The raw `href` value
///
/// # Examples
///
/// ```
/// use refcrawl::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("http://a.test/dir/page").unwrap();
/// let resolved = resolve_link(&base, "other").unwrap();
/// assert_eq!(resolved.as_str(), "http://a.test/dir/other");
///
/// assert!(resolve_link(&base, "not a url").is_none());
/// ```
pub fn resolve_link(base_url: &Url, raw: &str) -> Option<Url> {
    let raw = raw.trim();

    if raw.is_empty() || raw.starts_with('#') {
        return None;
    }

    // Inner whitespace means the href is prose, not a link
    if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }

    let joined = base_url.join(raw).ok()?;
    check_crawlable(joined).ok()
}

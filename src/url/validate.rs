use crate::UrlError;
use url::Url;

/// Parses and validates an absolute URL
///
/// # Validation Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Only `http` and `https` schemes are accepted
/// 3. The URL must carry a host
/// 4. The fragment is dropped, since it never changes what is fetched
///
/// # Arguments
///
/// * `url_str` - The URL string to validate
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL in canonical form
/// * `Err(UrlError)` - The string is not a crawlable absolute URL
///
/// # Examples
///
/// ```
/// use refcrawl::url::validate_absolute;
///
/// let url = validate_absolute("http://Example.COM/page#top").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/page");
/// ```
pub fn validate_absolute(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    check_crawlable(url)
}

/// Checks scheme and host of an already parsed URL and strips its fragment
pub(crate) fn check_crawlable(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlError::MissingHost),
    }

    url.set_fragment(None);

    Ok(url)
}

use crate::UrlError;
use url::Url;

/// Resolves a raw link against a base URL and canonicalizes it
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace from the raw link
/// 2. Resolve it against `base` (absolute links replace the base entirely);
///    dot segments are removed and the host is lowercased while parsing
/// 3. Reject anything that is not HTTP(S) or has no host
/// 4. Remove the fragment (everything after `#`)
/// 5. Remove the query string (everything after `?`)
///
/// The result carries only scheme, host, optional port and path, and
/// normalizing an already canonical URL returns it unchanged.
///
/// # Examples
///
/// ```
/// use product_harvest::url::normalize;
/// use url::Url;
///
/// let base = Url::parse("https://shop.example.com/collections/bows").unwrap();
/// let url = normalize("/products/recurve?variant=3#reviews", &base).unwrap();
/// assert_eq!(url.as_str(), "https://shop.example.com/products/recurve");
/// ```
pub fn normalize(raw: &str, base: &Url) -> Result<Url, UrlError> {
    let url = base
        .join(raw.trim())
        .map_err(|e| UrlError::Parse(format!("'{}': {}", raw, e)))?;
    canonicalize(url)
}

/// Parses an absolute URL string and canonicalizes it
///
/// Used for the root URL, which has no page to resolve against.
pub fn parse_canonical(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(format!("'{}': {}", raw, e)))?;
    canonicalize(url)
}

/// Strips fragment and query from an already parsed URL
pub fn canonicalize(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);
    url.set_query(None);

    Ok(url)
}

use url::Url;

/// Returns the network location (`host[:port]`) of a URL
///
/// The port only appears when it differs from the scheme's default, since
/// the URL parser drops default ports.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use product_harvest::url::netloc;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(netloc(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(netloc(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn netloc(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Checks whether `url` lives on the same network location as `root`
///
/// Subdomains are different locations: `shop.example.com` is not the same
/// domain as `example.com`.
pub fn is_same_domain(url: &Url, root: &Url) -> bool {
    match (netloc(url), netloc(root)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

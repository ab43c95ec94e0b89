use url::Url;

/// Image extensions that are never worth fetching as pages
const MEDIA_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp"];

/// Checks whether a URL points at an image file
///
/// Only the extension of the last path segment counts, compared
/// case-insensitively; a segment that merely contains an extension name
/// (`/products/jpg-strap`) is not a media file.
///
/// # Examples
///
/// ```
/// use product_harvest::url::is_media_file;
/// use url::Url;
///
/// assert!(is_media_file(&Url::parse("https://example.com/img/photo.JPG").unwrap()));
/// assert!(!is_media_file(&Url::parse("https://example.com/products/jpg-strap").unwrap()));
/// ```
pub fn is_media_file(url: &Url) -> bool {
    has_media_extension(url.path())
}

/// Path-level check behind [`is_media_file`]
fn has_media_extension(path: &str) -> bool {
    let last_segment = path.rsplit('/').next().unwrap_or_default();

    last_segment
        .rsplit_once('.')
        .map(|(_, ext)| MEDIA_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
        .unwrap_or(false)
}

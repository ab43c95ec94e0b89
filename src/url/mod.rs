//! URL handling module for Product-Harvest
//!
//! This module provides URL canonicalization, same-domain filtering, media
//! file exclusion, and product-page classification. Everything here is pure.

mod domain;
mod matcher;
mod media;
mod normalize;

use ::url::Url;

// Re-export main functions
pub use domain::{is_same_domain, netloc};
pub use matcher::{ProductMatcher, DEFAULT_PRODUCT_PATTERNS};
pub use media::is_media_file;
pub use normalize::{canonicalize, normalize, parse_canonical};

/// Why a discovered link was not admitted to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkRejection {
    /// Could not be resolved to an HTTP(S) URL
    Unparseable,
    /// Lives on another network location than the crawl root
    OffDomain,
    /// Points at an image file
    MediaFile,
}

/// Canonicalizes a discovered link and applies the domain and media filters
///
/// This is the URL-only part of link admission; visited/queued bookkeeping
/// and robots.txt checks happen in the crawler.
///
/// # Examples
///
/// ```
/// use product_harvest::url::{admit_link, LinkRejection};
/// use url::Url;
///
/// let root = Url::parse("https://shop.com/").unwrap();
/// let page = Url::parse("https://shop.com/collections/bows").unwrap();
///
/// let admitted = admit_link("/products/x?variant=2", &page, &root).unwrap();
/// assert_eq!(admitted.as_str(), "https://shop.com/products/x");
///
/// assert_eq!(
///     admit_link("/cdn/bow.png", &page, &root).unwrap_err(),
///     LinkRejection::MediaFile
/// );
/// ```
pub fn admit_link(raw: &str, page_url: &Url, root: &Url) -> Result<Url, LinkRejection> {
    let url = normalize(raw, page_url).map_err(|_| LinkRejection::Unparseable)?;

    if !is_same_domain(&url, root) {
        return Err(LinkRejection::OffDomain);
    }

    if is_media_file(&url) {
        return Err(LinkRejection::MediaFile);
    }

    Ok(url)
}

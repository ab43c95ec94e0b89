//! Structured data extraction for product pages
//!
//! This module turns a parsed product page into a flat [`ProductRecord`]:
//! - JSON-LD blocks typed `Product` or `WebPage` are flattened and merged
//! - When no such block yields data, meta tags and CSS selectors are used
//!
//! Extraction never fails. Malformed input degrades to a partial or empty
//! record.

mod fallback;
mod json_ld;
mod record;

pub use fallback::{extract_fallback, META_FIELDS, SELECTOR_FIELDS};
pub use json_ld::{extract_json_ld, flatten, has_accepted_type, ACCEPTED_TYPES, KEY_SEPARATOR};
pub use record::{ProductRecord, URL_FIELD};

use scraper::Html;

/// Extracts a product record from a parsed page
///
/// # Example
///
/// ```
/// use product_harvest::extract::extract;
/// use scraper::Html;
///
/// let html = r#"<script type="application/ld+json">
///     {"@type": "Product", "name": "Bow", "offers": {"price": "199.99"}}
/// </script>"#;
/// let record = extract(&Html::parse_document(html));
///
/// assert_eq!(record.get_str("name"), Some("Bow"));
/// assert_eq!(record.get_str("offers_price"), Some("199.99"));
/// ```
pub fn extract(document: &Html) -> ProductRecord {
    let record = extract_json_ld(document);
    if !record.is_empty() {
        return record;
    }

    tracing::debug!("No JSON-LD product data; using meta and selector fallback");
    extract_fallback(document)
}

/// Parses `html` and extracts a product record from it
pub fn extract_from_html(html: &str) -> ProductRecord {
    extract(&Html::parse_document(html))
}

//! Heuristic extraction for pages without usable JSON-LD
//!
//! Meta tags are consulted first, then CSS selectors for the fields meta tags
//! did not supply. Each field has an ordered candidate list. A meta tag only
//! counts when its content is non-empty; for selectors the first matching
//! element wins, even when its text is empty.

use super::record::ProductRecord;
use scraper::{ElementRef, Html, Selector};

/// Meta tag names tried per field, in order
///
/// Each name is matched against both the `property` and the `name`
/// attribute.
pub const META_FIELDS: &[(&str, &[&str])] = &[
    ("title", &["og:title", "twitter:title", "title"]),
    (
        "description",
        &["og:description", "description", "twitter:description"],
    ),
    ("price", &["product:price:amount", "og:price:amount"]),
    ("currency", &["product:price:currency", "og:price:currency"]),
    ("availability", &["product:availability", "og:availability"]),
    ("image", &["og:image", "twitter:image"]),
];

/// CSS selectors tried per field when no meta tag supplied it
pub const SELECTOR_FIELDS: &[(&str, &[&str])] = &[
    ("price", &[".price", ".product-price", "[data-product-price]"]),
    ("title", &["h1", ".product-title", ".product-name"]),
    ("sku", &[".sku", "[data-product-sku]"]),
    (
        "description",
        &[".product-description", "#product-description"],
    ),
];

/// Builds a record from meta tags and CSS selectors
pub fn extract_fallback(document: &Html) -> ProductRecord {
    let mut record = ProductRecord::new();
    let metas = meta_tags(document);

    for (field, names) in META_FIELDS {
        if let Some(content) = names.iter().find_map(|name| meta_content(&metas, name)) {
            record.insert(*field, content);
        }
    }

    for (field, selectors) in SELECTOR_FIELDS {
        if record.contains_key(field) {
            continue;
        }
        if let Some(text) = selectors.iter().find_map(|s| first_text(document, s)) {
            record.insert(*field, text);
        }
    }

    record
}

fn meta_tags(document: &Html) -> Vec<ElementRef<'_>> {
    match Selector::parse("meta[content]") {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Content of the first meta tag whose `property`, then `name`, equals `name`
fn meta_content(metas: &[ElementRef<'_>], name: &str) -> Option<String> {
    ["property", "name"].iter().find_map(|attr| {
        metas
            .iter()
            .filter(|meta| meta.value().attr(attr) == Some(name))
            .filter_map(|meta| meta.value().attr("content"))
            .map(str::trim)
            .find(|content| !content.is_empty())
            .map(str::to_string)
    })
}

/// Trimmed text of the first element matching `selector`
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    Some(element.text().collect::<String>().trim().to_string())
}

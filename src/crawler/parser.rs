//! HTML parser for extracting links and the page title
//!
//! Link targets are returned as written in the page (trimmed); resolving and
//! filtering them against the crawl root is the URL module's job.

use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Raw href values of followable anchors, in document order
    pub links: Vec<String>,
}

/// Parses HTML content and extracts the title and anchor targets
///
/// # Link Extraction Rules
///
/// **Include:** every `<a href="...">` in the document.
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` and `data:` targets
/// - Empty and fragment-only (`#section`) targets
///
/// # Example
///
/// ```
/// use product_harvest::crawler::parse_html;
///
/// let html = r#"<html><head><title>Bows</title></head><body><a href="/products/x">X</a></body></html>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.title, Some("Bows".to_string()));
/// assert_eq!(parsed.links, vec!["/products/x".to_string()]);
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_links(&document),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the followable anchor targets from a parsed document
pub fn extract_links(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter(|element| element.value().attr("download").is_none())
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| is_followable(href))
        .map(str::to_string)
        .collect()
}

/// Returns false for targets that can never lead to another page
fn is_followable(href: &str) -> bool {
    const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

    if href.is_empty() || href.starts_with('#') {
        return false;
    }

    let lower = href.to_ascii_lowercase();
    !SKIPPED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

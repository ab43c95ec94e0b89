//! JSON-LD extraction and flattening
//!
//! Every `<script type="application/ld+json">` block is parsed on its own; a
//! block that fails to parse is skipped without affecting the others. Objects
//! typed `Product` or `WebPage` are flattened into one record, later blocks
//! overwriting earlier keys.

use super::record::ProductRecord;
use scraper::{Html, Selector};
use serde_json::{Map, Value};

/// `@type` values whose objects are harvested
pub const ACCEPTED_TYPES: &[&str] = &["Product", "WebPage"];

/// Separator between the segments of a flattened key path
pub const KEY_SEPARATOR: char = '_';

const JSON_LD_MIME: &str = "application/ld+json";

/// Extracts and merges every accepted JSON-LD object on the page
///
/// Returns an empty record when the page carries no accepted objects.
pub fn extract_json_ld(document: &Html) -> ProductRecord {
    let mut record = ProductRecord::new();

    for (index, raw) in json_ld_blocks(document).into_iter().enumerate() {
        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Skipping malformed JSON-LD block {}: {}", index, e);
                continue;
            }
        };

        for object in accepted_objects(&value) {
            let mut flat = Map::new();
            flatten(object, "", &mut flat);
            record.merge(ProductRecord::from(flat));
        }
    }

    record
}

/// Returns the text of every JSON-LD script block, in document order
fn json_ld_blocks(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("script[type]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|script| {
            script
                .value()
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case(JSON_LD_MIME))
        })
        .map(|script| script.text().collect::<String>())
        .collect()
}

/// Top-level objects of a block that carry an accepted `@type`
///
/// A top-level object is checked directly; a top-level array has each of its
/// object elements checked. Anything else yields nothing.
fn accepted_objects(value: &Value) -> Vec<&Map<String, Value>> {
    match value {
        Value::Object(object) if has_accepted_type(object) => vec![object],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .filter(|object| has_accepted_type(object))
            .collect(),
        _ => Vec::new(),
    }
}

/// Returns true if `@type` is, or contains, an accepted type name
pub fn has_accepted_type(object: &Map<String, Value>) -> bool {
    match object.get("@type") {
        Some(Value::String(t)) => ACCEPTED_TYPES.contains(&t.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| ACCEPTED_TYPES.contains(&t)),
        _ => false,
    }
}

/// Flattens a nested JSON object into `out`
///
/// - Nested objects recurse with the key path `parent_child`.
/// - Arrays holding only strings, numbers and booleans are joined into one
///   `", "`-separated string.
/// - Other arrays recurse into each object element with the path
///   `parent_<index>`; non-object elements are dropped.
/// - Every other value (string, number, boolean, null) is stored as is.
///
/// An empty `prefix` is omitted from the generated keys.
///
/// # Examples
///
/// ```
/// use product_harvest::extract::flatten;
/// use serde_json::{json, Map};
///
/// let value = json!({"name": "Bow", "offers": {"price": "199.99"}});
/// let mut out = Map::new();
/// flatten(value.as_object().unwrap(), "", &mut out);
///
/// assert_eq!(out["name"], "Bow");
/// assert_eq!(out["offers_price"], "199.99");
/// ```
pub fn flatten(object: &Map<String, Value>, prefix: &str, out: &mut Map<String, Value>) {
    for (key, value) in object {
        let path = join_key(prefix, key);

        match value {
            Value::Object(child) => flatten(child, &path, out),
            Value::Array(items) if items.iter().all(is_scalar) => {
                out.insert(path, Value::String(join_scalars(items)));
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if let Value::Object(child) = item {
                        flatten(child, &join_key(&path, &index.to_string()), out);
                    }
                }
            }
            scalar => {
                out.insert(path, scalar.clone());
            }
        }
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{KEY_SEPARATOR}{key}")
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn join_scalars(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

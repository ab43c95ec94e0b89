//! The flat product record produced by extraction

use crate::harvest::collapse_whitespace;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name holding the canonical product page URL
pub const URL_FIELD: &str = "url";

/// A flattened key/value record for one product page
///
/// Keys keep the position of their first insertion, so the serialized record
/// lists fields in the order they were first found on the page. The page URL
/// is appended after them unless the page supplied its own `url` field, whose
/// value is then replaced in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRecord(Map<String, Value>);

impl ProductRecord {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value under `key` if it is a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Stores a value, replacing any previous value for the key in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns true if the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Merges `other` into this record; values from `other` win on collision
    pub fn merge(&mut self, other: ProductRecord) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Attaches the page URL the record was extracted from
    pub fn set_url(&mut self, url: &url::Url) {
        self.insert(URL_FIELD, url.as_str());
    }

    /// Collapses runs of whitespace in every string value to single spaces
    ///
    /// Leading and trailing whitespace is removed. Non-string values are
    /// left untouched.
    pub fn collapse_whitespace(&mut self) {
        for value in self.0.values_mut() {
            if let Value::String(s) = value {
                *s = collapse_whitespace(s);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for ProductRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

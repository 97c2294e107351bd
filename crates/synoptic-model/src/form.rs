use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical submitted-form mapping: field name to raw values.
///
/// HTTP adapters convert their native request types into this shape before
/// the core runs, so the core never probes for multi-get capabilities.
/// Repeated keys accumulate; keys iterate deduplicated in sorted order, which
/// keeps derived output reproducible regardless of input ordering. Ephemeral:
/// lives for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    values: BTreeMap<String, Vec<String>>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (name, value) pairs, e.g. decoded urlencoded form data.
    /// Duplicate names keep every value in submission order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (key, value) in pairs {
            form.append(key.into(), value.into());
        }
        form
    }

    /// Append one value under a key, keeping earlier values.
    pub fn append(&mut self, key: String, value: String) {
        self.values.entry(key).or_default().push(value);
    }

    /// First raw value for a key, if any was submitted.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// First value that is non-empty after trimming, trimmed. Empty string
    /// when the key is absent or every value is blank.
    pub fn first_nonempty(&self, key: &str) -> &str {
        self.values
            .get(key)
            .into_iter()
            .flatten()
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }

    /// All values for a key as trimmed non-empty strings. A single
    /// comma-joined submission is split into its parts; missing key yields an
    /// empty list.
    pub fn list(&self, key: &str) -> Vec<String> {
        let Some(values) = self.values.get(key) else {
            return Vec::new();
        };
        values
            .iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Deduplicated keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

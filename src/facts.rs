//! Flat fact table returned to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat mapping of sanitized fact names to string values.
///
/// Serializes as a flat JSON object, the shape automation layers consume.
/// Keys are sorted, so serialization and iteration order are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactTable {
    #[serde(flatten)]
    entries: BTreeMap<String, String>,
}

impl FactTable {
    /// Create an empty fact table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a fact by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert a fact, returning the previous value if the name was taken.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.entries.insert(key, value)
    }

    /// Remove a fact by name.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Iterate over fact names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over name/value pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of facts in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no facts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the table, yielding the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.entries
    }
}

impl FromIterator<(String, String)> for FactTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FactTable {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

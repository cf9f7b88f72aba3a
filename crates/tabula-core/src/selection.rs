//! Pending selection cache: per-column value selections not tied to a filter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Working value selections keyed by column id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingSelection {
    entries: BTreeMap<String, Vec<String>>,
}

impl PendingSelection {
    /// Create an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Selection for a column.
    #[must_use]
    pub fn get(&self, column_id: &str) -> Option<&[String]> {
        self.entries.get(column_id).map(Vec::as_slice)
    }

    /// Whether the column has an entry.
    #[must_use]
    pub fn contains(&self, column_id: &str) -> bool {
        self.entries.contains_key(column_id)
    }

    pub(crate) fn set(&mut self, column_id: &str, values: Vec<String>) {
        self.entries.insert(column_id.to_string(), values);
    }

    pub(crate) fn remove(&mut self, column_id: &str) -> Option<Vec<String>> {
        self.entries.remove(column_id)
    }

    /// Move the entry for `from` to `to`, emptied.
    pub(crate) fn rekey(&mut self, from: &str, to: &str) {
        self.entries.remove(from);
        self.entries.insert(to.to_string(), Vec::new());
    }

    pub(crate) fn retain(&mut self, mut f: impl FnMut(&str, &mut Vec<String>) -> bool) {
        self.entries.retain(|k, values| f(k, values));
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Column ids with entries, sorted.
    pub fn column_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! A single record: one ordered, name-keyed collection of entries.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::entries::Entries;
use crate::entry::Entry;

/// One record. Wraps an [`Entries`] collection and is immutable: every
/// transforming operation returns a new row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    entries: Entries,
}

impl Row {
    /// Wraps an existing entry collection.
    pub fn new(entries: Entries) -> Self {
        Self { entries }
    }

    /// Builds a row from a list of entries, enforcing name uniqueness with
    /// last-write-wins at the position of first insertion.
    pub fn create(entries: Vec<Entry>) -> Self {
        Self::new(Entries::new(entries))
    }

    /// Returns the entry collection.
    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    /// Returns the entry with the given name, if present.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Returns a new row with the entry set (replace in place or append).
    pub fn set(&self, entry: Entry) -> Self {
        Self::new(self.entries.set(entry))
    }

    /// Returns a new row without the named entry. No-op when absent.
    pub fn remove(&self, name: &str) -> Self {
        Self::new(self.entries.remove(name))
    }

    /// Returns a new row with the entry `from` renamed to `to`.
    ///
    /// The renamed entry moves to the end of the row. When `from` is absent
    /// or `to` is empty the row is returned unchanged.
    pub fn rename(&self, from: &str, to: &str) -> Self {
        let Some(entry) = self.entries.get(from) else {
            return self.clone();
        };
        let Ok(renamed) = entry.rename(to) else {
            return self.clone();
        };
        Self::new(self.entries.remove(from).set(renamed))
    }

    /// Returns a new row with `f` applied to every entry.
    pub fn map_entries<F>(&self, f: F) -> Self
    where
        F: FnMut(&Entry) -> Entry,
    {
        Self::new(self.entries.iter().map(f).collect())
    }

    /// Returns the ordered mapping of entry name to native value.
    ///
    /// Structure entries flatten into their nested list-of-entries
    /// representation rather than a plain scalar.
    pub fn to_values(&self) -> Vec<(String, JsonValue)> {
        self.entries
            .iter()
            .map(|e| (e.name().to_string(), e.to_native()))
            .collect()
    }

    /// Structural equality at the row level, order-independent.
    ///
    /// Entry counts must match; then every entry in `self` must have a
    /// same-named, [`Entry::is_equal`] counterpart in `other`. Two rows with
    /// the same count but disjoint name sets are unequal.
    pub fn is_equal(&self, other: &Row) -> bool {
        if self.entries.len() != other.entries.len() {
            return false;
        }
        self.entries.iter().all(|entry| {
            other
                .entries
                .get(entry.name())
                .is_some_and(|counterpart| entry.is_equal(counterpart))
        })
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

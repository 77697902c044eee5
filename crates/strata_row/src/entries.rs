//! An ordered, name-unique collection of entries.

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::RowError;

/// The field set of a [`Row`](crate::Row): an ordered sequence of entries
/// with set semantics on names.
///
/// Immutable like everything else in the model: [`Entries::set`],
/// [`Entries::add`], and [`Entries::remove`] return new collections. When a
/// set replaces an existing name, the entry keeps that name's original
/// position; new names append at the end.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entries {
    entries: Vec<Entry>,
}

impl Entries {
    /// Builds a collection from entries in order, applying last-write-wins
    /// on duplicate names at the position of the first insertion.
    pub fn new(entries: Vec<Entry>) -> Self {
        entries
            .into_iter()
            .fold(Self::default(), |acc, entry| acc.set(entry))
    }

    /// Returns `true` when an entry with the given name exists.
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.is(name))
    }

    /// Returns the entry with the given name, if present.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.is(name))
    }

    /// Returns a new collection with the entry set.
    ///
    /// Replaces in place when the name exists, appends otherwise.
    pub fn set(&self, entry: Entry) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter().position(|e| e.is(entry.name())) {
            Some(index) => entries[index] = entry,
            None => entries.push(entry),
        }
        Self { entries }
    }

    /// Returns a new collection with the entry appended.
    ///
    /// Fails with [`RowError::DuplicateName`] when the name already exists.
    pub fn add(&self, entry: Entry) -> Result<Self, RowError> {
        if self.has(entry.name()) {
            return Err(RowError::DuplicateName {
                name: entry.name().to_string(),
            });
        }
        let mut entries = self.entries.clone();
        entries.push(entry);
        Ok(Self { entries })
    }

    /// Returns a new collection without the named entry. No-op when absent.
    pub fn remove(&self, name: &str) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|e| !e.is(name))
                .cloned()
                .collect(),
        }
    }

    /// Returns all entries in order.
    pub fn all(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl FromIterator<Entry> for Entries {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Entries {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

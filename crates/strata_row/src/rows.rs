//! An ordered batch of rows, the unit of cache I/O.

use serde::{Deserialize, Serialize};

use crate::row::Row;

/// An ordered, iterable, countable batch of [`Row`] values.
///
/// No uniqueness constraint and no ordering invariant beyond insertion
/// order. Iteration is a single forward pass; restart by re-obtaining a
/// batch. Transforming operations consume the batch and return a new one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rows {
    rows: Vec<Row>,
}

impl Rows {
    /// Builds a batch from rows in order.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Returns the number of rows in the batch.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the first row, if any.
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Iterates over the rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Returns a new batch with the row appended.
    pub fn add(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Returns a new batch with `other` appended after `self`.
    pub fn merge(mut self, other: Rows) -> Self {
        self.rows.extend(other.rows);
        self
    }

    /// Returns a new batch containing only the rows matching `predicate`.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnMut(&Row) -> bool,
    {
        Self {
            rows: self.rows.into_iter().filter(predicate).collect(),
        }
    }

    /// Returns a new batch with `f` applied to every row.
    pub fn map<F>(self, f: F) -> Self
    where
        F: FnMut(Row) -> Row,
    {
        Self {
            rows: self.rows.into_iter().map(f).collect(),
        }
    }

    /// Returns a new batch with the row order reversed.
    pub fn reverse(mut self) -> Self {
        self.rows.reverse();
        self
    }
}

impl FromIterator<Row> for Rows {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Rows {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Rows {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

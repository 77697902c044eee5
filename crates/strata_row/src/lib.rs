//! The strata row data model.
//!
//! This crate defines the core record types [`Entry`], [`Entries`], [`Row`],
//! and [`Rows`] that every pipeline stage exchanges. All of them are immutable
//! values: every "mutating" operation returns a new value and leaves the
//! original untouched, so records can be shared freely between stages and
//! cached without defensive copies.

#![warn(missing_docs)]

pub mod cast;
pub mod entries;
pub mod entry;
pub mod error;
pub mod row;
pub mod rows;

pub use cast::{cast_entries, cast_entry, EntryCast};
pub use entries::Entries;
pub use entry::{Entry, EntryValue};
pub use error::RowError;
pub use row::Row;
pub use rows::Rows;

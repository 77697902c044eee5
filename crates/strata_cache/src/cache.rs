//! The cache contract shared by every implementation.

use strata_row::Rows;

use crate::error::CacheError;

/// A lazy, pull-based stream of cached batches.
///
/// The caller drives advancement; each pull reads, decodes, and yields one
/// batch. Dropping the stream early releases the underlying resources.
pub type RowsStream<'a> = Box<dyn Iterator<Item = Result<Rows, CacheError>> + 'a>;

/// Maps an opaque string identifier to a sequence of row batches.
///
/// Per-identifier state machine: absent, then has-records after the first
/// [`Cache::add`], then absent again after [`Cache::clear`]. Reading never
/// transitions state.
pub trait Cache {
    /// Appends one batch to the sequence stored under `id`.
    fn add(&self, id: &str, rows: Rows) -> Result<(), CacheError>;

    /// Lazily replays the batches stored under `id`, in write order.
    ///
    /// An unknown identifier produces an empty stream, not an error.
    fn read(&self, id: &str) -> RowsStream<'_>;

    /// Removes everything stored under `id`. Idempotent: clearing an
    /// unknown identifier succeeds.
    fn clear(&self, id: &str) -> Result<(), CacheError>;
}

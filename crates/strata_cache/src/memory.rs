//! An in-memory cache for tests and short-lived pipelines.

use std::collections::HashMap;
use std::sync::Mutex;

use strata_row::Rows;

use crate::cache::{Cache, RowsStream};
use crate::error::CacheError;

/// A [`Cache`] holding every batch in process memory.
///
/// Same contract as the filesystem cache, without persistence: batches are
/// replayed in write order, unknown identifiers read as empty, clearing is
/// idempotent. Useful as a test collaborator and for pipelines whose
/// intermediate state fits in memory.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    batches: Mutex<HashMap<String, Vec<Rows>>>,
}

impl InMemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Rows>>> {
        self.batches.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Cache for InMemoryCache {
    fn add(&self, id: &str, rows: Rows) -> Result<(), CacheError> {
        self.lock().entry(id.to_string()).or_default().push(rows);
        Ok(())
    }

    fn read(&self, id: &str) -> RowsStream<'_> {
        let batches = self.lock().get(id).cloned().unwrap_or_default();
        Box::new(batches.into_iter().map(Ok))
    }

    fn clear(&self, id: &str) -> Result<(), CacheError> {
        self.lock().remove(id);
        Ok(())
    }
}

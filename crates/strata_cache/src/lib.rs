//! Content-addressed streaming cache for row batches.
//!
//! This crate persists sequences of [`Rows`](strata_row::Rows) batches under
//! opaque string identifiers and replays them as lazy streams. The primary
//! implementation is [`LocalFilesystemCache`], a single-node file-backed
//! store addressing each identifier by its SHA-256 digest;
//! [`InMemoryCache`] offers the same contract without touching disk.

#![warn(missing_docs)]

pub mod cache;
pub mod digest;
pub mod error;
pub mod local;
pub mod memory;

pub use cache::{Cache, RowsStream};
pub use digest::ContentDigest;
pub use error::CacheError;
pub use local::LocalFilesystemCache;
pub use memory::InMemoryCache;

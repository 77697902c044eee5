//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur during cache operations.
///
/// Reads are tolerant of torn trailing writes (they end the stream instead of
/// failing), but interior corruption and I/O failures surface to the caller.
/// The cache performs no retries or suppression of its own.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The resolved cache directory does not exist or is not a directory.
    #[error("cache path does not exist or is not a directory: {path}")]
    InvalidCacheDir {
        /// The resolved cache path.
        path: PathBuf,
    },

    /// An I/O error occurred while reading or writing a cache file.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A record failed to serialize before being appended.
    #[error("failed to serialize batch for {id:?}: {source}")]
    Serialize {
        /// The cache identifier being written.
        id: String,
        /// The underlying serializer error.
        source: strata_serializer::SerializerError,
    },

    /// An interior record failed to deserialize.
    ///
    /// Unlike a corrupt trailing record (tolerated as a torn write), interior
    /// corruption indicates unrecoverable data loss.
    #[error("corrupt record {index} in {path}: {source}")]
    CorruptRecord {
        /// Zero-based index of the corrupt record within the file.
        index: usize,
        /// The cache file path.
        path: PathBuf,
        /// The underlying deserialize error.
        source: strata_serializer::SerializerError,
    },
}

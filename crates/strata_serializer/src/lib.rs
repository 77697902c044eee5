//! Batch serialization for the strata cache.
//!
//! Converts a [`Rows`](strata_row::Rows) batch to and from an opaque byte
//! record. Records must be newline-free so the cache can frame them as
//! newline-delimited lines; the [`CompressingSerializer`] guarantees this for
//! any base serializer by compressing and base64-encoding the payload.

#![warn(missing_docs)]

pub mod compress;
pub mod error;
pub mod json;
pub mod serializer;

pub use compress::CompressingSerializer;
pub use error::SerializerError;
pub use json::JsonSerializer;
pub use serializer::Serializer;

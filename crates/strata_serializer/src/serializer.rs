//! The batch serialization contract.

use strata_row::Rows;

use crate::error::SerializerError;

/// Converts a [`Rows`] batch to and from an opaque byte record.
///
/// Implementations must be inverse pairs: `deserialize(serialize(r))` is
/// structurally equal to `r` for every valid batch. The cache is agnostic to
/// the concrete serializer as long as this contract holds and the produced
/// record contains no embedded newline.
pub trait Serializer {
    /// Serializes a batch into a self-delimited byte record.
    fn serialize(&self, rows: &Rows) -> Result<Vec<u8>, SerializerError>;

    /// Deserializes a byte record back into a batch.
    ///
    /// Fails with [`SerializerError::Corrupt`] when the bytes do not decode
    /// to a valid batch.
    fn deserialize(&self, bytes: &[u8]) -> Result<Rows, SerializerError>;
}

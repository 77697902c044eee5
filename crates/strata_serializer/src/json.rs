//! The base serializer: compact JSON text.

use strata_row::Rows;

use crate::error::SerializerError;
use crate::serializer::Serializer;

/// Serializes batches as compact JSON.
///
/// JSON string escaping guarantees the output carries no raw newline, so
/// this serializer already satisfies the cache's line framing on its own.
/// Wrap it in a [`CompressingSerializer`](crate::CompressingSerializer) to
/// trade CPU for smaller cache files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize(&self, rows: &Rows) -> Result<Vec<u8>, SerializerError> {
        serde_json::to_vec(rows).map_err(|e| SerializerError::Encode {
            reason: e.to_string(),
        })
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Rows, SerializerError> {
        serde_json::from_slice(bytes).map_err(|e| SerializerError::Corrupt {
            reason: e.to_string(),
        })
    }
}

//! A compressing layer over any base serializer.

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use strata_row::Rows;

use crate::error::SerializerError;
use crate::serializer::Serializer;

/// Wraps a base serializer with zlib compression and base64 encoding.
///
/// The base64 step makes the record binary-safe ASCII with no embedded
/// newline, so any base serializer (including binary ones) becomes suitable
/// for the cache's newline-delimited framing.
#[derive(Debug, Clone)]
pub struct CompressingSerializer<S> {
    inner: S,
    level: Compression,
}

impl<S> CompressingSerializer<S> {
    /// Wraps a base serializer at best compression.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            level: Compression::best(),
        }
    }

    /// Wraps a base serializer at an explicit compression level.
    pub fn with_level(inner: S, level: Compression) -> Self {
        Self { inner, level }
    }
}

impl<S: Serializer> Serializer for CompressingSerializer<S> {
    fn serialize(&self, rows: &Rows) -> Result<Vec<u8>, SerializerError> {
        let payload = self.inner.serialize(rows)?;

        let mut encoder = ZlibEncoder::new(Vec::new(), self.level);
        encoder
            .write_all(&payload)
            .and_then(|_| encoder.finish())
            .map(|compressed| STANDARD.encode(compressed).into_bytes())
            .map_err(|e| SerializerError::Encode {
                reason: e.to_string(),
            })
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Rows, SerializerError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| SerializerError::Corrupt {
                reason: e.to_string(),
            })?
            .trim_end();

        let compressed = STANDARD
            .decode(text)
            .map_err(|e| SerializerError::Corrupt {
                reason: format!("invalid base64: {e}"),
            })?;

        let mut payload = Vec::new();
        ZlibDecoder::new(compressed.as_slice())
            .read_to_end(&mut payload)
            .map_err(|e| SerializerError::Corrupt {
                reason: format!("invalid zlib stream: {e}"),
            })?;

        self.inner.deserialize(&payload)
    }
}

//! Error types for batch serialization.

/// Errors produced while serializing or deserializing a batch record.
#[derive(Debug, thiserror::Error)]
pub enum SerializerError {
    /// A batch could not be encoded.
    #[error("failed to encode batch: {reason}")]
    Encode {
        /// Description of the encode failure.
        reason: String,
    },

    /// A stored record does not decode to a valid batch.
    #[error("corrupt record: {reason}")]
    Corrupt {
        /// Description of the decode failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_display() {
        let err = SerializerError::Encode {
            reason: "write failed".to_string(),
        };
        assert_eq!(err.to_string(), "failed to encode batch: write failed");
    }

    #[test]
    fn corrupt_display() {
        let err = SerializerError::Corrupt {
            reason: "invalid base64".to_string(),
        };
        assert!(err.to_string().contains("corrupt record"));
    }
}

//! Error types for row construction and transformation.

/// Errors produced when constructing or transforming row values.
///
/// All of these are synchronous construction-time failures surfaced to the
/// immediate caller. Equality checks never produce errors; comparing entries
/// of different variants is simply `false`.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    /// An entry was constructed with an empty name.
    #[error("entry name cannot be empty")]
    EmptyName,

    /// An object-flagged JSON entry was given a value that is not a
    /// string-keyed object.
    #[error("all keys for the JSON object entry {name:?} must be strings")]
    NonStringKeys {
        /// The entry name.
        name: String,
    },

    /// A JSON text could not be decoded.
    #[error("malformed JSON: {reason}")]
    MalformedJson {
        /// Description of the decode failure.
        reason: String,
    },

    /// A collection entry (array, json, object) was given a scalar value.
    #[error("entry {name:?} requires an array or object value")]
    NotCollection {
        /// The entry name.
        name: String,
    },

    /// A mapping function returned a value of a different variant than the
    /// entry it was applied to.
    #[error("mapped value must stay a {expected} entry, got {actual}")]
    VariantMismatch {
        /// The variant of the original entry.
        expected: &'static str,
        /// The variant the mapper produced.
        actual: &'static str,
    },

    /// An entry with the same name already exists in the collection.
    #[error("entry {name:?} already exists")]
    DuplicateName {
        /// The conflicting entry name.
        name: String,
    },

    /// An entry value could not be cast to the requested variant.
    #[error("cannot cast entry {name:?} from {from} to {to}")]
    Cast {
        /// The entry name.
        name: String,
        /// The variant of the source entry.
        from: &'static str,
        /// The requested target variant.
        to: &'static str,
    },
}

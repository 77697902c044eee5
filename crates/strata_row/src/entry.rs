//! A single named, typed, immutable value within a record.
//!
//! [`Entry`] pairs a non-empty name with an [`EntryValue`], a closed sum type
//! over every value kind the pipeline understands. Adding a variant is a
//! compile-time-checked change: equality, rendering, and casting all match
//! exhaustively.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::RowError;

/// The value stored inside an [`Entry`], one variant per supported kind.
///
/// Collection variants (`Array`, `Json`, `Object`) hold a [`serde_json::Value`]
/// and compare structurally: objects by key mapping regardless of insertion
/// order, arrays positionally. `Structure` holds nested entries and compares
/// them element-wise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryValue {
    /// The absence of a value.
    Null,
    /// A boolean value.
    Boolean {
        /// The stored boolean.
        value: bool,
    },
    /// A 64-bit signed integer.
    Integer {
        /// The stored integer.
        value: i64,
    },
    /// A 64-bit float.
    Float {
        /// The stored float.
        value: f64,
    },
    /// A UTF-8 string.
    String {
        /// The stored string.
        value: String,
    },
    /// A timezone-aware point in time.
    #[serde(rename = "datetime")]
    DateTime {
        /// The stored timestamp.
        value: DateTime<FixedOffset>,
    },
    /// An ordered collection, possibly nested and possibly string-keyed.
    Array {
        /// The stored collection.
        value: JsonValue,
    },
    /// A JSON document with an explicit object/array distinction.
    ///
    /// The `object` flag records whether the document carries object (string
    /// keyed) or array (positional) semantics; it is part of the serialized
    /// form but ignored by equality.
    Json {
        /// The stored document.
        value: JsonValue,
        /// `true` when the document has object semantics.
        object: bool,
    },
    /// An opaque structured value compared and serialized as-is.
    Object {
        /// The stored value.
        value: JsonValue,
    },
    /// A nested list of entries. Names inside a structure need not be unique.
    Structure {
        /// The contained entries, in order.
        entries: Vec<Entry>,
    },
}

impl EntryValue {
    /// Returns the lowercase variant name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            EntryValue::Null => "null",
            EntryValue::Boolean { .. } => "boolean",
            EntryValue::Integer { .. } => "integer",
            EntryValue::Float { .. } => "float",
            EntryValue::String { .. } => "string",
            EntryValue::DateTime { .. } => "datetime",
            EntryValue::Array { .. } => "array",
            EntryValue::Json { .. } => "json",
            EntryValue::Object { .. } => "object",
            EntryValue::Structure { .. } => "structure",
        }
    }
}

impl PartialEq for EntryValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EntryValue::Null, EntryValue::Null) => true,
            (EntryValue::Boolean { value: a }, EntryValue::Boolean { value: b }) => a == b,
            (EntryValue::Integer { value: a }, EntryValue::Integer { value: b }) => a == b,
            (EntryValue::Float { value: a }, EntryValue::Float { value: b }) => a == b,
            (EntryValue::String { value: a }, EntryValue::String { value: b }) => a == b,
            (EntryValue::DateTime { value: a }, EntryValue::DateTime { value: b }) => a == b,
            (EntryValue::Array { value: a }, EntryValue::Array { value: b }) => a == b,
            // The object flag is a rendering hint, not part of the value.
            (EntryValue::Json { value: a, .. }, EntryValue::Json { value: b, .. }) => a == b,
            (EntryValue::Object { value: a }, EntryValue::Object { value: b }) => a == b,
            (EntryValue::Structure { entries: a }, EntryValue::Structure { entries: b }) => a == b,
            _ => false,
        }
    }
}

/// A single named, typed, immutable value.
///
/// Entries are created by producers, owned by a [`Row`](crate::Row), and never
/// mutated in place: [`Entry::rename`] and [`Entry::map`] return new entries.
/// The serialized form is exactly `{name, type, value, ...variant flags}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    name: String,
    #[serde(flatten)]
    value: EntryValue,
}

impl Entry {
    fn build(name: impl Into<String>, value: EntryValue) -> Result<Self, RowError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RowError::EmptyName);
        }
        let entry = Self { name, value };
        entry.validate()?;
        Ok(entry)
    }

    /// Checks the variant-specific construction invariants.
    fn validate(&self) -> Result<(), RowError> {
        match &self.value {
            EntryValue::Array { value } if !value.is_array() && !value.is_object() => {
                Err(RowError::NotCollection {
                    name: self.name.clone(),
                })
            }
            EntryValue::Json { value, object } => match value {
                JsonValue::Object(_) => Ok(()),
                JsonValue::Array(_) if !object => Ok(()),
                JsonValue::Array(_) => Err(RowError::NonStringKeys {
                    name: self.name.clone(),
                }),
                _ => Err(RowError::NotCollection {
                    name: self.name.clone(),
                }),
            },
            _ => Ok(()),
        }
    }

    /// Creates a null entry.
    pub fn null(name: impl Into<String>) -> Result<Self, RowError> {
        Self::build(name, EntryValue::Null)
    }

    /// Creates a boolean entry.
    pub fn boolean(name: impl Into<String>, value: bool) -> Result<Self, RowError> {
        Self::build(name, EntryValue::Boolean { value })
    }

    /// Creates an integer entry.
    pub fn integer(name: impl Into<String>, value: i64) -> Result<Self, RowError> {
        Self::build(name, EntryValue::Integer { value })
    }

    /// Creates a float entry.
    pub fn float(name: impl Into<String>, value: f64) -> Result<Self, RowError> {
        Self::build(name, EntryValue::Float { value })
    }

    /// Creates a string entry.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Result<Self, RowError> {
        Self::build(
            name,
            EntryValue::String {
                value: value.into(),
            },
        )
    }

    /// Creates a datetime entry.
    pub fn datetime(
        name: impl Into<String>,
        value: DateTime<FixedOffset>,
    ) -> Result<Self, RowError> {
        Self::build(name, EntryValue::DateTime { value })
    }

    /// Creates an array entry. The value must be a collection (array or
    /// string-keyed object), not a scalar.
    pub fn array(name: impl Into<String>, value: JsonValue) -> Result<Self, RowError> {
        Self::build(name, EntryValue::Array { value })
    }

    /// Creates a JSON entry with array (positional) semantics.
    pub fn json(name: impl Into<String>, value: JsonValue) -> Result<Self, RowError> {
        let object = value.is_object();
        Self::build(name, EntryValue::Json { value, object })
    }

    /// Creates a JSON entry with object semantics.
    ///
    /// Fails with [`RowError::NonStringKeys`] when the value is a positional
    /// array rather than a string-keyed object.
    pub fn json_object(name: impl Into<String>, value: JsonValue) -> Result<Self, RowError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RowError::EmptyName);
        }
        match value {
            JsonValue::Object(_) => Self::build(name, EntryValue::Json { value, object: true }),
            JsonValue::Array(_) => Err(RowError::NonStringKeys { name }),
            _ => Err(RowError::NotCollection { name }),
        }
    }

    /// Decodes a JSON text into a JSON entry, inferring object semantics from
    /// the decoded document: a top-level object becomes object-flagged, a
    /// top-level array stays positional.
    pub fn json_from_string(name: impl Into<String>, json: &str) -> Result<Self, RowError> {
        let value: JsonValue =
            serde_json::from_str(json).map_err(|e| RowError::MalformedJson {
                reason: e.to_string(),
            })?;
        match value {
            JsonValue::Object(_) => Self::json_object(name, value),
            JsonValue::Array(_) => Self::json(name, value),
            _ => Err(RowError::NotCollection { name: name.into() }),
        }
    }

    /// Creates an opaque object entry.
    pub fn object(name: impl Into<String>, value: JsonValue) -> Result<Self, RowError> {
        Self::build(name, EntryValue::Object { value })
    }

    /// Creates a structure entry from nested entries.
    pub fn structure(name: impl Into<String>, entries: Vec<Entry>) -> Result<Self, RowError> {
        Self::build(name, EntryValue::Structure { entries })
    }

    /// Returns the entry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stored value.
    pub fn value(&self) -> &EntryValue {
        &self.value
    }

    /// Returns `true` when the entry has the given name.
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Returns a new entry with the same value and a new name.
    pub fn rename(&self, name: impl Into<String>) -> Result<Self, RowError> {
        Self::build(name, self.value.clone())
    }

    /// Applies `f` to the stored value and rebuilds the entry.
    ///
    /// The mapped value must stay the same variant; the variant's construction
    /// invariants are re-checked on the result.
    pub fn map<F>(&self, f: F) -> Result<Self, RowError>
    where
        F: FnOnce(EntryValue) -> EntryValue,
    {
        let mapped = f(self.value.clone());
        if std::mem::discriminant(&mapped) != std::mem::discriminant(&self.value) {
            return Err(RowError::VariantMismatch {
                expected: self.value.kind(),
                actual: mapped.kind(),
            });
        }
        Self::build(self.name.clone(), mapped)
    }

    /// Structural equality: same variant, same name, equal value.
    ///
    /// Comparing entries of different variants is `false`, never an error.
    pub fn is_equal(&self, other: &Entry) -> bool {
        self.name == other.name && self.value == other.value
    }

    /// Returns the canonical JSON text of a JSON entry.
    ///
    /// An empty object-flagged document renders `{}`. Returns `None` for
    /// every other variant.
    pub fn json_string(&self) -> Option<String> {
        match &self.value {
            EntryValue::Json { value, object } => {
                let empty = match value {
                    JsonValue::Object(map) => map.is_empty(),
                    JsonValue::Array(items) => items.is_empty(),
                    _ => false,
                };
                if empty && *object {
                    return Some("{}".to_string());
                }
                Some(value.to_string())
            }
            _ => None,
        }
    }

    /// Converts the stored value to its native JSON representation.
    ///
    /// JSON entries contribute their canonical text, structures contribute
    /// the nested list-of-entries form, everything else its natural scalar.
    pub fn to_native(&self) -> JsonValue {
        match &self.value {
            EntryValue::Null => JsonValue::Null,
            EntryValue::Boolean { value } => JsonValue::Bool(*value),
            EntryValue::Integer { value } => JsonValue::from(*value),
            EntryValue::Float { value } => JsonValue::from(*value),
            EntryValue::String { value } => JsonValue::String(value.clone()),
            EntryValue::DateTime { value } => JsonValue::String(value.to_rfc3339()),
            EntryValue::Array { value } => value.clone(),
            EntryValue::Json { .. } => {
                JsonValue::String(self.json_string().unwrap_or_default())
            }
            EntryValue::Object { value } => value.clone(),
            EntryValue::Structure { entries } => JsonValue::Array(
                entries
                    .iter()
                    .map(|e| serde_json::to_value(e).unwrap_or(JsonValue::Null))
                    .collect(),
            ),
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            EntryValue::Null => write!(f, "null"),
            EntryValue::Boolean { value } => write!(f, "{value}"),
            EntryValue::Integer { value } => write!(f, "{value}"),
            EntryValue::Float { value } => write!(f, "{value}"),
            EntryValue::String { value } => write!(f, "{value}"),
            EntryValue::DateTime { value } => write!(f, "{}", value.to_rfc3339()),
            EntryValue::Json { .. } => write!(f, "{}", self.json_string().unwrap_or_default()),
            EntryValue::Array { .. } | EntryValue::Object { .. } | EntryValue::Structure { .. } => {
                write!(f, "{}", self.to_native())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn empty_name_rejected() {
        assert!(matches!(Entry::integer("", 1), Err(RowError::EmptyName)));
        assert!(matches!(Entry::null(""), Err(RowError::EmptyName)));
        assert!(matches!(
            Entry::string("", "x"),
            Err(RowError::EmptyName)
        ));
    }

    #[test]
    fn rename_returns_new_entry() {
        let entry = Entry::integer("id", 7).unwrap();
        let renamed = entry.rename("identifier").unwrap();

        assert_eq!(entry.name(), "id");
        assert_eq!(renamed.name(), "identifier");
        assert_eq!(renamed.value(), entry.value());
    }

    #[test]
    fn rename_to_empty_fails() {
        let entry = Entry::integer("id", 7).unwrap();
        assert!(matches!(entry.rename(""), Err(RowError::EmptyName)));
    }

    #[test]
    fn map_same_variant() {
        let entry = Entry::integer("count", 2).unwrap();
        let doubled = entry
            .map(|v| match v {
                EntryValue::Integer { value } => EntryValue::Integer { value: value * 2 },
                other => other,
            })
            .unwrap();

        assert_eq!(doubled, Entry::integer("count", 4).unwrap());
        // Original untouched.
        assert_eq!(entry, Entry::integer("count", 2).unwrap());
    }

    #[test]
    fn map_variant_change_rejected() {
        let entry = Entry::integer("count", 2).unwrap();
        let result = entry.map(|_| EntryValue::String {
            value: "two".to_string(),
        });
        assert!(matches!(
            result,
            Err(RowError::VariantMismatch {
                expected: "integer",
                actual: "string"
            })
        ));
    }

    #[test]
    fn map_rechecks_invariants() {
        let entry = Entry::json_object("meta", json!({"a": 1})).unwrap();
        let result = entry.map(|_| EntryValue::Json {
            value: json!([1, 2]),
            object: true,
        });
        assert!(matches!(result, Err(RowError::NonStringKeys { .. })));
    }

    #[test]
    fn is_equal_reflexive() {
        let entries = vec![
            Entry::null("a").unwrap(),
            Entry::boolean("b", true).unwrap(),
            Entry::integer("c", -3).unwrap(),
            Entry::float("d", 1.5).unwrap(),
            Entry::string("e", "text").unwrap(),
            Entry::datetime("f", date("2020-07-13T15:00:00+00:00")).unwrap(),
            Entry::array("g", json!([1, [2], {"x": 3}])).unwrap(),
            Entry::json("h", json!({"k": "v"})).unwrap(),
            Entry::object("i", json!({"any": [1]})).unwrap(),
            Entry::structure("j", vec![Entry::integer("n", 1).unwrap()]).unwrap(),
        ];
        for entry in &entries {
            assert!(entry.is_equal(entry), "{} not reflexive", entry.name());
        }
    }

    #[test]
    fn different_variant_is_false_not_error() {
        let int = Entry::integer("x", 1).unwrap();
        let string = Entry::string("x", "1").unwrap();
        assert!(!int.is_equal(&string));
    }

    #[test]
    fn different_name_not_equal() {
        let a = Entry::integer("a", 1).unwrap();
        let b = Entry::integer("b", 1).unwrap();
        assert!(!a.is_equal(&b));
    }

    #[test]
    fn object_key_order_is_irrelevant() {
        let a = Entry::json("meta", json!({"a": 1, "b": 2})).unwrap();
        let b = Entry::json("meta", json!({"b": 2, "a": 1})).unwrap();
        assert!(a.is_equal(&b));
    }

    #[test]
    fn nested_difference_breaks_equality() {
        let a = Entry::json("meta", json!({"a": {"deep": 1}})).unwrap();
        let b = Entry::json("meta", json!({"a": {"deep": 2}})).unwrap();
        assert!(!a.is_equal(&b));
    }

    #[test]
    fn json_equality_ignores_object_flag() {
        let plain = Entry::json("meta", json!({"a": 1})).unwrap();
        let object = Entry::json_object("meta", json!({"a": 1})).unwrap();
        assert!(plain.is_equal(&object));
    }

    #[test]
    fn structure_compares_element_wise() {
        let a = Entry::structure(
            "items",
            vec![
                Entry::integer("1", 1).unwrap(),
                Entry::integer("2", 2).unwrap(),
            ],
        )
        .unwrap();
        let b = Entry::structure(
            "items",
            vec![
                Entry::integer("1", 1).unwrap(),
                Entry::integer("2", 2).unwrap(),
            ],
        )
        .unwrap();
        let c = Entry::structure(
            "items",
            vec![
                Entry::integer("1", 5).unwrap(),
                Entry::integer("2", 2).unwrap(),
            ],
        )
        .unwrap();

        assert!(a.is_equal(&b));
        assert!(!a.is_equal(&c));
    }

    #[test]
    fn empty_object_renders_braces() {
        let entry = Entry::json_object("meta", json!({})).unwrap();
        assert_eq!(entry.json_string().unwrap(), "{}");
        assert_eq!(entry.to_string(), "{}");
    }

    #[test]
    fn positional_json_renders_array_text() {
        let entry = Entry::json("list", json!([1, 2, 3])).unwrap();
        assert_eq!(entry.json_string().unwrap(), "[1,2,3]");
    }

    #[test]
    fn json_object_rejects_positional_keys() {
        assert!(matches!(
            Entry::json_object("meta", json!([1, 2])),
            Err(RowError::NonStringKeys { .. })
        ));
    }

    #[test]
    fn collection_constructors_reject_scalars() {
        assert!(matches!(
            Entry::array("a", json!(5)),
            Err(RowError::NotCollection { .. })
        ));
        assert!(matches!(
            Entry::json("a", json!("text")),
            Err(RowError::NotCollection { .. })
        ));
    }

    #[test]
    fn json_from_string_infers_object_flag() {
        let object = Entry::json_from_string("meta", r#"{"a": 1}"#).unwrap();
        assert!(matches!(
            object.value(),
            EntryValue::Json { object: true, .. }
        ));

        let array = Entry::json_from_string("list", "[[1], [2]]").unwrap();
        assert!(matches!(
            array.value(),
            EntryValue::Json { object: false, .. }
        ));
    }

    #[test]
    fn json_from_string_rejects_garbage() {
        assert!(matches!(
            Entry::json_from_string("meta", "{not json"),
            Err(RowError::MalformedJson { .. })
        ));
    }

    #[test]
    fn serialized_form_is_name_type_value() {
        let entry = Entry::integer("id", 42).unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value, json!({"name": "id", "type": "integer", "value": 42}));
    }

    #[test]
    fn serialized_json_entry_carries_object_flag() {
        let entry = Entry::json_object("meta", json!({"a": 1})).unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({"name": "meta", "type": "json", "value": {"a": 1}, "object": true})
        );
    }

    #[test]
    fn serde_roundtrip_every_variant() {
        let entries = vec![
            Entry::null("a").unwrap(),
            Entry::boolean("b", false).unwrap(),
            Entry::integer("c", i64::MIN).unwrap(),
            Entry::float("d", -0.25).unwrap(),
            Entry::string("e", "line\nbreak").unwrap(),
            Entry::datetime("f", date("2020-07-13T15:00:00+02:00")).unwrap(),
            Entry::array("g", json!({"k": [1, 2]})).unwrap(),
            Entry::json_object("h", json!({})).unwrap(),
            Entry::object("i", json!("opaque")).unwrap(),
            Entry::structure("j", vec![Entry::string("s", "x").unwrap()]).unwrap(),
        ];
        for entry in entries {
            let text = serde_json::to_string(&entry).unwrap();
            let back: Entry = serde_json::from_str(&text).unwrap();
            assert!(entry.is_equal(&back), "{} did not roundtrip", entry.name());
        }
    }

    #[test]
    fn object_flag_survives_roundtrip() {
        let entry = Entry::json_object("meta", json!({})).unwrap();
        let text = serde_json::to_string(&entry).unwrap();
        let back: Entry = serde_json::from_str(&text).unwrap();
        assert_eq!(back.json_string().unwrap(), "{}");
    }

    #[test]
    fn display_projections() {
        assert_eq!(Entry::null("n").unwrap().to_string(), "null");
        assert_eq!(Entry::integer("i", 9).unwrap().to_string(), "9");
        assert_eq!(Entry::string("s", "abc").unwrap().to_string(), "abc");
        assert_eq!(
            Entry::array("a", json!([1, 2])).unwrap().to_string(),
            "[1,2]"
        );
    }

    #[test]
    fn to_native_scalars() {
        assert_eq!(Entry::integer("i", 3).unwrap().to_native(), json!(3));
        assert_eq!(Entry::null("n").unwrap().to_native(), JsonValue::Null);
        assert_eq!(
            Entry::json("j", json!({"a": 1})).unwrap().to_native(),
            json!(r#"{"a":1}"#)
        );
    }
}

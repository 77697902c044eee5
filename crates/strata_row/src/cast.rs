//! Entry casting between value variants.
//!
//! Casts rebuild an entry as a different variant while keeping its name, and
//! apply row-wide over a list of entry names. Absent names are skipped;
//! `nullable` additionally skips null entries instead of failing on them.

use chrono::DateTime;

use crate::entry::{Entry, EntryValue};
use crate::error::RowError;
use crate::row::Row;

/// A target variant for an entry cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryCast {
    /// Cast to a string entry.
    ToString,
    /// Cast to an integer entry (strings parse, floats truncate).
    ToInteger,
    /// Cast to a float entry.
    ToFloat,
    /// Cast to a JSON entry (strings decode, arrays re-flag).
    ToJson,
    /// Cast to an array entry.
    ToArray,
    /// Cast to a datetime entry (strings parse as RFC 3339).
    ToDateTime,
}

impl EntryCast {
    fn target(self) -> &'static str {
        match self {
            EntryCast::ToString => "string",
            EntryCast::ToInteger => "integer",
            EntryCast::ToFloat => "float",
            EntryCast::ToJson => "json",
            EntryCast::ToArray => "array",
            EntryCast::ToDateTime => "datetime",
        }
    }
}

/// Casts the named entries of a row to the given variant.
///
/// Returns a new row with each named entry replaced in position. Names not
/// present in the row are skipped. With `nullable` set, null entries are
/// left as-is instead of producing a cast error.
pub fn cast_entries(
    row: &Row,
    names: &[&str],
    cast: EntryCast,
    nullable: bool,
) -> Result<Row, RowError> {
    let mut row = row.clone();
    for name in names {
        let Some(entry) = row.get(name) else {
            continue;
        };
        if nullable && matches!(entry.value(), EntryValue::Null) {
            continue;
        }
        let casted = cast_entry(entry, cast)?;
        row = row.set(casted);
    }
    Ok(row)
}

/// Casts a single entry to the given variant, keeping its name.
pub fn cast_entry(entry: &Entry, cast: EntryCast) -> Result<Entry, RowError> {
    let fail = || RowError::Cast {
        name: entry.name().to_string(),
        from: entry.value().kind(),
        to: cast.target(),
    };
    let name = entry.name();

    match cast {
        EntryCast::ToString => {
            let text = match entry.value() {
                EntryValue::String { value } => value.clone(),
                EntryValue::Integer { value } => value.to_string(),
                EntryValue::Float { value } => value.to_string(),
                EntryValue::Boolean { value } => value.to_string(),
                EntryValue::DateTime { value } => value.to_rfc3339(),
                EntryValue::Json { .. } => entry.json_string().unwrap_or_default(),
                EntryValue::Array { value } | EntryValue::Object { value } => value.to_string(),
                EntryValue::Null | EntryValue::Structure { .. } => return Err(fail()),
            };
            Entry::string(name, text)
        }
        EntryCast::ToInteger => {
            let value = match entry.value() {
                EntryValue::Integer { value } => *value,
                EntryValue::Float { value } => *value as i64,
                EntryValue::Boolean { value } => i64::from(*value),
                EntryValue::String { value } => {
                    value.trim().parse::<i64>().map_err(|_| fail())?
                }
                _ => return Err(fail()),
            };
            Entry::integer(name, value)
        }
        EntryCast::ToFloat => {
            let value = match entry.value() {
                EntryValue::Float { value } => *value,
                EntryValue::Integer { value } => *value as f64,
                EntryValue::Boolean { value } => f64::from(u8::from(*value)),
                EntryValue::String { value } => {
                    value.trim().parse::<f64>().map_err(|_| fail())?
                }
                _ => return Err(fail()),
            };
            Entry::float(name, value)
        }
        EntryCast::ToJson => match entry.value() {
            EntryValue::Json { .. } => Ok(entry.clone()),
            EntryValue::Array { value } | EntryValue::Object { value }
                if value.is_array() || value.is_object() =>
            {
                Entry::json(name, value.clone())
            }
            EntryValue::String { value } => {
                Entry::json_from_string(name, value).map_err(|_| fail())
            }
            _ => Err(fail()),
        },
        EntryCast::ToArray => match entry.value() {
            EntryValue::Array { .. } => Ok(entry.clone()),
            EntryValue::Json { value, .. } => Entry::array(name, value.clone()),
            EntryValue::Object { value } if value.is_array() || value.is_object() => {
                Entry::array(name, value.clone())
            }
            _ => Err(fail()),
        },
        EntryCast::ToDateTime => match entry.value() {
            EntryValue::DateTime { .. } => Ok(entry.clone()),
            EntryValue::String { value } => {
                let parsed = DateTime::parse_from_rfc3339(value.trim()).map_err(|_| fail())?;
                Entry::datetime(name, parsed)
            }
            _ => Err(fail()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_to_integer() {
        let row = Row::create(vec![Entry::string("id", " 42 ").unwrap()]);
        let casted = cast_entries(&row, &["id"], EntryCast::ToInteger, false).unwrap();
        assert_eq!(casted.get("id"), Some(&Entry::integer("id", 42).unwrap()));
    }

    #[test]
    fn float_truncates_to_integer() {
        let row = Row::create(vec![Entry::float("n", 3.9).unwrap()]);
        let casted = cast_entries(&row, &["n"], EntryCast::ToInteger, false).unwrap();
        assert_eq!(casted.get("n"), Some(&Entry::integer("n", 3).unwrap()));
    }

    #[test]
    fn unparsable_string_fails() {
        let row = Row::create(vec![Entry::string("id", "not a number").unwrap()]);
        let result = cast_entries(&row, &["id"], EntryCast::ToInteger, false);
        assert!(matches!(result, Err(RowError::Cast { .. })));
    }

    #[test]
    fn nullable_skips_null_entries() {
        let row = Row::create(vec![Entry::null("id").unwrap()]);
        let casted = cast_entries(&row, &["id"], EntryCast::ToInteger, true).unwrap();
        assert_eq!(casted.get("id"), Some(&Entry::null("id").unwrap()));

        let strict = cast_entries(&row, &["id"], EntryCast::ToInteger, false);
        assert!(matches!(strict, Err(RowError::Cast { .. })));
    }

    #[test]
    fn absent_names_are_skipped() {
        let row = Row::create(vec![Entry::integer("id", 1).unwrap()]);
        let casted = cast_entries(&row, &["missing"], EntryCast::ToString, false).unwrap();
        assert_eq!(casted, row);
    }

    #[test]
    fn cast_preserves_position() {
        let row = Row::create(vec![
            Entry::string("a", "1").unwrap(),
            Entry::string("b", "2").unwrap(),
        ]);
        let casted = cast_entries(&row, &["a"], EntryCast::ToInteger, false).unwrap();
        let names: Vec<&str> = casted.entries().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn string_to_json_infers_object() {
        let row = Row::create(vec![Entry::string("meta", r#"{"a": 1}"#).unwrap()]);
        let casted = cast_entries(&row, &["meta"], EntryCast::ToJson, false).unwrap();
        assert!(matches!(
            casted.get("meta").unwrap().value(),
            EntryValue::Json { object: true, .. }
        ));
    }

    #[test]
    fn json_to_array_and_back() {
        let entry = Entry::json("list", json!([1, 2])).unwrap();
        let array = cast_entry(&entry, EntryCast::ToArray).unwrap();
        assert!(matches!(array.value(), EntryValue::Array { .. }));

        let json = cast_entry(&array, EntryCast::ToJson).unwrap();
        assert!(matches!(json.value(), EntryValue::Json { .. }));
    }

    #[test]
    fn string_to_datetime() {
        let entry = Entry::string("at", "2020-07-13T15:00:00+00:00").unwrap();
        let casted = cast_entry(&entry, EntryCast::ToDateTime).unwrap();
        assert!(matches!(casted.value(), EntryValue::DateTime { .. }));

        let bad = Entry::string("at", "tomorrow").unwrap();
        assert!(cast_entry(&bad, EntryCast::ToDateTime).is_err());
    }

    #[test]
    fn datetime_to_string_is_rfc3339() {
        let at = DateTime::parse_from_rfc3339("2020-07-13T15:00:00+02:00").unwrap();
        let entry = Entry::datetime("at", at).unwrap();
        let casted = cast_entry(&entry, EntryCast::ToString).unwrap();
        assert_eq!(
            casted,
            Entry::string("at", "2020-07-13T15:00:00+02:00").unwrap()
        );
    }

    #[test]
    fn structure_to_string_fails() {
        let entry = Entry::structure("s", vec![]).unwrap();
        assert!(matches!(
            cast_entry(&entry, EntryCast::ToString),
            Err(RowError::Cast { .. })
        ));
    }
}

//! Field-level validation.
//!
//! [`Field::validate`] is the one place constraints are checked. The decoder
//! calls it on every value it produces, before the value is stored, so each
//! failure can be reported with the same provenance regardless of kind.
//!
//! Validation is shallow: collection items and nested object fields are
//! validated on their own when they are decoded.

use crate::error::Violation;
use crate::field::{Field, FieldDescriptor};
use crate::kind::FieldKind;
use crate::value::{Value, format_datetime};

impl Field {
    /// Checks `value` against this field's kind and constraints.
    pub fn validate(&self, value: &Value) -> Result<(), Violation> {
        if value.is_absent() {
            return if self.is_required() {
                Err(Violation::Required)
            } else {
                Ok(())
            };
        }

        match self.descriptor() {
            FieldDescriptor::Text(rules) => {
                let Value::Text(text) = value else {
                    return Err(kind_mismatch(FieldKind::Text, value));
                };
                check_length(text.chars().count(), rules.min_length, rules.max_length)
            }
            FieldDescriptor::Integer(rules) => {
                let Value::Integer(n) = value else {
                    return Err(kind_mismatch(FieldKind::Integer, value));
                };
                if let Some(min) = rules.min.filter(|min| n < min) {
                    return Err(Violation::TooSmall { value: *n, min });
                }
                if let Some(max) = rules.max.filter(|max| n > max) {
                    return Err(Violation::TooLarge { value: *n, max });
                }
                Ok(())
            }
            FieldDescriptor::Datetime(rules) => {
                let Value::Datetime(dt) = value else {
                    return Err(kind_mismatch(FieldKind::Datetime, value));
                };
                if let Some(min) = rules.min.as_ref().filter(|min| dt < *min) {
                    return Err(Violation::TooEarly {
                        value: format_datetime(dt),
                        min: format_datetime(min),
                    });
                }
                if let Some(max) = rules.max.as_ref().filter(|max| dt > *max) {
                    return Err(Violation::TooLate {
                        value: format_datetime(dt),
                        max: format_datetime(max),
                    });
                }
                Ok(())
            }
            FieldDescriptor::Choice(choice) => {
                // Raw text is accepted too: it is what the choice is spelled as.
                let (Value::Choice(s) | Value::Text(s)) = value else {
                    return Err(kind_mismatch(FieldKind::Choice, value));
                };
                if choice.contains(s) {
                    Ok(())
                } else {
                    Err(Violation::NotInChoice {
                        value: s.clone(),
                        allowed: choice.values.clone(),
                    })
                }
            }
            FieldDescriptor::Object(_) => match value {
                Value::Object(_) => Ok(()),
                other => Err(kind_mismatch(FieldKind::Object, other)),
            },
            FieldDescriptor::List(rules) => match value {
                Value::List(items) => check_length(items.len(), rules.min_length, rules.max_length),
                other => Err(kind_mismatch(FieldKind::List, other)),
            },
            FieldDescriptor::Set(rules) => match value {
                Value::Set(items) => check_length(items.len(), rules.min_length, rules.max_length),
                other => Err(kind_mismatch(FieldKind::Set, other)),
            },
        }
    }
}

fn kind_mismatch(expected: FieldKind, value: &Value) -> Violation {
    Violation::KindMismatch {
        expected,
        found: value.kind_name().to_string(),
    }
}

fn check_length(length: usize, min: Option<usize>, max: Option<usize>) -> Result<(), Violation> {
    if let Some(min) = min.filter(|&min| length < min) {
        return Err(Violation::TooShort { length, min });
    }
    if let Some(max) = max.filter(|&max| length > max) {
        return Err(Violation::TooLong { length, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{CollectionField, DatetimeField, IntegerField, TextField};
    use crate::record::Record;
    use chrono::DateTime;

    #[test]
    fn test_absent_passes_unless_required() {
        assert_eq!(Field::integer("n").validate(&Value::Absent), Ok(()));
        assert_eq!(
            Field::integer("n").required().validate(&Value::Absent),
            Err(Violation::Required)
        );
    }

    #[test]
    fn test_choice_membership() {
        let field = Field::choice("color", ["red", "green", "blue"]);
        assert_eq!(field.validate(&Value::choice("red")), Ok(()));
        assert_eq!(
            field.validate(&Value::choice("purple")),
            Err(Violation::NotInChoice {
                value: "purple".to_string(),
                allowed: vec!["red".into(), "green".into(), "blue".into()],
            })
        );
    }

    #[test]
    fn test_integer_bounds() {
        let field = Field::new(
            "percent",
            FieldDescriptor::Integer(IntegerField {
                min: Some(0),
                max: Some(100),
            }),
        );
        assert_eq!(field.validate(&Value::Integer(100)), Ok(()));
        assert_eq!(
            field.validate(&Value::Integer(-1)),
            Err(Violation::TooSmall { value: -1, min: 0 })
        );
        assert_eq!(
            field.validate(&Value::Integer(101)),
            Err(Violation::TooLarge { value: 101, max: 100 })
        );
    }

    #[test]
    fn test_text_length_counts_chars() {
        let field = Field::new(
            "code",
            FieldDescriptor::Text(TextField {
                min_length: Some(2),
                max_length: Some(3),
            }),
        );
        assert_eq!(field.validate(&Value::text("äöü")), Ok(()));
        assert_eq!(
            field.validate(&Value::text("a")),
            Err(Violation::TooShort { length: 1, min: 2 })
        );
        assert_eq!(
            field.validate(&Value::text("abcd")),
            Err(Violation::TooLong { length: 4, max: 3 })
        );
    }

    #[test]
    fn test_datetime_bounds() {
        let min = DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap();
        let field = Field::new(
            "at",
            FieldDescriptor::Datetime(DatetimeField {
                min: Some(min),
                max: None,
            }),
        );
        let early = DateTime::parse_from_rfc3339("2023-12-31T23:59:59+00:00").unwrap();
        assert!(matches!(
            field.validate(&Value::Datetime(early)),
            Err(Violation::TooEarly { .. })
        ));
        assert_eq!(field.validate(&Value::Datetime(min)), Ok(()));
    }

    #[test]
    fn test_collection_length() {
        let field = Field::new(
            "tags",
            FieldDescriptor::List(CollectionField {
                min_length: Some(1),
                ..CollectionField::new(Field::text("tag"))
            }),
        );
        assert_eq!(
            field.validate(&Value::List(Vec::new())),
            Err(Violation::TooShort { length: 0, min: 1 })
        );
        assert_eq!(field.validate(&Value::list(["a"])), Ok(()));
    }

    #[test]
    fn test_kind_mismatch() {
        assert_eq!(
            Field::text("t").validate(&Value::Integer(1)),
            Err(Violation::KindMismatch {
                expected: FieldKind::Text,
                found: "integer".to_string(),
            })
        );
        assert!(matches!(
            Field::set("s", Field::integer("i")).validate(&Value::list([1])),
            Err(Violation::KindMismatch { .. })
        ));
        assert_eq!(
            Field::list("l", Field::integer("i")).validate(&Value::Object(Record::new())),
            Err(Violation::KindMismatch {
                expected: FieldKind::List,
                found: "object".to_string(),
            })
        );
    }
}

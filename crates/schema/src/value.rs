//! Field values exchanged between instances and the codec.

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::error::InstanceError;
use crate::kind::FieldKind;
use crate::record::Record;

/// The value of one field.
///
/// `Absent` is the explicit "no value" state of an optional field. It is
/// distinct from `Text(String::new())` and `Integer(0)`.
///
/// Values are totally ordered, which gives `Set` a stable iteration order.
/// Datetimes compare and hash by instant, so two values naming the same moment
/// in different offsets are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    #[default]
    Absent,
    Text(String),
    Integer(i64),
    Datetime(DateTime<FixedOffset>),
    Choice(String),
    Object(Record),
    List(Vec<Value>),
    Set(BTreeSet<Value>),
}

impl Value {
    /// Creates a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Creates a choice value.
    pub fn choice(s: impl Into<String>) -> Self {
        Value::Choice(s.into())
    }

    /// Creates a list value from anything convertible into values.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Creates a set value, collapsing duplicates.
    pub fn set<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// The kind this value belongs to, or `None` for [`Value::Absent`].
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            Value::Absent => None,
            Value::Text(_) => Some(FieldKind::Text),
            Value::Integer(_) => Some(FieldKind::Integer),
            Value::Datetime(_) => Some(FieldKind::Datetime),
            Value::Choice(_) => Some(FieldKind::Choice),
            Value::Object(_) => Some(FieldKind::Object),
            Value::List(_) => Some(FieldKind::List),
            Value::Set(_) => Some(FieldKind::Set),
        }
    }

    /// Short name of the value's kind for error messages.
    pub fn kind_name(&self) -> &'static str {
        self.kind().map(|k| k.as_str()).unwrap_or("absent")
    }

    /// Borrows the string payload of a `Text` or `Choice` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Choice(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::Datetime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Record> {
        match self {
            Value::Object(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&BTreeSet<Value>> {
        match self {
            Value::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Number of items held by a `List` or `Set`.
    pub fn item_count(&self) -> Option<usize> {
        match self {
            Value::List(items) => Some(items.len()),
            Value::Set(items) => Some(items.len()),
            _ => None,
        }
    }

    fn mismatch(&self, field: &str, expected: FieldKind) -> InstanceError {
        InstanceError::TypeMismatch {
            field: field.to_string(),
            expected,
            found: self.kind_name().to_string(),
        }
    }

    /// Unwraps a `Text` value for a typed setter. `Absent` yields `None`.
    pub fn into_text(self, field: &str) -> Result<Option<String>, InstanceError> {
        match self {
            Value::Absent => Ok(None),
            Value::Text(s) => Ok(Some(s)),
            other => Err(other.mismatch(field, FieldKind::Text)),
        }
    }

    /// Unwraps an `Integer` value for a typed setter. `Absent` yields `None`.
    pub fn into_integer(self, field: &str) -> Result<Option<i64>, InstanceError> {
        match self {
            Value::Absent => Ok(None),
            Value::Integer(n) => Ok(Some(n)),
            other => Err(other.mismatch(field, FieldKind::Integer)),
        }
    }

    /// Unwraps a `Datetime` value for a typed setter. `Absent` yields `None`.
    pub fn into_datetime(
        self,
        field: &str,
    ) -> Result<Option<DateTime<FixedOffset>>, InstanceError> {
        match self {
            Value::Absent => Ok(None),
            Value::Datetime(dt) => Ok(Some(dt)),
            other => Err(other.mismatch(field, FieldKind::Datetime)),
        }
    }

    /// Unwraps a `Choice` value for a typed setter. `Absent` yields `None`.
    pub fn into_choice(self, field: &str) -> Result<Option<String>, InstanceError> {
        match self {
            Value::Absent => Ok(None),
            Value::Choice(s) => Ok(Some(s)),
            other => Err(other.mismatch(field, FieldKind::Choice)),
        }
    }

    /// Unwraps an `Object` value for a typed setter. `Absent` yields `None`.
    pub fn into_object(self, field: &str) -> Result<Option<Record>, InstanceError> {
        match self {
            Value::Absent => Ok(None),
            Value::Object(record) => Ok(Some(record)),
            other => Err(other.mismatch(field, FieldKind::Object)),
        }
    }

    /// Unwraps a collection into an ordered vector. `Absent` yields an empty
    /// vector and a `Set` yields its items in ascending order.
    pub fn into_list(self, field: &str) -> Result<Vec<Value>, InstanceError> {
        match self {
            Value::Absent => Ok(Vec::new()),
            Value::List(items) => Ok(items),
            Value::Set(items) => Ok(items.into_iter().collect()),
            other => Err(other.mismatch(field, FieldKind::List)),
        }
    }

    /// Unwraps a collection into a set. `Absent` yields an empty set.
    pub fn into_set(self, field: &str) -> Result<BTreeSet<Value>, InstanceError> {
        match self {
            Value::Absent => Ok(BTreeSet::new()),
            Value::Set(items) => Ok(items),
            Value::List(items) => Ok(items.into_iter().collect()),
            other => Err(other.mismatch(field, FieldKind::Set)),
        }
    }
}

/// Text form of a datetime: RFC 3339 with a numeric offset, never `Z`.
///
/// RFC 3339 offsets stop at minutes. An offset with a seconds part is written
/// as `+HH:MM:SS` so the instant survives a round trip.
pub fn format_datetime(dt: &DateTime<FixedOffset>) -> String {
    if dt.offset().local_minus_utc() % 60 == 0 {
        dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.f%::z").to_string()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::Datetime(dt)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Absent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_is_distinct_from_empty_values() {
        assert_ne!(Value::Absent, Value::text(""));
        assert_ne!(Value::Absent, Value::Integer(0));
        assert!(Value::Absent.is_absent());
        assert_eq!(Value::from(None::<i64>), Value::Absent);
    }

    #[test]
    fn test_set_collapses_duplicates_in_ascending_order() {
        let set = Value::set([3, 1, 2, 2, 1]);
        let items: Vec<_> = set
            .as_set()
            .unwrap()
            .iter()
            .filter_map(Value::as_integer)
            .collect();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_datetimes_compare_by_instant() {
        let utc = DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap();
        let cet = DateTime::parse_from_rfc3339("2024-01-01T01:00:00+01:00").unwrap();
        assert_eq!(Value::from(utc), Value::from(cet));
    }

    #[test]
    fn test_format_datetime_keeps_offset_seconds() {
        let whole = DateTime::parse_from_rfc3339("2024-01-01T00:00:00.5Z").unwrap();
        assert_eq!(format_datetime(&whole), "2024-01-01T00:00:00.500+00:00");

        let offset = FixedOffset::west_opt(3600 + 75).unwrap();
        let odd = whole.with_timezone(&offset);
        assert_eq!(format_datetime(&odd), "2023-12-31T22:58:45.500-01:01:15");
    }

    #[test]
    fn test_typed_unwrapping() {
        assert_eq!(Value::text("x").into_text("f"), Ok(Some("x".to_string())));
        assert_eq!(Value::Absent.into_integer("f"), Ok(None));
        assert_eq!(
            Value::Integer(1).into_text("f"),
            Err(InstanceError::TypeMismatch {
                field: "f".to_string(),
                expected: FieldKind::Text,
                found: "integer".to_string(),
            })
        );
        assert_eq!(
            Value::set([2, 1]).into_list("f").unwrap(),
            vec![Value::Integer(1), Value::Integer(2)]
        );
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(Value::Absent.kind_name(), "absent");
        assert_eq!(Value::list([1]).kind_name(), "list");
        assert_eq!(Value::choice("red").kind(), Some(FieldKind::Choice));
    }
}

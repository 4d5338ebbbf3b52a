//! Generic dynamic instance.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::InstanceError;
use crate::instance::{Conformance, Instance};
use crate::schema::Schema;
use crate::value::Value;

/// A schema-less bag of field values.
///
/// The decoder allocates one of these for every nested object field, and it
/// doubles as a ready-made [`Instance`] for callers without a concrete type.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Record {
    values: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Conformance::is_empty")]
    conformance: Conformance,
}

impl Record {
    /// Creates a record with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an empty instance for `schema`: every declared field is
    /// present and holds [`Value::Absent`].
    pub fn for_schema(schema: &Schema) -> Self {
        let values = schema
            .field_names()
            .map(|name| (name.to_string(), Value::Absent))
            .collect();
        Self {
            values,
            conformance: Conformance::new(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Inserts a value, returning the previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(field.into(), value.into())
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.values.remove(field)
    }

    /// Field names in ascending order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn conformance(&self) -> &Conformance {
        &self.conformance
    }
}

impl Instance for Record {
    fn get(&self, field: &str) -> Option<Cow<'_, Value>> {
        self.values.get(field).map(Cow::Borrowed)
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), InstanceError> {
        self.values.insert(field.to_string(), value);
        Ok(())
    }

    fn mark_conforms(&mut self, schema: &str) {
        self.conformance.mark(schema);
    }

    fn conforms_to(&self, schema: &str) -> bool {
        self.conformance.contains(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    #[test]
    fn test_for_schema_preallocates_absent_fields() {
        let schema = Schema::builder("IPoint")
            .field(Field::integer("x"))
            .field(Field::integer("y"))
            .build()
            .unwrap();

        let record = Record::for_schema(&schema);
        assert_eq!(record.len(), 2);
        assert_eq!(record.value("x"), Some(&Value::Absent));
        assert!(record.get("z").is_none());
        assert!(!record.conforms_to("IPoint"));
    }

    #[test]
    fn test_instance_roundtrip_through_trait() {
        let mut record = Record::new().with("name", "Ada");
        record.set("age", Value::Integer(36)).unwrap();
        record.mark_conforms("IPerson");

        assert_eq!(record.get("name").as_deref(), Some(&Value::text("Ada")));
        assert_eq!(record.get("age").as_deref(), Some(&Value::Integer(36)));
        assert!(record.conforms_to("IPerson"));
        assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["age", "name"]);
    }

    #[test]
    fn test_record_json_roundtrip() {
        let born = chrono::DateTime::parse_from_rfc3339("2024-03-05T10:20:30+02:00").unwrap();
        let mut record = Record::new()
            .with("a", Value::Absent)
            .with("b", born)
            .with("c", Value::set([2, 1]))
            .with("d", Record::new().with("n", 1));
        record.mark_conforms("IX");
        let value = Value::Object(record);

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"kind":"object","value":{"values":{"#,
                r#""a":{"kind":"absent"},"#,
                r#""b":{"kind":"datetime","value":"2024-03-05T10:20:30+02:00"},"#,
                r#""c":{"kind":"set","value":[{"kind":"integer","value":1},{"kind":"integer","value":2}]},"#,
                r#""d":{"kind":"object","value":{"values":{"n":{"kind":"integer","value":1}}}}"#,
                r#"},"conformance":["IX"]}}"#,
            )
        );

        let decoded: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, value);
        let decoded = decoded.as_object().unwrap();
        assert!(decoded.conforms_to("IX"));
        assert_eq!(decoded.value("b").and_then(Value::as_datetime), Some(&born));
        assert!(decoded.value("d").and_then(Value::as_object).unwrap().conformance().is_empty());
    }
}

//! Field descriptors.
//!
//! A [`Field`] couples a name with a [`FieldDescriptor`], the tagged union of
//! per-kind metadata. Descriptors are immutable once a schema is built.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use crate::kind::FieldKind;
use crate::schema::Schema;

/// Constraints for text fields. Lengths count `char`s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

/// Inclusive bounds for integer fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegerField {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// Inclusive bounds for datetime fields, compared as instants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatetimeField {
    pub min: Option<DateTime<FixedOffset>>,
    pub max: Option<DateTime<FixedOffset>>,
}

/// The closed set of values a choice field accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceField {
    pub values: Vec<String>,
}

impl ChoiceField {
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// A nested object described by its own schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectField {
    pub schema: Arc<Schema>,
}

/// A homogeneous collection.
///
/// `value_type` describes every item. Its name is the tag of every item
/// element, so it has to be a valid element name like any other field name.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionField {
    pub value_type: Box<Field>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl CollectionField {
    pub fn new(value_type: Field) -> Self {
        Self {
            value_type: Box::new(value_type),
            min_length: None,
            max_length: None,
        }
    }
}

/// Kind-specific metadata of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDescriptor {
    Text(TextField),
    Integer(IntegerField),
    Datetime(DatetimeField),
    Choice(ChoiceField),
    Object(ObjectField),
    List(CollectionField),
    Set(CollectionField),
}

impl FieldDescriptor {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldDescriptor::Text(_) => FieldKind::Text,
            FieldDescriptor::Integer(_) => FieldKind::Integer,
            FieldDescriptor::Datetime(_) => FieldKind::Datetime,
            FieldDescriptor::Choice(_) => FieldKind::Choice,
            FieldDescriptor::Object(_) => FieldKind::Object,
            FieldDescriptor::List(_) => FieldKind::List,
            FieldDescriptor::Set(_) => FieldKind::Set,
        }
    }
}

/// One named field of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    descriptor: FieldDescriptor,
    required: bool,
}

impl Field {
    /// Creates an optional field.
    pub fn new(name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
            required: false,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldDescriptor::Text(TextField::default()))
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldDescriptor::Integer(IntegerField::default()))
    }

    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, FieldDescriptor::Datetime(DatetimeField::default()))
    }

    pub fn choice<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            FieldDescriptor::Choice(ChoiceField {
                values: values.into_iter().map(Into::into).collect(),
            }),
        )
    }

    pub fn object(name: impl Into<String>, schema: impl Into<Arc<Schema>>) -> Self {
        Self::new(
            name,
            FieldDescriptor::Object(ObjectField {
                schema: schema.into(),
            }),
        )
    }

    /// A list whose items are described by `value_type`.
    pub fn list(name: impl Into<String>, value_type: Field) -> Self {
        Self::new(name, FieldDescriptor::List(CollectionField::new(value_type)))
    }

    /// A set whose items are described by `value_type`.
    pub fn set(name: impl Into<String>, value_type: Field) -> Self {
        Self::new(name, FieldDescriptor::Set(CollectionField::new(value_type)))
    }

    /// Marks the field as required: an absent value fails validation.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn kind(&self) -> FieldKind {
        self.descriptor.kind()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

//! Error types for schema construction, instance access and field validation.
//!
//! Three separate enums because they are raised at different times:
//! [`SchemaError`] while a schema is being built, [`InstanceError`] when an
//! [`Instance`](crate::Instance) refuses a read or write, and [`Violation`]
//! when a value fails the constraints of its field.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::kind::FieldKind;

/// Errors raised while constructing a [`Schema`](crate::Schema).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two fields of one schema share a name.
    #[error("duplicate field '{field}' in schema {schema}")]
    DuplicateField { schema: String, field: String },

    /// The field name cannot be used as an XML element tag.
    #[error("invalid field name {field:?} in schema {schema}: not a valid XML element name")]
    InvalidFieldName { schema: String, field: String },

    /// A choice field was declared without any allowed value.
    #[error("choice field '{field}' declares no allowed values")]
    EmptyChoice { field: String },

    /// The schema identifier is empty.
    #[error("schema name must not be empty")]
    EmptySchemaName,
}

/// Errors raised by an [`Instance`](crate::Instance) accessor or mutator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    /// The instance has no field with this name.
    #[error("instance has no field '{field}'")]
    UnknownField { field: String },

    /// The instance cannot store a value of this kind in the field.
    #[error("field '{field}' cannot hold a {found} value (expected {expected})")]
    TypeMismatch {
        field: String,
        expected: FieldKind,
        found: String,
    },
}

/// A value that does not satisfy the constraints of its field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("a value is required")]
    Required,

    #[error("expected a {expected} value, found {found}")]
    KindMismatch { expected: FieldKind, found: String },

    #[error("{value:?} is not one of the allowed values {allowed:?}")]
    NotInChoice { value: String, allowed: Vec<String> },

    #[error("length {length} is below the minimum of {min}")]
    TooShort { length: usize, min: usize },

    #[error("length {length} exceeds the maximum of {max}")]
    TooLong { length: usize, max: usize },

    #[error("{value} is below the minimum of {min}")]
    TooSmall { value: i64, min: i64 },

    #[error("{value} exceeds the maximum of {max}")]
    TooLarge { value: i64, max: i64 },

    #[error("{value} is earlier than {min}")]
    TooEarly { value: String, min: String },

    #[error("{value} is later than {max}")]
    TooLate { value: String, max: String },
}

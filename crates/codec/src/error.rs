//! Error types for schema-driven XML encoding and decoding.
//!
//! Every failure aborts the whole call; there is no partial success. An
//! instance that was being populated when an error surfaced is left partially
//! mutated and should be discarded.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`CodecError::SchemaMismatch`] | an element tag has no field, or the instance lacks a declared field |
//! | [`CodecError::Parse`] | scalar text cannot be read as the field's kind |
//! | [`CodecError::ConstraintViolation`] | a decoded value fails its field's constraints |
//! | [`CodecError::Structural`] | the document is not well-formed or not shaped like field elements |

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use schemaxml_schema::{FieldKind, InstanceError, Violation};
use thiserror::Error;

/// The error type for all codec operations.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The XML and the schema (or the instance and the schema) disagree.
    #[error(transparent)]
    SchemaMismatch(#[from] SchemaMismatch),

    /// Scalar text that cannot be read as the field's kind.
    #[error("cannot parse {kind} field '{field}' from {raw:?}: {reason}")]
    Parse {
        field: String,
        kind: FieldKind,
        raw: String,
        reason: String,
    },

    /// A decoded value that fails the field's constraints.
    #[error("{kind} field '{field}' violates its constraints: {violation}")]
    ConstraintViolation {
        field: String,
        kind: FieldKind,
        raw: Option<String>,
        #[source]
        violation: Violation,
    },

    /// The document is malformed or not shaped like field elements.
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// The root element name passed to `serialize` is not a valid tag.
    #[error("invalid container name {0:?}: not a valid XML element name")]
    InvalidContainerName(String),

    /// A [`CodecConfig`](crate::CodecConfig) rejected by its own validation.
    #[error("invalid codec configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    /// Writing the serialized document failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Name of the field the error is attached to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            CodecError::Parse { field, .. } | CodecError::ConstraintViolation { field, .. } => {
                Some(field.as_str())
            }
            CodecError::SchemaMismatch(mismatch) => mismatch.field(),
            CodecError::Structural(StructuralError::UnexpectedChildren { field, .. }) => {
                Some(field.as_str())
            }
            _ => None,
        }
    }
}

/// Disagreement between the schema and the XML or the instance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaMismatch {
    /// An element whose tag is not a field of the schema.
    #[error("schema mismatch: element <{tag}> is not a field of schema {schema}")]
    UnknownField { schema: String, tag: String },

    /// The instance does not expose a field the schema declares.
    #[error("schema mismatch: instance has no field '{field}' declared by schema {schema}")]
    FieldNotFound { schema: String, field: String },

    /// A collection item tagged differently from the collection's item field.
    #[error("schema mismatch: item of '{field}' is tagged <{found}>, expected <{expected}>")]
    UnexpectedItemTag {
        field: String,
        expected: String,
        found: String,
    },

    /// A value whose shape the field's kind cannot hold.
    #[error("schema mismatch: {expected} field '{field}' holds a {found} value")]
    KindMismatch {
        field: String,
        expected: FieldKind,
        found: String,
    },
}

impl SchemaMismatch {
    /// Maps an error reported by an instance mutator.
    pub(crate) fn from_instance(schema: &str, error: InstanceError) -> Self {
        match error {
            InstanceError::UnknownField { field } => SchemaMismatch::FieldNotFound {
                schema: schema.to_string(),
                field,
            },
            InstanceError::TypeMismatch {
                field,
                expected,
                found,
            } => SchemaMismatch::KindMismatch {
                field,
                expected,
                found,
            },
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            SchemaMismatch::UnknownField { .. } => None,
            SchemaMismatch::FieldNotFound { field, .. }
            | SchemaMismatch::UnexpectedItemTag { field, .. }
            | SchemaMismatch::KindMismatch { field, .. } => Some(field.as_str()),
        }
    }
}

/// Malformed XML, or XML that cannot be read as a tree of field elements.
#[derive(Error, Debug)]
pub enum StructuralError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("document has no root element")]
    MissingRoot,

    #[error("element <{name}> is never closed")]
    UnclosedElement { name: String },

    #[error("closing tag </{name}> has no matching opening tag")]
    UnmatchedEnd { name: String },

    #[error("unexpected content outside the root element")]
    ContentOutsideRoot,

    #[error("unknown entity reference &{0};")]
    UnknownEntity(String),

    #[error("element nesting exceeds the maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },

    #[error("element <{element}> of {kind} field '{field}' must not contain child elements")]
    UnexpectedChildren {
        field: String,
        kind: FieldKind,
        element: String,
    },

    #[error("element <{element}> must not contain text")]
    UnexpectedText { element: String },
}

impl From<quick_xml::Error> for CodecError {
    fn from(err: quick_xml::Error) -> Self {
        CodecError::Structural(StructuralError::Xml(err))
    }
}

impl From<std::str::Utf8Error> for CodecError {
    fn from(err: std::str::Utf8Error) -> Self {
        CodecError::Structural(StructuralError::InvalidUtf8(err))
    }
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

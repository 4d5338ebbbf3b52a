//! # schemaxml schema model
//!
//! The data model shared by the schemaxml codec:
//!
//! - [`FieldKind`]: the closed taxonomy of field kinds
//! - [`Field`] / [`FieldDescriptor`]: named fields with kind-specific metadata
//!   and constraints
//! - [`Schema`]: an ordered, immutable list of uniquely named fields
//! - [`Value`]: the value of one field, including the explicit
//!   [`Value::Absent`] sentinel
//! - [`Instance`]: the accessor/mutator interface the codec reads and
//!   populates, with [`Record`] as the generic implementation
//!
//! ## Example
//!
//! ```
//! use schemaxml_schema::{Field, Instance, Record, Schema, Value};
//!
//! let schema = Schema::builder("IPerson")
//!     .field(Field::text("name").required())
//!     .field(Field::integer("age"))
//!     .build()?;
//!
//! let person = Record::for_schema(&schema).with("name", "Ada");
//! assert_eq!(person.get("age").as_deref(), Some(&Value::Absent));
//! assert!(schema.field("name").unwrap().validate(&Value::Absent).is_err());
//! # Ok::<(), schemaxml_schema::SchemaError>(())
//! ```

pub mod error;
pub mod field;
pub mod instance;
pub mod kind;
pub mod record;
pub mod schema;
mod validate;
pub mod value;

pub use error::{InstanceError, SchemaError, Violation};
pub use field::{
    ChoiceField, CollectionField, DatetimeField, Field, FieldDescriptor, IntegerField,
    ObjectField, TextField,
};
pub use instance::{Conformance, Instance};
pub use kind::FieldKind;
pub use record::Record;
pub use schema::{Schema, SchemaBuilder, is_valid_element_name};
pub use value::{Value, format_datetime};

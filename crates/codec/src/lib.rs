//! # schemaxml codec
//!
//! Schema-driven conversion between objects and XML documents.
//!
//! A [`Schema`](schemaxml_schema::Schema) lists named, typed fields. Encoding
//! walks the schema in declared order and emits one child element per field;
//! decoding walks the document's elements, maps each tag back to its field,
//! parses and validates the value and stores it on the target
//! [`Instance`](schemaxml_schema::Instance).
//!
//! ## Features
//!
//! - **Seven field kinds**: text, integer, datetime, choice, nested object,
//!   list and set, each with its own encode/decode strategy
//! - **Explicit absence**: an empty element round-trips to
//!   [`Value::Absent`](schemaxml_schema::Value::Absent), never to an empty
//!   string or zero
//! - **Strict decoding**: unknown tags, malformed scalars and constraint
//!   failures are errors that name the field involved
//! - **Bounded nesting**: documents and trees deeper than
//!   [`CodecConfig::max_depth`] are rejected
//!
//! ## Mapping
//!
//! | Field kind | XML |
//! |------------|-----|
//! | Text | `<name>Ada</name>` |
//! | Integer | `<age>36</age>` |
//! | Datetime | `<born>1815-12-10T00:00:00+00:00</born>` |
//! | Choice | `<color>red</color>` |
//! | Object | `<address><city>London</city></address>` |
//! | List / Set | `<tags><tag>a</tag><tag>b</tag></tags>` |
//! | absent | `<age/>` |
//!
//! ## Example
//!
//! ```
//! use schemaxml_codec::{deserialize, serialize};
//! use schemaxml_schema::{Field, Instance, Record, Schema, Value};
//!
//! let schema = Schema::builder("IPerson")
//!     .field(Field::text("name"))
//!     .field(Field::choice("color", ["red", "green", "blue"]))
//!     .field(Field::list("scores", Field::integer("score")))
//!     .build()?;
//!
//! let person = Record::for_schema(&schema)
//!     .with("name", "Ada")
//!     .with("color", Value::choice("red"))
//!     .with("scores", Value::list([3, 1, 2]));
//!
//! let xml = serialize("person", &schema, &person)?;
//!
//! let mut decoded = Record::for_schema(&schema);
//! deserialize(&xml, &schema, &mut decoded)?;
//! assert_eq!(decoded.value("scores"), Some(&Value::list([3, 1, 2])));
//! assert!(decoded.conforms_to("IPerson"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
mod strategy;
pub mod walker;
pub mod xml;

pub use codec::{XmlCodec, deserialize, deserialize_from_tree, serialize, serialize_to_tree};
pub use config::CodecConfig;
pub use error::{CodecError, Result, SchemaMismatch, StructuralError};
pub use walker::{SchemaWalker, XmlTreeWalker};
pub use xml::Element;

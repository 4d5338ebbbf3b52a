//! XML text handling for the codec.
//!
//! This module converts between XML text and an in-memory [`Element`] tree.
//! It knows nothing about schemas: the walkers in [`crate::walker`] map field
//! values onto elements, and this layer performs the single parse or single
//! serialization at the edges of a codec call.
//!
//! ## Element Layout
//!
//! Every field of a schema is one child element named after the field:
//!
//! ```xml
//! <person>
//!   <name>Ada</name>
//!   <born>1815-12-10T00:00:00+00:00</born>
//!   <address>
//!     <city>London</city>
//!   </address>
//!   <tags>
//!     <tag>math</tag>
//!     <tag>poetry</tag>
//!   </tags>
//!   <nickname/>
//! </person>
//! ```
//!
//! - Scalars are leaf elements holding their text form.
//! - Objects nest one element per field of their sub-schema.
//! - Lists and sets hold one child per item, each named after the item field.
//! - An absent value is an element with no content.
//!
//! ## Examples
//!
//! ```
//! use schemaxml_codec::CodecConfig;
//! use schemaxml_codec::xml::{from_xml_str, to_xml_string};
//!
//! let config = CodecConfig::default();
//! let tree = from_xml_str("<r><a>1</a></r>", &config)?;
//! let xml = to_xml_string(&tree, &config)?;
//! assert!(xml.contains("<a>1</a>"));
//! # Ok::<(), schemaxml_codec::CodecError>(())
//! ```

pub mod de;
pub mod ser;
pub mod tree;
mod utils;

pub use tree::Element;

// Re-export serialization functions
pub use ser::{to_xml_string, to_xml_vec, to_xml_writer};

// Re-export deserialization functions
pub use de::{from_xml_reader, from_xml_slice, from_xml_str};

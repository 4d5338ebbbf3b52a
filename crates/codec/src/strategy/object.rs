//! Nested object fields.
//!
//! An absent object is written as an empty element, and an empty element
//! decodes as absent. A schema without fields also encodes a present object
//! as an empty element; that element decodes as an empty object only when the
//! field is required.

use schemaxml_schema::{Field, Record, Schema, Value};

use crate::error::{Result, StructuralError};
use crate::strategy::{FieldDecoder, FieldEncoder, kind_mismatch};
use crate::walker::{SchemaWalker, XmlTreeWalker};
use crate::xml::Element;

/// Encodes an object as one element holding a child per field of its schema.
pub(crate) struct ObjectCodec<'a> {
    pub(crate) field: &'a Field,
    pub(crate) schema: &'a Schema,
}

impl FieldEncoder for ObjectCodec<'_> {
    fn encode(
        &self,
        walker: &SchemaWalker<'_>,
        container: &mut Element,
        value: &Value,
        depth: usize,
    ) -> Result<()> {
        let record = match value {
            Value::Absent => None,
            Value::Object(record) => Some(record),
            other => return Err(kind_mismatch(self.field, other).into()),
        };
        let element = container.sub_element(self.field.name());
        match record {
            Some(record) => walker.walk_fields(element, self.schema, record, depth),
            None => Ok(()),
        }
    }
}

impl FieldDecoder for ObjectCodec<'_> {
    fn decode(&self, walker: &XmlTreeWalker<'_>, element: &Element, depth: usize) -> Result<Value> {
        if element.has_significant_text() {
            return Err(StructuralError::UnexpectedText {
                element: element.name().to_string(),
            }
            .into());
        }
        if !element.has_children() && !(self.schema.is_empty() && self.field.is_required()) {
            return Ok(Value::Absent);
        }

        let mut record = Record::for_schema(self.schema);
        walker.walk_children(element, self.schema, &mut record, depth)?;
        Ok(Value::Object(record))
    }
}

//! Per-kind encode and decode strategies.
//!
//! [`Strategy::for_field`] is the single dispatch point from a field's
//! descriptor to the code that maps its values onto XML. It matches every
//! [`FieldDescriptor`] variant, so a new kind cannot be added without a
//! strategy for it.

mod collection;
mod object;
mod scalar;

use schemaxml_schema::{Field, FieldDescriptor, Value};

use crate::error::{Result, SchemaMismatch};
use crate::walker::{SchemaWalker, XmlTreeWalker};
use crate::xml::Element;

pub(crate) use collection::{ListCodec, SetCodec};
pub(crate) use object::ObjectCodec;
pub(crate) use scalar::{ChoiceCodec, DatetimeCodec, IntegerCodec, TextCodec};

/// Appends the XML form of one field value to a container element.
pub(crate) trait FieldEncoder {
    /// Appends exactly one child, named after the field, to `container`.
    /// `depth` is the depth of that child.
    fn encode(
        &self,
        walker: &SchemaWalker<'_>,
        container: &mut Element,
        value: &Value,
        depth: usize,
    ) -> Result<()>;
}

/// Reads one field value back from its element.
pub(crate) trait FieldDecoder {
    /// Decodes `element`, found at `depth`. The result is not validated.
    fn decode(&self, walker: &XmlTreeWalker<'_>, element: &Element, depth: usize) -> Result<Value>;
}

/// The strategy chosen for one field.
pub(crate) enum Strategy<'a> {
    Text(TextCodec<'a>),
    Integer(IntegerCodec<'a>),
    Datetime(DatetimeCodec<'a>),
    Choice(ChoiceCodec<'a>),
    Object(ObjectCodec<'a>),
    List(ListCodec<'a>),
    Set(SetCodec<'a>),
}

impl<'a> Strategy<'a> {
    pub(crate) fn for_field(field: &'a Field) -> Self {
        match field.descriptor() {
            FieldDescriptor::Text(_) => Strategy::Text(TextCodec { field }),
            FieldDescriptor::Integer(_) => Strategy::Integer(IntegerCodec { field }),
            FieldDescriptor::Datetime(_) => Strategy::Datetime(DatetimeCodec { field }),
            FieldDescriptor::Choice(_) => Strategy::Choice(ChoiceCodec { field }),
            FieldDescriptor::Object(object) => Strategy::Object(ObjectCodec {
                field,
                schema: &object.schema,
            }),
            FieldDescriptor::List(collection) => Strategy::List(ListCodec {
                field,
                item: &collection.value_type,
            }),
            FieldDescriptor::Set(collection) => Strategy::Set(SetCodec {
                field,
                item: &collection.value_type,
            }),
        }
    }
}

impl FieldEncoder for Strategy<'_> {
    fn encode(
        &self,
        walker: &SchemaWalker<'_>,
        container: &mut Element,
        value: &Value,
        depth: usize,
    ) -> Result<()> {
        match self {
            Strategy::Text(codec) => codec.encode(walker, container, value, depth),
            Strategy::Integer(codec) => codec.encode(walker, container, value, depth),
            Strategy::Datetime(codec) => codec.encode(walker, container, value, depth),
            Strategy::Choice(codec) => codec.encode(walker, container, value, depth),
            Strategy::Object(codec) => codec.encode(walker, container, value, depth),
            Strategy::List(codec) => codec.encode(walker, container, value, depth),
            Strategy::Set(codec) => codec.encode(walker, container, value, depth),
        }
    }
}

impl FieldDecoder for Strategy<'_> {
    fn decode(&self, walker: &XmlTreeWalker<'_>, element: &Element, depth: usize) -> Result<Value> {
        match self {
            Strategy::Text(codec) => codec.decode(walker, element, depth),
            Strategy::Integer(codec) => codec.decode(walker, element, depth),
            Strategy::Datetime(codec) => codec.decode(walker, element, depth),
            Strategy::Choice(codec) => codec.decode(walker, element, depth),
            Strategy::Object(codec) => codec.decode(walker, element, depth),
            Strategy::List(codec) => codec.decode(walker, element, depth),
            Strategy::Set(codec) => codec.decode(walker, element, depth),
        }
    }
}

/// Error for a value whose shape the field's kind cannot hold.
pub(crate) fn kind_mismatch(field: &Field, value: &Value) -> SchemaMismatch {
    SchemaMismatch::KindMismatch {
        field: field.name().to_string(),
        expected: field.kind(),
        found: value.kind_name().to_string(),
    }
}

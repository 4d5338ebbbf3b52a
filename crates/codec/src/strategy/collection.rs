//! List and set fields.
//!
//! Both encode as a container element with one child per item. Every item
//! element is tagged with the name of the collection's item field and goes
//! through that field's own strategy.

use std::collections::BTreeSet;

use schemaxml_schema::{Field, Value};

use crate::error::{Result, SchemaMismatch, StructuralError};
use crate::strategy::{FieldDecoder, FieldEncoder, kind_mismatch};
use crate::walker::{SchemaWalker, XmlTreeWalker};
use crate::xml::Element;

/// Items kept in insertion order.
pub(crate) struct ListCodec<'a> {
    pub(crate) field: &'a Field,
    pub(crate) item: &'a Field,
}

/// Items kept unique, written in ascending value order.
pub(crate) struct SetCodec<'a> {
    pub(crate) field: &'a Field,
    pub(crate) item: &'a Field,
}

impl FieldEncoder for ListCodec<'_> {
    fn encode(
        &self,
        walker: &SchemaWalker<'_>,
        container: &mut Element,
        value: &Value,
        depth: usize,
    ) -> Result<()> {
        let items: Vec<&Value> = match value {
            Value::Absent => Vec::new(),
            Value::List(items) => items.iter().collect(),
            Value::Set(items) => items.iter().collect(),
            other => return Err(kind_mismatch(self.field, other).into()),
        };
        encode_items(walker, container, self.field, self.item, items, depth)
    }
}

impl FieldDecoder for ListCodec<'_> {
    fn decode(&self, walker: &XmlTreeWalker<'_>, element: &Element, depth: usize) -> Result<Value> {
        let items = decode_items(walker, element, self.field, self.item, depth)?;
        Ok(Value::List(items))
    }
}

impl FieldEncoder for SetCodec<'_> {
    fn encode(
        &self,
        walker: &SchemaWalker<'_>,
        container: &mut Element,
        value: &Value,
        depth: usize,
    ) -> Result<()> {
        let items: Vec<&Value> = match value {
            Value::Absent => Vec::new(),
            Value::Set(items) => items.iter().collect(),
            Value::List(items) => items.iter().collect::<BTreeSet<_>>().into_iter().collect(),
            other => return Err(kind_mismatch(self.field, other).into()),
        };
        encode_items(walker, container, self.field, self.item, items, depth)
    }
}

impl FieldDecoder for SetCodec<'_> {
    fn decode(&self, walker: &XmlTreeWalker<'_>, element: &Element, depth: usize) -> Result<Value> {
        let items = decode_items(walker, element, self.field, self.item, depth)?;
        Ok(Value::Set(items.into_iter().collect()))
    }
}

fn encode_items(
    walker: &SchemaWalker<'_>,
    container: &mut Element,
    field: &Field,
    item: &Field,
    items: Vec<&Value>,
    depth: usize,
) -> Result<()> {
    let element = container.sub_element(field.name());
    for value in items {
        walker.encode_field(element, item, value, depth + 1)?;
    }
    Ok(())
}

fn decode_items(
    walker: &XmlTreeWalker<'_>,
    element: &Element,
    field: &Field,
    item: &Field,
    depth: usize,
) -> Result<Vec<Value>> {
    if element.has_significant_text() {
        return Err(StructuralError::UnexpectedText {
            element: element.name().to_string(),
        }
        .into());
    }

    element
        .children()
        .iter()
        .map(|child| {
            if child.name() != item.name() {
                return Err(SchemaMismatch::UnexpectedItemTag {
                    field: field.name().to_string(),
                    expected: item.name().to_string(),
                    found: child.name().to_string(),
                }
                .into());
            }
            walker.decode_field(child, item, depth + 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecConfig;
    use crate::error::CodecError;

    fn item_texts(element: &Element) -> Vec<&str> {
        element.children().iter().filter_map(Element::text).collect()
    }

    #[test]
    fn test_list_keeps_order() {
        let field = Field::list("numbers", Field::integer("n"));
        let item = Field::integer("n");
        let codec = ListCodec {
            field: &field,
            item: &item,
        };
        let config = CodecConfig::default();

        let mut container = Element::new("root");
        codec
            .encode(
                &SchemaWalker::new(&config),
                &mut container,
                &Value::list([3, 1, 2]),
                2,
            )
            .unwrap();
        let element = container.child("numbers").unwrap();
        assert_eq!(item_texts(element), vec!["3", "1", "2"]);

        let decoded = codec
            .decode(&XmlTreeWalker::new(&config), element, 2)
            .unwrap();
        assert_eq!(decoded, Value::list([3, 1, 2]));
    }

    #[test]
    fn test_set_encodes_sorted_and_decodes_unique() {
        let field = Field::set("numbers", Field::integer("n"));
        let item = Field::integer("n");
        let codec = SetCodec {
            field: &field,
            item: &item,
        };
        let config = CodecConfig::default();

        let mut container = Element::new("root");
        codec
            .encode(
                &SchemaWalker::new(&config),
                &mut container,
                &Value::list([3, 1, 3, 2]),
                2,
            )
            .unwrap();
        assert_eq!(
            item_texts(container.child("numbers").unwrap()),
            vec!["1", "2", "3"]
        );

        let mut element = Element::new("numbers");
        for n in ["1", "2", "2", "3"] {
            element.sub_element("n").set_text(n);
        }
        let decoded = codec
            .decode(&XmlTreeWalker::new(&config), &element, 2)
            .unwrap();
        assert_eq!(decoded.item_count(), Some(3));
    }

    #[test]
    fn test_empty_collection_element_decodes_empty() {
        let field = Field::list("tags", Field::text("tag"));
        let item = Field::text("tag");
        let codec = ListCodec {
            field: &field,
            item: &item,
        };
        let config = CodecConfig::default();

        let decoded = codec
            .decode(&XmlTreeWalker::new(&config), &Element::new("tags"), 2)
            .unwrap();
        assert_eq!(decoded, Value::List(Vec::new()));
    }

    #[test]
    fn test_wrong_item_tag_rejected() {
        let field = Field::list("tags", Field::text("tag"));
        let item = Field::text("tag");
        let codec = ListCodec {
            field: &field,
            item: &item,
        };
        let config = CodecConfig::default();

        let mut element = Element::new("tags");
        element.sub_element("tag").set_text("a");
        element.sub_element("label").set_text("b");
        let err = codec
            .decode(&XmlTreeWalker::new(&config), &element, 2)
            .unwrap_err();
        match err {
            CodecError::SchemaMismatch(SchemaMismatch::UnexpectedItemTag {
                field,
                expected,
                found,
            }) => {
                assert_eq!(field, "tags");
                assert_eq!(expected, "tag");
                assert_eq!(found, "label");
            }
            other => panic!("expected item tag mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_items_are_validated() {
        let field = Field::list("colors", Field::choice("color", ["red", "green"]));
        let item = Field::choice("color", ["red", "green"]);
        let codec = ListCodec {
            field: &field,
            item: &item,
        };
        let config = CodecConfig::default();

        let mut element = Element::new("colors");
        element.sub_element("color").set_text("red");
        element.sub_element("color").set_text("purple");
        let err = codec
            .decode(&XmlTreeWalker::new(&config), &element, 2)
            .unwrap_err();
        assert!(matches!(err, CodecError::ConstraintViolation { .. }));
        assert_eq!(err.field(), Some("color"));
    }

    #[test]
    fn test_scalar_value_in_list_field_is_kind_mismatch() {
        let field = Field::list("tags", Field::text("tag"));
        let item = Field::text("tag");
        let codec = ListCodec {
            field: &field,
            item: &item,
        };
        let config = CodecConfig::default();

        let mut container = Element::new("root");
        let err = codec
            .encode(
                &SchemaWalker::new(&config),
                &mut container,
                &Value::text("a"),
                2,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::SchemaMismatch(SchemaMismatch::KindMismatch { .. })
        ));
    }
}

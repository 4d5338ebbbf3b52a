//! Schema-directed traversal for encoding and decoding.
//!
//! [`SchemaWalker`] drives encoding: it visits a schema's fields in declared
//! order, reads each value from the instance and hands it to the field's
//! strategy. [`XmlTreeWalker`] drives decoding: it visits a container's
//! children in document order, resolves each tag to a field, decodes,
//! validates and stores the value, then marks the instance as conforming.
//!
//! Depth counts the root container as 1. Both walkers refuse to produce or
//! read an element deeper than [`CodecConfig::max_depth`].

use std::collections::HashSet;

use schemaxml_schema::{Field, Instance, Schema, Value, Violation};

use crate::config::CodecConfig;
use crate::error::{CodecError, Result, SchemaMismatch, StructuralError};
use crate::strategy::{FieldDecoder, FieldEncoder, Strategy};
use crate::xml::Element;

/// Depth of the container element passed to the public entry points.
const ROOT_DEPTH: usize = 1;

/// Encodes instances into element trees.
#[derive(Debug, Clone, Copy)]
pub struct SchemaWalker<'c> {
    config: &'c CodecConfig,
}

impl<'c> SchemaWalker<'c> {
    pub fn new(config: &'c CodecConfig) -> Self {
        Self { config }
    }

    /// Appends one child per schema field to `container`.
    pub fn walk<I: Instance + ?Sized>(
        &self,
        container: &mut Element,
        schema: &Schema,
        instance: &I,
    ) -> Result<()> {
        self.walk_fields(container, schema, instance, ROOT_DEPTH)
    }

    /// Encodes every field of `schema` under `container`, which sits at `depth`.
    pub(crate) fn walk_fields<I: Instance + ?Sized>(
        &self,
        container: &mut Element,
        schema: &Schema,
        instance: &I,
        depth: usize,
    ) -> Result<()> {
        for field in schema.fields() {
            let value = instance
                .get(field.name())
                .ok_or_else(|| SchemaMismatch::FieldNotFound {
                    schema: schema.name().to_string(),
                    field: field.name().to_string(),
                })?;
            self.encode_field(container, field, &value, depth + 1)?;
        }
        Ok(())
    }

    /// Encodes one value as the element for `field`, found at `depth`.
    pub(crate) fn encode_field(
        &self,
        container: &mut Element,
        field: &Field,
        value: &Value,
        depth: usize,
    ) -> Result<()> {
        check_depth(depth, self.config.max_depth)?;
        tracing::trace!(
            field = field.name(),
            kind = %field.kind(),
            depth,
            "encoding field"
        );
        Strategy::for_field(field).encode(self, container, value, depth)
    }
}

/// Decodes element trees into instances.
#[derive(Debug, Clone, Copy)]
pub struct XmlTreeWalker<'c> {
    config: &'c CodecConfig,
}

impl<'c> XmlTreeWalker<'c> {
    pub fn new(config: &'c CodecConfig) -> Self {
        Self { config }
    }

    /// Populates `instance` from the children of `container`. The container's
    /// own tag is not checked.
    pub fn walk<I: Instance + ?Sized>(
        &self,
        container: &Element,
        schema: &Schema,
        instance: &mut I,
    ) -> Result<()> {
        self.walk_children(container, schema, instance, ROOT_DEPTH)
    }

    /// Decodes every child of `container`, which sits at `depth`, as a field
    /// of `schema`.
    pub(crate) fn walk_children<I: Instance + ?Sized>(
        &self,
        container: &Element,
        schema: &Schema,
        instance: &mut I,
        depth: usize,
    ) -> Result<()> {
        if container.has_significant_text() {
            return Err(StructuralError::UnexpectedText {
                element: container.name().to_string(),
            }
            .into());
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for child in container.children() {
            let field = schema
                .field(child.name())
                .ok_or_else(|| SchemaMismatch::UnknownField {
                    schema: schema.name().to_string(),
                    tag: child.name().to_string(),
                })?;

            if !seen.insert(field.name()) {
                tracing::warn!(
                    schema = schema.name(),
                    field = field.name(),
                    "repeated element for field, keeping the last one"
                );
            }

            let value = self.decode_field(child, field, depth + 1)?;
            instance
                .set(field.name(), value)
                .map_err(|e| SchemaMismatch::from_instance(schema.name(), e))?;
        }

        if let Some(missing) = schema
            .required_fields()
            .find(|field| !seen.contains(field.name()))
        {
            return Err(CodecError::ConstraintViolation {
                field: missing.name().to_string(),
                kind: missing.kind(),
                raw: None,
                violation: Violation::Required,
            });
        }

        instance.mark_conforms(schema.name());
        Ok(())
    }

    /// Decodes and validates the value held by `element`, found at `depth`.
    pub(crate) fn decode_field(
        &self,
        element: &Element,
        field: &Field,
        depth: usize,
    ) -> Result<Value> {
        check_depth(depth, self.config.max_depth)?;
        tracing::trace!(
            field = field.name(),
            kind = %field.kind(),
            depth,
            "decoding field"
        );

        let value = Strategy::for_field(field).decode(self, element, depth)?;
        field
            .validate(&value)
            .map_err(|violation| CodecError::ConstraintViolation {
                field: field.name().to_string(),
                kind: field.kind(),
                raw: if field.kind().is_composite() {
                    None
                } else {
                    element.text().map(str::to_string)
                },
                violation,
            })?;
        Ok(value)
    }
}

fn check_depth(depth: usize, max_depth: usize) -> Result<()> {
    if depth > max_depth {
        return Err(StructuralError::DepthExceeded { max_depth }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemaxml_schema::{FieldKind, Record};

    fn person_schema() -> Schema {
        Schema::builder("IPerson")
            .field(Field::text("name").required())
            .field(Field::integer("age"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_encode_walks_declared_order() {
        let schema = person_schema();
        let person = Record::for_schema(&schema).with("age", 36).with("name", "Ada");
        let config = CodecConfig::default();

        let mut root = Element::new("person");
        SchemaWalker::new(&config)
            .walk(&mut root, &schema, &person)
            .unwrap();

        let tags: Vec<_> = root.children().iter().map(Element::name).collect();
        assert_eq!(tags, vec!["name", "age"]);
    }

    #[test]
    fn test_encode_missing_instance_field() {
        let schema = person_schema();
        let person = Record::new().with("name", "Ada");
        let config = CodecConfig::default();

        let mut root = Element::new("person");
        let err = SchemaWalker::new(&config)
            .walk(&mut root, &schema, &person)
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::SchemaMismatch(SchemaMismatch::FieldNotFound { ref field, .. }) if field == "age"
        ));
    }

    #[test]
    fn test_decode_accepts_any_child_order_and_marks_conformance() {
        let schema = person_schema();
        let mut root = Element::new("person");
        root.sub_element("age").set_text("36");
        root.sub_element("name").set_text("Ada");
        let config = CodecConfig::default();

        let mut person = Record::for_schema(&schema);
        XmlTreeWalker::new(&config)
            .walk(&root, &schema, &mut person)
            .unwrap();

        assert_eq!(person.value("age"), Some(&Value::Integer(36)));
        assert!(person.conforms_to("IPerson"));
    }

    #[test]
    fn test_decode_unknown_tag() {
        let schema = person_schema();
        let mut root = Element::new("person");
        root.sub_element("name").set_text("Ada");
        root.sub_element("nickname").set_text("Countess");
        let config = CodecConfig::default();

        let mut person = Record::for_schema(&schema);
        let err = XmlTreeWalker::new(&config)
            .walk(&root, &schema, &mut person)
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::SchemaMismatch(SchemaMismatch::UnknownField { ref tag, .. }) if tag == "nickname"
        ));
        assert!(!person.conforms_to("IPerson"));
    }

    #[test]
    fn test_decode_missing_required_element() {
        let schema = person_schema();
        let mut root = Element::new("person");
        root.sub_element("age").set_text("36");
        let config = CodecConfig::default();

        let err = XmlTreeWalker::new(&config)
            .walk(&root, &schema, &mut Record::for_schema(&schema))
            .unwrap_err();
        match err {
            CodecError::ConstraintViolation {
                field,
                kind,
                raw,
                violation,
            } => {
                assert_eq!(field, "name");
                assert_eq!(kind, FieldKind::Text);
                assert_eq!(raw, None);
                assert_eq!(violation, Violation::Required);
            }
            other => panic!("expected constraint violation, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_element_last_wins() {
        let schema = person_schema();
        let mut root = Element::new("person");
        root.sub_element("name").set_text("Ada");
        root.sub_element("name").set_text("Grace");
        let config = CodecConfig::default();

        let mut person = Record::for_schema(&schema);
        XmlTreeWalker::new(&config)
            .walk(&root, &schema, &mut person)
            .unwrap();
        assert_eq!(person.value("name"), Some(&Value::text("Grace")));
    }

    #[test]
    fn test_depth_limit_applies_to_in_memory_trees() {
        let schema = person_schema();
        let config = CodecConfig {
            max_depth: 1,
            ..Default::default()
        };
        let person = Record::for_schema(&schema).with("name", "Ada");

        let mut root = Element::new("person");
        let err = SchemaWalker::new(&config)
            .walk(&mut root, &schema, &person)
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::Structural(StructuralError::DepthExceeded { max_depth: 1 })
        ));

        let mut tree = Element::new("person");
        tree.sub_element("name").set_text("Ada");
        let err = XmlTreeWalker::new(&config)
            .walk(&tree, &schema, &mut Record::for_schema(&schema))
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::Structural(StructuralError::DepthExceeded { .. })
        ));
    }
}

//! Public entry points.
//!
//! [`XmlCodec`] holds a [`CodecConfig`] and exposes the byte-level and
//! tree-level operations. The free functions at the bottom use
//! `CodecConfig::default()`.

use schemaxml_schema::{Instance, Schema, is_valid_element_name};

use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::walker::{SchemaWalker, XmlTreeWalker};
use crate::xml::{Element, from_xml_slice, to_xml_vec};

/// Schema-driven XML encoder and decoder.
///
/// # Examples
///
/// ```
/// use schemaxml_codec::{CodecConfig, XmlCodec};
/// use schemaxml_schema::{Field, Instance, Record, Schema, Value};
///
/// let schema = Schema::builder("IPoint")
///     .field(Field::integer("x"))
///     .field(Field::integer("y"))
///     .build()?;
/// let codec = XmlCodec::new(CodecConfig { pretty_print: false, ..Default::default() })?;
///
/// let point = Record::for_schema(&schema).with("x", 3).with("y", 4);
/// let xml = codec.serialize("point", &schema, &point)?;
/// assert_eq!(
///     String::from_utf8(xml.clone())?,
///     r#"<?xml version="1.0" encoding="UTF-8"?><point><x>3</x><y>4</y></point>"#
/// );
///
/// let mut decoded = Record::for_schema(&schema);
/// codec.deserialize(&xml, &schema, &mut decoded)?;
/// assert_eq!(decoded.value("y"), Some(&Value::Integer(4)));
/// assert!(decoded.conforms_to("IPoint"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct XmlCodec {
    config: CodecConfig,
}

impl XmlCodec {
    /// Creates a codec after checking `config` with [`CodecConfig::validate`].
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate().map_err(CodecError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encodes `instance` as a UTF-8 document whose root element is
    /// `container_name`.
    pub fn serialize<I: Instance + ?Sized>(
        &self,
        container_name: &str,
        schema: &Schema,
        instance: &I,
    ) -> Result<Vec<u8>> {
        if !is_valid_element_name(container_name) {
            return Err(CodecError::InvalidContainerName(container_name.to_string()));
        }
        tracing::debug!(
            container = container_name,
            schema = schema.name(),
            "serializing instance"
        );

        let mut root = Element::new(container_name);
        self.serialize_to_tree(&mut root, schema, instance)?;
        to_xml_vec(&root, &self.config)
    }

    /// Appends one child per schema field to an existing element.
    pub fn serialize_to_tree<I: Instance + ?Sized>(
        &self,
        container: &mut Element,
        schema: &Schema,
        instance: &I,
    ) -> Result<()> {
        SchemaWalker::new(&self.config).walk(container, schema, instance)
    }

    /// Parses `xml` and populates `instance` from the root element's
    /// children. The root tag itself is not checked.
    ///
    /// On error the instance may be partially populated and should be
    /// discarded.
    pub fn deserialize<I: Instance + ?Sized>(
        &self,
        xml: &[u8],
        schema: &Schema,
        instance: &mut I,
    ) -> Result<()> {
        let root = from_xml_slice(xml, &self.config)?;
        tracing::debug!(
            container = root.name(),
            schema = schema.name(),
            "deserializing instance"
        );
        self.deserialize_from_tree(&root, schema, instance)
    }

    /// Populates `instance` from the children of an already parsed element.
    pub fn deserialize_from_tree<I: Instance + ?Sized>(
        &self,
        container: &Element,
        schema: &Schema,
        instance: &mut I,
    ) -> Result<()> {
        XmlTreeWalker::new(&self.config).walk(container, schema, instance)
    }
}

/// Encodes `instance` with the default configuration.
pub fn serialize<I: Instance + ?Sized>(
    container_name: &str,
    schema: &Schema,
    instance: &I,
) -> Result<Vec<u8>> {
    XmlCodec::default().serialize(container_name, schema, instance)
}

/// Decodes `xml` into `instance` with the default configuration.
pub fn deserialize<I: Instance + ?Sized>(
    xml: &[u8],
    schema: &Schema,
    instance: &mut I,
) -> Result<()> {
    XmlCodec::default().deserialize(xml, schema, instance)
}

/// Appends field elements for `instance` to `container` with the default
/// configuration.
pub fn serialize_to_tree<I: Instance + ?Sized>(
    container: &mut Element,
    schema: &Schema,
    instance: &I,
) -> Result<()> {
    XmlCodec::default().serialize_to_tree(container, schema, instance)
}

/// Populates `instance` from `container` with the default configuration.
pub fn deserialize_from_tree<I: Instance + ?Sized>(
    container: &Element,
    schema: &Schema,
    instance: &mut I,
) -> Result<()> {
    XmlCodec::default().deserialize_from_tree(container, schema, instance)
}

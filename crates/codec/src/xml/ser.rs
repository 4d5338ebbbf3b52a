//! Writing an [`Element`] tree as XML text.
//!
//! Text content is escaped by quick-xml, with carriage returns written as
//! character references. An element without text or children
//! is written self-closing; an element whose text is the empty string is
//! written as a start/end pair so the two stay distinguishable on the page.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::xml::tree::Element;
use crate::xml::utils::{XML_ENCODING, XML_VERSION, escape_text};

/// Serialize an element tree to an XML string.
///
/// # Examples
///
/// ```
/// use schemaxml_codec::{CodecConfig, Element};
/// use schemaxml_codec::xml::to_xml_string;
///
/// let mut root = Element::new("person");
/// root.sub_element("name").set_text("Ada & Bob");
///
/// let config = CodecConfig { pretty_print: false, xml_declaration: false, ..Default::default() };
/// let xml = to_xml_string(&root, &config)?;
/// assert_eq!(xml, "<person><name>Ada &amp; Bob</name></person>");
/// # Ok::<(), schemaxml_codec::CodecError>(())
/// ```
pub fn to_xml_string(root: &Element, config: &CodecConfig) -> Result<String> {
    let buffer = to_xml_vec(root, config)?;
    String::from_utf8(buffer).map_err(|e| CodecError::from(e.utf8_error()))
}

/// Serialize an element tree to an XML byte vector.
pub fn to_xml_vec(root: &Element, config: &CodecConfig) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_xml_writer(root, &mut buffer, config)?;
    Ok(buffer)
}

/// Serialize an element tree to an XML writer.
pub fn to_xml_writer<W: Write>(root: &Element, writer: W, config: &CodecConfig) -> Result<()> {
    let mut serializer = XmlTreeWriter::new(writer, config);
    serializer.write_document(root)?;
    serializer.finish()
}

/// Writes quick-xml events for an element tree.
struct XmlTreeWriter<W: Write> {
    writer: Writer<W>,
    xml_declaration: bool,
    pretty_print: bool,
}

impl<W: Write> XmlTreeWriter<W> {
    fn new(writer: W, config: &CodecConfig) -> Self {
        let writer = if config.pretty_print {
            Writer::new_with_indent(writer, b' ', config.indent)
        } else {
            Writer::new(writer)
        };
        Self {
            writer,
            xml_declaration: config.xml_declaration,
            pretty_print: config.pretty_print,
        }
    }

    fn write_document(&mut self, root: &Element) -> Result<()> {
        if self.xml_declaration {
            self.write_xml_declaration()?;
        }
        self.write_element(root)
    }

    fn write_xml_declaration(&mut self) -> Result<()> {
        self.writer.write_event(Event::Decl(BytesDecl::new(
            XML_VERSION,
            Some(XML_ENCODING),
            None,
        )))?;
        Ok(())
    }

    fn write_element(&mut self, element: &Element) -> Result<()> {
        let name = element.name();

        if element.text().is_none() && !element.has_children() {
            self.writer
                .write_event(Event::Empty(BytesStart::new(name)))?;
            return Ok(());
        }

        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        if let Some(text) = element.text() {
            // An empty text event still keeps the end tag on the same line.
            self.writer
                .write_event(Event::Text(BytesText::from_escaped(escape_text(text))))?;
        }
        for child in element.children() {
            self.write_element(child)?;
        }
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Finishes serialization and flushes the writer.
    fn finish(mut self) -> Result<()> {
        if self.pretty_print {
            self.writer.get_mut().write_all(b"\n")?;
        }
        self.writer.get_mut().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::de::from_xml_str;

    fn compact() -> CodecConfig {
        CodecConfig {
            pretty_print: false,
            xml_declaration: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_compact_output() {
        let mut root = Element::new("r");
        root.sub_element("a").set_text("1");
        root.sub_element("b");
        root.sub_element("c").set_text("");

        let xml = to_xml_string(&root, &compact()).unwrap();
        assert_eq!(xml, "<r><a>1</a><b/><c></c></r>");
    }

    #[test]
    fn test_declaration_written_first() {
        let config = CodecConfig {
            pretty_print: false,
            ..Default::default()
        };
        let xml = to_xml_string(&Element::new("r"), &config).unwrap();
        assert_eq!(xml, r#"<?xml version="1.0" encoding="UTF-8"?><r/>"#);
    }

    #[test]
    fn test_text_is_escaped() {
        let root = Element::with_text("r", "<a href=\"x\">&'</a>");
        let xml = to_xml_string(&root, &compact()).unwrap();
        assert!(!xml.contains("<a href"));
        assert!(xml.contains("&lt;"));
        assert!(xml.contains("&amp;"));
    }

    #[test]
    fn test_carriage_return_written_as_reference() {
        let root = Element::with_text("r", "a\r\nb\rc");
        let xml = to_xml_string(&root, &compact()).unwrap();
        assert_eq!(xml, "<r>a&#13;\nb&#13;c</r>");
        assert!(!xml.contains('\r'));

        let reparsed = from_xml_str(&xml, &compact()).unwrap();
        assert_eq!(reparsed.text(), Some("a\r\nb\rc"));
    }

    #[test]
    fn test_pretty_output_reparses_to_same_tree() {
        let person = |empty_text: Option<&str>| {
            let mut root = Element::new("person");
            root.sub_element("name").set_text("  Ada  ");
            let empty = root.sub_element("empty");
            if let Some(text) = empty_text {
                empty.set_text(text);
            }
            let tags = root.sub_element("tags");
            tags.sub_element("tag").set_text("x");
            tags.sub_element("tag").set_text("y");
            root.sub_element("age");
            root
        };

        let config = CodecConfig::default();
        let xml = to_xml_string(&person(Some("")), &config).unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("\n  <name>  Ada  </name>"));
        assert!(xml.ends_with("</person>\n"));

        // `<empty></empty>` carries no character data once parsed.
        let reparsed = from_xml_str(&xml, &config).unwrap();
        assert_eq!(reparsed, person(None));
    }
}

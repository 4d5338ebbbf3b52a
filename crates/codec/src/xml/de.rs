//! Parsing XML text into an [`Element`] tree.
//!
//! The reader consumes quick-xml events and keeps a stack of open elements.
//! Character data, CDATA sections and entity references are concatenated into
//! the text of the innermost open element. Whitespace between child elements
//! is dropped; any other text is preserved verbatim so leaf values survive
//! untouched.

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::config::CodecConfig;
use crate::error::{Result, StructuralError};
use crate::xml::tree::Element;
use crate::xml::utils::{is_whitespace_text, resolve_reference};

/// Parse an XML document held in a string.
///
/// # Examples
///
/// ```
/// use schemaxml_codec::CodecConfig;
/// use schemaxml_codec::xml::from_xml_str;
///
/// let root = from_xml_str("<person><name>Ada</name></person>", &CodecConfig::default())?;
/// assert_eq!(root.name(), "person");
/// assert_eq!(root.child("name").and_then(|n| n.text()), Some("Ada"));
/// # Ok::<(), schemaxml_codec::CodecError>(())
/// ```
pub fn from_xml_str(xml: &str, config: &CodecConfig) -> Result<Element> {
    XmlTreeReader::new(Reader::from_str(xml), config.max_depth).read_document()
}

/// Parse an XML document from bytes, which must be UTF-8.
pub fn from_xml_slice(xml: &[u8], config: &CodecConfig) -> Result<Element> {
    let xml_str = std::str::from_utf8(xml)?;
    from_xml_str(xml_str, config)
}

/// Parse an XML document from a buffered reader.
pub fn from_xml_reader<R: BufRead>(reader: R, config: &CodecConfig) -> Result<Element> {
    XmlTreeReader::new(Reader::from_reader(reader), config.max_depth).read_document()
}

/// An element whose end tag has not been seen yet.
struct OpenElement {
    element: Element,
    /// Character data collected so far, `None` if there was none at all.
    text: Option<String>,
}

impl OpenElement {
    fn new(name: String) -> Self {
        Self {
            element: Element::new(name),
            text: None,
        }
    }

    fn push_text(&mut self, text: &str) {
        self.text.get_or_insert_with(String::new).push_str(text);
    }

    fn finish(self) -> Element {
        let OpenElement { mut element, text } = self;
        if let Some(text) = text {
            // Indentation between children is not content.
            if !element.has_children() || !text.trim().is_empty() {
                element.set_text(text);
            }
        }
        element
    }
}

/// Builds an [`Element`] tree from quick-xml events.
struct XmlTreeReader<R: BufRead> {
    reader: Reader<R>,
    /// Buffer for reading events
    buf: Vec<u8>,
    /// Elements opened but not yet closed, outermost first
    stack: Vec<OpenElement>,
    /// The finished root element
    root: Option<Element>,
    max_depth: usize,
}

impl<R: BufRead> XmlTreeReader<R> {
    fn new(reader: Reader<R>, max_depth: usize) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            stack: Vec::new(),
            root: None,
            max_depth,
        }
    }

    fn read_document(mut self) -> Result<Element> {
        loop {
            self.buf.clear();
            let event = self.reader.read_event_into(&mut self.buf)?.into_owned();
            match event {
                Event::Start(start) => {
                    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
                    self.open(name)?;
                }
                Event::Empty(start) => {
                    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
                    self.open(name)?;
                    self.close(None)?;
                }
                Event::End(end) => {
                    let name = std::str::from_utf8(end.name().as_ref())?.to_string();
                    self.close(Some(name))?;
                }
                Event::Text(text) => {
                    let bytes: &[u8] = &text;
                    if self.stack.is_empty() {
                        if !is_whitespace_text(bytes) {
                            return Err(StructuralError::ContentOutsideRoot.into());
                        }
                    } else {
                        let text = std::str::from_utf8(bytes)?;
                        self.push_text(text)?;
                    }
                }
                Event::CData(cdata) => {
                    let bytes: &[u8] = &cdata;
                    let text = std::str::from_utf8(bytes)?;
                    self.push_text(text)?;
                }
                Event::GeneralRef(reference) => {
                    let bytes: &[u8] = &reference;
                    let resolved = resolve_reference(std::str::from_utf8(bytes)?)?;
                    self.push_text(&resolved)?;
                }
                Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(open) = self.stack.pop() {
            return Err(StructuralError::UnclosedElement {
                name: open.element.name().to_string(),
            }
            .into());
        }
        self.root.ok_or_else(|| StructuralError::MissingRoot.into())
    }

    fn open(&mut self, name: String) -> Result<()> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(StructuralError::ContentOutsideRoot.into());
        }
        if self.stack.len() >= self.max_depth {
            return Err(StructuralError::DepthExceeded {
                max_depth: self.max_depth,
            }
            .into());
        }
        self.stack.push(OpenElement::new(name));
        Ok(())
    }

    /// Closes the innermost open element. `name` is the end tag, or `None`
    /// for a self-closing element.
    fn close(&mut self, name: Option<String>) -> Result<()> {
        let open = match self.stack.pop() {
            Some(open) => open,
            None => {
                return Err(StructuralError::UnmatchedEnd {
                    name: name.unwrap_or_default(),
                }
                .into());
            }
        };
        if let Some(name) = name
            && name != open.element.name()
        {
            return Err(StructuralError::UnmatchedEnd { name }.into());
        }

        let element = open.finish();
        match self.stack.last_mut() {
            Some(parent) => {
                parent.element.push_child(element);
            }
            None => self.root = Some(element),
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) -> Result<()> {
        match self.stack.last_mut() {
            Some(open) => {
                open.push_text(text);
                Ok(())
            }
            None => Err(StructuralError::ContentOutsideRoot.into()),
        }
    }
}

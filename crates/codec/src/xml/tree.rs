//! In-memory XML element tree.
//!
//! Encoding builds one of these before the single serialization call, and
//! decoding walks one produced by a single parse. Attributes, comments and
//! processing instructions are not represented; field data lives in element
//! names, text and children only.

use crate::config::CodecConfig;
use crate::error::Result;

/// One XML element: a tag, an optional text payload and ordered children.
///
/// `text` is `None` when the element has no character data at all. That is the
/// absent-value encoding for scalar fields, so it is kept distinct from
/// `Some(String::new())`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Creates a leaf element holding `text`.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Returns true if the element carries text other than whitespace.
    pub fn has_significant_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// First child with the given tag.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Appends `child` and returns a handle to it.
    pub fn push_child(&mut self, child: Element) -> &mut Element {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    /// Appends an empty child named `name` and returns a handle to it.
    pub fn sub_element(&mut self, name: impl Into<String>) -> &mut Element {
        self.push_child(Element::new(name))
    }

    /// Parses an XML document into its root element.
    pub fn parse(xml: &str, config: &CodecConfig) -> Result<Element> {
        crate::xml::de::from_xml_str(xml, config)
    }

    /// Serializes the tree with this element as the document root.
    pub fn to_xml(&self, config: &CodecConfig) -> Result<String> {
        crate::xml::ser::to_xml_string(self, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_element_appends_in_order() {
        let mut root = Element::new("person");
        root.sub_element("name").set_text("Ada");
        root.sub_element("age");

        let names: Vec<_> = root.children().iter().map(Element::name).collect();
        assert_eq!(names, vec!["name", "age"]);
        assert_eq!(root.child("name").and_then(Element::text), Some("Ada"));
        assert_eq!(root.child("age").and_then(Element::text), None);
    }

    #[test]
    fn test_significant_text() {
        assert!(!Element::new("a").has_significant_text());
        assert!(!Element::with_text("a", " \n\t").has_significant_text());
        assert!(Element::with_text("a", " x ").has_significant_text());
    }

    #[test]
    fn test_parse_and_to_xml() {
        let config = CodecConfig {
            pretty_print: false,
            xml_declaration: false,
            ..Default::default()
        };
        let root = Element::parse("<r><a>1</a><b/></r>", &config).unwrap();
        assert_eq!(root.to_xml(&config).unwrap(), "<r><a>1</a><b/></r>");
    }
}

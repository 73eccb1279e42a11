//! XML content types for tree nodes.
//!
//! `XmlContent` represents the payload of one DOM node: an element with its
//! attributes, a text chunk, a comment, or a processing instruction. The
//! diff model only looks at elements, attributes and text; comments and
//! processing instructions are carried so overlay output reproduces them.

use std::collections::HashMap;

/// Represents the content of an XML node.
#[derive(Debug, Clone)]
pub enum XmlContent {
    /// An XML element with a qualified name and attributes.
    Element(XmlElement),
    /// XML text content.
    Text(XmlText),
    /// XML comment.
    Comment(XmlComment),
    /// XML processing instruction.
    ProcessingInstruction(XmlProcessingInstruction),
}

impl XmlContent {
    /// Returns true if this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self, XmlContent::Element(_))
    }

    /// Returns true if this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self, XmlContent::Text(_))
    }

    /// Returns a reference to the element, if this is an element node.
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlContent::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns a mutable reference to the element, if this is an element node.
    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            XmlContent::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns a reference to the text, if this is a text node.
    pub fn as_text(&self) -> Option<&XmlText> {
        match self {
            XmlContent::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// An XML element with a qualified name and attributes.
///
/// Namespace prefixes are kept as an opaque part of the name; no namespace
/// resolution is performed.
#[derive(Debug, Clone)]
pub struct XmlElement {
    /// The qualified name of the element (e.g., "note", "ns:element").
    name: String,
    /// Attributes as key-value pairs. The key is the qualified attribute name.
    attributes: HashMap<String, String>,
}

impl XmlElement {
    /// Creates a new XML element with the given name and attributes.
    pub fn new(name: String, attributes: HashMap<String, String>) -> Self {
        XmlElement { name, attributes }
    }

    /// Returns the qualified name of the element.
    pub fn qname(&self) -> &str {
        &self.name
    }

    /// Returns the attributes.
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// Sets an attribute, replacing any existing value.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }
}

impl std::fmt::Display for XmlElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}", self.name)?;
        let mut attr_names: Vec<&String> = self.attributes.keys().collect();
        attr_names.sort();
        for name in attr_names {
            write!(f, " {}=\"{}\"", name, self.attributes[name])?;
        }
        write!(f, ">")
    }
}

/// XML text content, preserved exactly as written (no trimming).
#[derive(Debug, Clone)]
pub struct XmlText {
    text: String,
}

impl XmlText {
    /// Creates a new text node from a string.
    pub fn new(text: &str) -> Self {
        XmlText {
            text: text.to_string(),
        }
    }

    /// Returns the text content.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// XML comment content (without the markers).
#[derive(Debug, Clone)]
pub struct XmlComment {
    text: String,
}

impl XmlComment {
    /// Creates a new comment node from a string.
    pub fn new(text: &str) -> Self {
        XmlComment {
            text: text.to_string(),
        }
    }

    /// Returns the comment text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// XML processing instruction content.
#[derive(Debug, Clone)]
pub struct XmlProcessingInstruction {
    /// The target of the PI (e.g., "xml-stylesheet").
    target: String,
    /// The content of the PI (everything after the target).
    content: String,
}

impl XmlProcessingInstruction {
    /// Creates a new PI from target and content strings.
    pub fn new(target: &str, content: &str) -> Self {
        XmlProcessingInstruction {
            target: target.to_string(),
            content: content.to_string(),
        }
    }

    /// Returns the PI target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the PI content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_accessors() {
        let mut attrs = HashMap::new();
        attrs.insert("id".to_string(), "foo".to_string());
        let mut elem = XmlElement::new("note".to_string(), attrs);

        assert_eq!(elem.qname(), "note");
        assert_eq!(elem.attributes().get("id"), Some(&"foo".to_string()));

        elem.set_attribute("color", "#FF0000");
        assert_eq!(elem.attributes().get("color"), Some(&"#FF0000".to_string()));

        elem.set_attribute("color", "#FFFF00");
        assert_eq!(elem.attributes().get("color"), Some(&"#FFFF00".to_string()));
    }

    #[test]
    fn test_content_predicates() {
        let elem = XmlContent::Element(XmlElement::new("note".to_string(), HashMap::new()));
        let text = XmlContent::Text(XmlText::new("hello"));

        assert!(elem.is_element());
        assert!(!elem.is_text());
        assert!(text.is_text());
        assert!(elem.as_element().is_some());
        assert!(text.as_text().is_some());
        assert!(text.as_element().is_none());
    }

    #[test]
    fn test_text_preserves_whitespace() {
        let t = XmlText::new("  spaced  ");
        assert_eq!(t.text(), "  spaced  ");
    }
}

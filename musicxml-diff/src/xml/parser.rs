//! XML parser that builds DOM trees.
//!
//! Uses quick-xml's streaming API. Text is stored exactly as written:
//! whitespace is never trimmed or collapsed, because the diff content model
//! and the overlay round-trip both depend on verbatim text.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::node::{
    new_node_ref, NodeInner, NodeRef, XmlComment, XmlContent, XmlElement,
    XmlProcessingInstruction, XmlText,
};

/// XML parser that builds DOM trees.
pub struct XmlParser;

impl XmlParser {
    /// Parses XML from a string into a document node.
    pub fn parse_str(xml: &str) -> Result<NodeRef> {
        let mut reader = Reader::from_reader(xml.as_bytes());
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;
        Self::parse_reader(&mut reader)
    }

    /// Parses XML from a file into a document node.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<NodeRef> {
        let file = File::open(path)?;
        let buf_reader = BufReader::new(file);
        let mut reader = Reader::from_reader(buf_reader);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;
        Self::parse_reader(&mut reader)
    }

    /// Parses XML from a quick-xml Reader.
    fn parse_reader<R: Read + BufRead>(reader: &mut Reader<R>) -> Result<NodeRef> {
        // Synthetic document container; prolog nodes and the root element
        // become its children.
        let document = new_node_ref(NodeInner::new(None));

        let mut node_stack: Vec<NodeRef> = vec![document.clone()];
        let mut current_text: Option<String> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    Self::flush_text(&mut current_text, &node_stack);

                    let element = Self::parse_element(e, reader)?;
                    let node = new_node_ref(NodeInner::new(Some(XmlContent::Element(element))));
                    if let Some(parent) = node_stack.last() {
                        NodeInner::add_child_to_ref(parent, node.clone());
                    }
                    node_stack.push(node);
                }
                Ok(Event::End(_)) => {
                    Self::flush_text(&mut current_text, &node_stack);
                    node_stack.pop();
                }
                Ok(Event::Empty(ref e)) => {
                    // Self-closing tag, equivalent to Start + End.
                    Self::flush_text(&mut current_text, &node_stack);

                    let element = Self::parse_element(e, reader)?;
                    let node = new_node_ref(NodeInner::new(Some(XmlContent::Element(element))));
                    if let Some(parent) = node_stack.last() {
                        NodeInner::add_child_to_ref(parent, node);
                    }
                }
                Ok(Event::Text(e)) => {
                    let raw =
                        std::str::from_utf8(e.as_ref()).map_err(|e| Error::Parse(e.to_string()))?;
                    let text = unescape(raw).map_err(|e| Error::Parse(e.to_string()))?;
                    match current_text {
                        Some(ref mut existing) => existing.push_str(&text),
                        None => current_text = Some(text.to_string()),
                    }
                }
                Ok(Event::CData(ref e)) => {
                    let text = String::from_utf8_lossy(e.as_ref());
                    match current_text {
                        Some(ref mut existing) => existing.push_str(&text),
                        None => current_text = Some(text.to_string()),
                    }
                }
                Ok(Event::Comment(ref e)) => {
                    Self::flush_text(&mut current_text, &node_stack);

                    let comment_text = String::from_utf8_lossy(e.as_ref()).to_string();
                    let node = new_node_ref(NodeInner::new(Some(XmlContent::Comment(
                        XmlComment::new(&comment_text),
                    ))));
                    if let Some(parent) = node_stack.last() {
                        NodeInner::add_child_to_ref(parent, node);
                    }
                }
                Ok(Event::PI(ref e)) => {
                    Self::flush_text(&mut current_text, &node_stack);

                    // Split <?target content?> at the first whitespace.
                    let pi_data = String::from_utf8_lossy(e.as_ref()).to_string();
                    let (target, content) = match pi_data
                        .char_indices()
                        .find(|(_, c)| c.is_whitespace())
                        .map(|(i, _)| i)
                    {
                        Some(pos) => (
                            pi_data[..pos].to_string(),
                            pi_data[pos..].trim().to_string(),
                        ),
                        None => (pi_data, String::new()),
                    };

                    let node = new_node_ref(NodeInner::new(Some(
                        XmlContent::ProcessingInstruction(XmlProcessingInstruction::new(
                            &target, &content,
                        )),
                    )));
                    if let Some(parent) = node_stack.last() {
                        NodeInner::add_child_to_ref(parent, node);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(Event::Decl(_)) => {
                    // XML declaration is not modeled; the printer emits its own.
                }
                Ok(Event::DocType(_)) => {
                    // DOCTYPE is ignored.
                }
                Ok(Event::GeneralRef(_)) => {
                    // Unresolved general entity references are ignored.
                }
                Err(e) => return Err(Error::Parse(format!("XML parse error: {}", e))),
            }
            buf.clear();
        }

        if node_stack.len() != 1 {
            return Err(Error::Parse("unexpected end of document".to_string()));
        }

        let element_count = document
            .borrow()
            .children()
            .iter()
            .filter(|c| c.borrow().content().is_some_and(|c| c.is_element()))
            .count();
        if element_count != 1 {
            return Err(Error::Parse(format!(
                "expected exactly one root element, found {}",
                element_count
            )));
        }

        Ok(document)
    }

    /// Flushes accumulated text as a text node under the current parent.
    fn flush_text(current_text: &mut Option<String>, node_stack: &[NodeRef]) {
        if let Some(text) = current_text.take() {
            if text.is_empty() {
                return;
            }
            // Text outside the root element is only whitespace in well-formed
            // documents; drop it rather than attach it to the container.
            let at_document_level = node_stack.len() == 1;
            if at_document_level {
                return;
            }
            let node = new_node_ref(NodeInner::new(Some(XmlContent::Text(XmlText::new(&text)))));
            if let Some(parent) = node_stack.last() {
                NodeInner::add_child_to_ref(parent, node);
            }
        }
    }

    /// Parses an element's name and attributes.
    fn parse_element<R: Read + BufRead>(e: &BytesStart, reader: &Reader<R>) -> Result<XmlElement> {
        let qname = reader
            .decoder()
            .decode(e.name().as_ref())
            .map_err(|e| Error::Parse(e.to_string()))?
            .to_string();

        let mut attributes = HashMap::new();
        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|e| Error::Parse(format!("Attribute error: {}", e)))?;
            let key = reader
                .decoder()
                .decode(attr.key.as_ref())
                .map_err(|e| Error::Parse(e.to_string()))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::Parse(e.to_string()))?
                .to_string();
            attributes.insert(key, value);
        }

        Ok(XmlElement::new(qname, attributes))
    }
}

/// Parses XML from a string into a document node.
pub fn parse_str(xml: &str) -> Result<NodeRef> {
    XmlParser::parse_str(xml)
}

/// Parses XML from a file into a document node.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<NodeRef> {
    XmlParser::parse_file(path)
}

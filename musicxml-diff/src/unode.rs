//! Normalized tree representation for diffing.
//!
//! A [`UNode`] is the canonical, diffable form of an element: a name, an
//! attribute map, the concatenated direct text content, and the ordered list
//! of element children. Comments and processing instructions are not
//! modeled; text chunks interleaved with element children are collapsed onto
//! the parent, so mixed-content ordering is not preserved.
//!
//! Ids are dense integers assigned in document order by a per-parse counter.
//! The two sides of a diff each get their own id space starting at zero;
//! the cost model keys its memo tables with a side marker to keep them
//! disjoint.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::node::{NodeInner, NodeRef, XmlContent};
use crate::xml;

/// A normalized XML element tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UNode {
    /// Dense integer id, unique within one parse.
    pub id: usize,
    /// Element local name. Namespace prefixes are an opaque part of it.
    pub name: String,
    /// Attributes, unordered.
    pub attrs: HashMap<String, String>,
    /// Concatenated direct text content, whitespace preserved. Empty when
    /// the element has no text.
    pub text: String,
    /// Element children in document order.
    pub children: Vec<UNode>,
}

impl UNode {
    /// Total number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(UNode::node_count).sum::<usize>()
    }
}

/// Parses an XML document and returns its normalized root element.
pub fn parse(xml_text: &str) -> Result<UNode> {
    let document = xml::parse_str(xml_text)?;
    let root = NodeInner::document_element(&document)
        .ok_or_else(|| Error::Parse("document has no root element".to_string()))?;
    Ok(from_dom(&root))
}

/// Normalizes a DOM element subtree into a [`UNode`] tree.
///
/// Ids are assigned in preorder, starting at zero for each call.
pub fn from_dom(element: &NodeRef) -> UNode {
    let mut next_id = 0;
    build(element, &mut next_id)
}

fn build(element: &NodeRef, next_id: &mut usize) -> UNode {
    let id = *next_id;
    *next_id += 1;

    let borrowed = element.borrow();
    let elem = borrowed
        .content()
        .and_then(|c| c.as_element())
        .expect("UNode must be built from an element node");

    let name = elem.qname().to_string();
    let attrs = elem.attributes().clone();

    let mut text = String::new();
    let mut children = Vec::new();
    for child in borrowed.children() {
        let is_element = {
            let child_borrowed = child.borrow();
            match child_borrowed.content() {
                Some(XmlContent::Text(t)) => {
                    text.push_str(t.text());
                    false
                }
                Some(XmlContent::Element(_)) => true,
                // Comments and PIs are not part of the diff model.
                _ => false,
            }
        };
        if is_element {
            children.push(build(child, next_id));
        }
    }

    UNode {
        id,
        name,
        attrs,
        text,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let root = parse("<foo><bar/></foo>").unwrap();
        assert_eq!(root.name, "foo");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].name, "bar");
        assert_eq!(root.text, "");
    }

    #[test]
    fn test_ids_are_dense_preorder() {
        let root = parse("<a><b><c/></b><d/></a>").unwrap();
        assert_eq!(root.id, 0);
        assert_eq!(root.children[0].id, 1);
        assert_eq!(root.children[0].children[0].id, 2);
        assert_eq!(root.children[1].id, 3);
        assert_eq!(root.node_count(), 4);
    }

    #[test]
    fn test_id_counter_resets_per_parse() {
        let first = parse("<a><b/></a>").unwrap();
        let second = parse("<x><y/></x>").unwrap();
        assert_eq!(first.id, 0);
        assert_eq!(second.id, 0);
    }

    #[test]
    fn test_text_chunks_coalesced() {
        // <p>a<b/>c</p> becomes element p with text "ac" and one child.
        let root = parse("<p>a<b/>c</p>").unwrap();
        assert_eq!(root.text, "ac");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].name, "b");
    }

    #[test]
    fn test_text_whitespace_preserved() {
        let root = parse("<p>  a  </p>").unwrap();
        assert_eq!(root.text, "  a  ");
    }

    #[test]
    fn test_attributes_captured() {
        let root = parse(r#"<note id="n1" stem="up"/>"#).unwrap();
        assert_eq!(root.attrs.get("id"), Some(&"n1".to_string()));
        assert_eq!(root.attrs.get("stem"), Some(&"up".to_string()));
    }

    #[test]
    fn test_comments_and_pis_dropped() {
        let root = parse("<p><!-- x --><?pi data?><b/></p>").unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.text, "");
    }

    #[test]
    fn test_self_closing_equivalence() {
        let a = parse("<x/>").unwrap();
        let b = parse("<x></x>").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_malformed_propagates() {
        assert!(parse("<a><b></a>").is_err());
    }
}

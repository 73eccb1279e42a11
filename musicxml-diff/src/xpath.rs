//! XPath-style locators for diff tokens.
//!
//! Locators are absolute element paths of `/tag` segments with an optional
//! 1-based `[n]` predicate used when siblings share a tag name, optionally
//! terminated by `/@attr` (attribute) or `/text()` (direct text content).
//! No wildcards, axes or other predicates are supported.

use crate::error::{Error, Result};
use crate::node::{NodeInner, NodeRef};
use crate::unode::UNode;

/// Builds the locator for `child` under `parent_path`.
///
/// The `[k]` predicate is appended only when more than one sibling shares
/// the child's tag name; `k` is the child's 1-based position among those.
pub fn build_xpath(parent_path: &str, child: &UNode, siblings: &[UNode]) -> String {
    let same: Vec<&UNode> = siblings.iter().filter(|s| s.name == child.name).collect();
    if same.len() == 1 {
        format!("{}/{}", parent_path, child.name)
    } else {
        let k = same
            .iter()
            .position(|s| s.id == child.id)
            .map(|p| p + 1)
            .unwrap_or(1);
        format!("{}/{}[{}]", parent_path, child.name, k)
    }
}

/// Appends an attribute terminator to an element path.
pub fn attribute_path(element_path: &str, attr_name: &str) -> String {
    format!("{}/@{}", element_path, attr_name)
}

/// Appends the text terminator to an element path.
pub fn text_path(element_path: &str) -> String {
    format!("{}/text()", element_path)
}

/// One `/tag` or `/tag[n]` step of a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Element tag name.
    pub name: String,
    /// 1-based position among same-name siblings; `None` means first.
    pub index: Option<usize>,
}

/// The optional final step of a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminator {
    /// The locator addresses the element itself.
    None,
    /// The locator addresses an attribute of the element.
    Attribute(String),
    /// The locator addresses the element's direct text content.
    Text,
}

/// A parsed locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    /// Element path steps, outermost first.
    pub segments: Vec<Segment>,
    /// Attribute or text terminator, if any.
    pub terminator: Terminator,
}

impl Locator {
    /// Parses an absolute locator string.
    pub fn parse(path: &str) -> Result<Locator> {
        let rest = path
            .strip_prefix('/')
            .ok_or_else(|| Error::Parse(format!("locator must be absolute: {}", path)))?;
        if rest.is_empty() {
            return Err(Error::Parse("empty locator".to_string()));
        }

        let mut segments = Vec::new();
        let mut terminator = Terminator::None;

        let parts: Vec<&str> = rest.split('/').collect();
        for (i, part) in parts.iter().enumerate() {
            let last = i == parts.len() - 1;
            if let Some(attr) = part.strip_prefix('@') {
                if !last || attr.is_empty() {
                    return Err(Error::Parse(format!("bad attribute step in {}", path)));
                }
                terminator = Terminator::Attribute(attr.to_string());
            } else if *part == "text()" {
                if !last {
                    return Err(Error::Parse(format!("bad text() step in {}", path)));
                }
                terminator = Terminator::Text;
            } else {
                segments.push(Self::parse_segment(part, path)?);
            }
        }

        if segments.is_empty() {
            return Err(Error::Parse(format!("locator has no element step: {}", path)));
        }

        Ok(Locator {
            segments,
            terminator,
        })
    }

    fn parse_segment(part: &str, path: &str) -> Result<Segment> {
        if part.is_empty() {
            return Err(Error::Parse(format!("empty step in locator: {}", path)));
        }
        match part.find('[') {
            Some(open) => {
                if open == 0 {
                    return Err(Error::Parse(format!("empty step name in {}", path)));
                }
                let close = part
                    .rfind(']')
                    .filter(|&c| c == part.len() - 1 && c > open + 1)
                    .ok_or_else(|| Error::Parse(format!("bad predicate in {}", path)))?;
                let index: usize = part[open + 1..close]
                    .parse()
                    .map_err(|_| Error::Parse(format!("bad position in {}", path)))?;
                if index == 0 {
                    return Err(Error::Parse(format!("positions are 1-based: {}", path)));
                }
                Ok(Segment {
                    name: part[..open].to_string(),
                    index: Some(index),
                })
            }
            None => Ok(Segment {
                name: part.to_string(),
                index: None,
            }),
        }
    }

    /// Resolves the element path against a document node, ignoring any
    /// attribute or text terminator. Returns the addressed element, or
    /// `None` when a step does not match.
    pub fn resolve_element(&self, document: &NodeRef) -> Option<NodeRef> {
        let mut current = document.clone();
        for segment in &self.segments {
            let wanted = segment.index.unwrap_or(1);
            let mut seen = 0;
            let mut found = None;
            for child in NodeInner::element_children(&current) {
                if child.borrow().element_name().as_deref() == Some(segment.name.as_str()) {
                    seen += 1;
                    if seen == wanted {
                        found = Some(child);
                        break;
                    }
                }
            }
            current = found?;
        }
        Some(current)
    }
}

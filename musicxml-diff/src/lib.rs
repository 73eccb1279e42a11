//! musicxml-diff - Structural XML diff with a MusicXML colored overlay
//!
//! This library computes a structural, semantic diff between two XML
//! documents and projects it onto the documents as a colored overlay:
//! selected ancestor elements receive a `color` attribute so a downstream
//! renderer can highlight insertions, deletions and changes.
//!
//! # Overview
//!
//! The diff engine normalizes both documents into element trees, computes
//! a minimal-cost edit mapping with memoized tree-edit distance over
//! ordered children, and emits a flat stream of typed tokens (element /
//! attribute / content, inserted / deleted / changed) addressed by
//! positional XPath locators.
//!
//! The overlay projector resolves each token against the source documents,
//! walks to the nearest musically meaningful ancestor (note, measure,
//! direction, ...) and colors it: green for insertions, red for deletions,
//! yellow for changes. Tokens that resolve nowhere colorable are reported,
//! never fatal.
//!
//! Both entry points are pure synchronous functions; all memoization is
//! scoped to one call, so concurrent use needs no coordination.

pub mod constants;
pub mod diff;
pub mod error;
pub mod node;
pub mod overlay;
pub mod unode;
pub mod xml;
pub mod xpath;

// Re-export commonly used types
pub use constants::{COLORABLE_TAGS, COLOR_ATTR, COLOR_CHANGE, COLOR_DELETE, COLOR_INSERT};
pub use diff::{DiffPlanner, EditType, XmlDiffToken};
pub use error::{Error, Result};
pub use node::{NodeInner, NodeRef, XmlContent, XmlElement, XmlText};
pub use overlay::MusicXmlDiffResult;
pub use unode::UNode;
pub use xml::{parse_file, parse_str, XmlParser, XmlPrinter};
pub use xpath::Locator;

/// Computes the diff token stream for two XML documents.
///
/// Token locators are valid in the respective side's document: the old
/// side for deletions, the new side for insertions, both for changes.
/// Fails when either input is not well-formed XML.
pub fn compute_xml_diff_tokens(old_xml: &str, new_xml: &str) -> Result<Vec<XmlDiffToken>> {
    let old_root = unode::parse(old_xml)?;
    let new_root = unode::parse(new_xml)?;
    Ok(DiffPlanner::diff(&old_root, &new_root))
}

/// Applies overlay coloring for `tokens` to both documents.
///
/// Returns the colored documents and the tokens that could not be
/// projected. Fails only when a document does not parse.
pub fn process_musicxml_diff(
    old_xml: &str,
    new_xml: &str,
    tokens: &[XmlDiffToken],
) -> Result<MusicXmlDiffResult> {
    overlay::project_overlay(old_xml, new_xml, tokens)
}

//! MusicXML overlay projection.
//!
//! Projects a diff token stream onto the two source documents: each token's
//! locator is resolved, the walk from the addressed element upward (starting
//! at the element itself) finds the nearest colorable ancestor, and that
//! element receives a `color` attribute. Tokens with no colorable landing
//! site on any required side are collected, never fatal.

use tracing::{debug, trace};

use crate::constants::{is_colorable, COLOR_ATTR, COLOR_CHANGE, COLOR_DELETE, COLOR_INSERT};
use crate::diff::{EditType, XmlDiffToken};
use crate::error::Result;
use crate::node::NodeRef;
use crate::xml;
use crate::xpath::Locator;

/// The two colored documents plus the tokens that could not be projected.
#[derive(Debug, Clone)]
pub struct MusicXmlDiffResult {
    /// Old document with DELETE/CHANGE coloring applied.
    pub old_xml: String,
    /// New document with INSERT/CHANGE coloring applied.
    pub new_xml: String,
    /// Tokens that resolved nowhere colorable, in input order.
    pub unused_tokens: Vec<XmlDiffToken>,
}

/// Applies overlay coloring for `tokens` to both documents.
///
/// Fails only when a document does not parse; unresolvable tokens are
/// reported through `unused_tokens`.
pub fn project_overlay(
    old_xml: &str,
    new_xml: &str,
    tokens: &[XmlDiffToken],
) -> Result<MusicXmlDiffResult> {
    let old_doc = xml::parse_str(old_xml)?;
    let new_doc = xml::parse_str(new_xml)?;

    let mut unused_tokens = Vec::new();
    for token in tokens {
        if !apply_token(&old_doc, &new_doc, token) {
            trace!(xpath = token.xpath(), edit = %token.edit(), "token not projectable");
            unused_tokens.push(token.clone());
        }
    }
    debug!(
        tokens = tokens.len(),
        unused = unused_tokens.len(),
        "overlay projected"
    );

    Ok(MusicXmlDiffResult {
        old_xml: xml::print_to_string(&old_doc)?,
        new_xml: xml::print_to_string(&new_doc)?,
        unused_tokens,
    })
}

/// Colors the element(s) a token addresses. Returns false when the token
/// found no colorable landing site.
fn apply_token(old_doc: &NodeRef, new_doc: &NodeRef, token: &XmlDiffToken) -> bool {
    let locator = match Locator::parse(token.xpath()) {
        Ok(locator) => locator,
        Err(_) => return false,
    };

    match (token.is_element(), token.edit()) {
        (true, EditType::Insert) => color_side(new_doc, &locator, COLOR_INSERT),
        (true, EditType::Delete) => color_side(old_doc, &locator, COLOR_DELETE),
        // Attribute and content edits have no element of their own to
        // color; both sides show as a change.
        _ => {
            let old_colored = color_side(old_doc, &locator, COLOR_CHANGE);
            let new_colored = color_side(new_doc, &locator, COLOR_CHANGE);
            old_colored || new_colored
        }
    }
}

fn color_side(document: &NodeRef, locator: &Locator, color: &str) -> bool {
    let Some(node) = locator.resolve_element(document) else {
        return false;
    };
    let Some(target) = colorable_ancestor(&node) else {
        return false;
    };
    if let Some(elem) = target
        .borrow_mut()
        .content_mut()
        .and_then(|c| c.as_element_mut())
    {
        elem.set_attribute(COLOR_ATTR, color);
    }
    true
}

/// Walks from `node` upward through element ancestors, returning the first
/// whose tag is colorable. The walk includes the starting element.
fn colorable_ancestor(node: &NodeRef) -> Option<NodeRef> {
    let mut current = node.clone();
    loop {
        let name = current.borrow().element_name();
        if name.as_deref().is_some_and(is_colorable) {
            return Some(current);
        }
        let parent = current.borrow().parent().upgrade();
        match parent {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffPlanner;
    use crate::unode;

    fn compute(old_xml: &str, new_xml: &str) -> Vec<XmlDiffToken> {
        let old = unode::parse(old_xml).unwrap();
        let new = unode::parse(new_xml).unwrap();
        DiffPlanner::diff(&old, &new)
    }

    #[test]
    fn test_colorable_ancestor_includes_self() {
        let document = xml::parse_str("<measure><note><pitch/></note></measure>").unwrap();
        let note = Locator::parse("/measure/note")
            .unwrap()
            .resolve_element(&document)
            .unwrap();

        let target = colorable_ancestor(&note).unwrap();
        assert_eq!(target.borrow().element_name(), Some("note".to_string()));

        let pitch = Locator::parse("/measure/note/pitch")
            .unwrap()
            .resolve_element(&document)
            .unwrap();
        let target = colorable_ancestor(&pitch).unwrap();
        assert_eq!(target.borrow().element_name(), Some("note".to_string()));
    }

    #[test]
    fn test_element_insert_colors_new_side_green() {
        let old = "<measure><note>A</note></measure>";
        let new = "<measure><note>A</note><note>B</note></measure>";
        let tokens = compute(old, new);
        let result = project_overlay(old, new, &tokens).unwrap();

        assert!(result.new_xml.contains(r##"<note color="#00FF00">B</note>"##));
        assert!(!result.old_xml.contains("color"));
        assert!(result.unused_tokens.is_empty());
    }

    #[test]
    fn test_element_delete_colors_old_side_red() {
        let old = "<measure><note>A</note><note>B</note></measure>";
        let new = "<measure><note>A</note></measure>";
        let tokens = compute(old, new);
        let result = project_overlay(old, new, &tokens).unwrap();

        assert!(result.old_xml.contains(r##"<note color="#FF0000">B</note>"##));
        assert!(!result.new_xml.contains("color"));
        assert!(result.unused_tokens.is_empty());
    }

    #[test]
    fn test_content_change_colors_both_sides_yellow() {
        let old = "<measure><note>B</note></measure>";
        let new = "<measure><note>C</note></measure>";
        let tokens = compute(old, new);
        let result = project_overlay(old, new, &tokens).unwrap();

        assert!(result.old_xml.contains(r##"<note color="#FFFF00">B</note>"##));
        assert!(result.new_xml.contains(r##"<note color="#FFFF00">C</note>"##));
        assert!(result.unused_tokens.is_empty());
    }

    #[test]
    fn test_attribute_insert_is_yellow_not_green() {
        let old = "<measure><note/></measure>";
        let new = r#"<measure><note stem="up"/></measure>"#;
        let tokens = compute(old, new);
        let result = project_overlay(old, new, &tokens).unwrap();

        // An attribute has no element of its own on the old side either;
        // both sides show the change color.
        assert!(result.old_xml.contains(r##"<note color="#FFFF00"/>"##));
        assert!(result
            .new_xml
            .contains(r##"<note color="#FFFF00" stem="up"/>"##));
    }

    #[test]
    fn test_no_colorable_ancestor_reports_unused() {
        let old = "<doc><p>one</p></doc>";
        let new = "<doc><p>two</p></doc>";
        let tokens = compute(old, new);
        assert_eq!(tokens.len(), 1);

        let result = project_overlay(old, new, &tokens).unwrap();
        assert_eq!(result.unused_tokens, tokens);
        assert!(!result.old_xml.contains("color"));
        assert!(!result.new_xml.contains("color"));
    }

    #[test]
    fn test_unresolvable_locator_reports_unused_in_order() {
        let old = "<measure><note>A</note></measure>";
        let new = old;
        let tokens = vec![
            XmlDiffToken::element_delete("/measure/note[9]".into(), "note".into()),
            XmlDiffToken::content_change("/nowhere/text()".into(), "a".into(), "b".into()),
        ];
        let result = project_overlay(old, new, &tokens).unwrap();
        assert_eq!(result.unused_tokens, tokens);
    }

    #[test]
    fn test_later_token_overwrites_earlier_color() {
        let old = "<measure><note>A</note></measure>";
        let new = old;
        let tokens = vec![
            XmlDiffToken::element_delete("/measure/note".into(), "note".into()),
            XmlDiffToken::content_change("/measure/note/text()".into(), "A".into(), "B".into()),
        ];
        let result = project_overlay(old, new, &tokens).unwrap();

        // Last writer wins; exactly one color appears.
        assert!(result.old_xml.contains(r##"<note color="#FFFF00">A</note>"##));
        assert!(!result.old_xml.contains("#FF0000"));
    }

    #[test]
    fn test_existing_color_attribute_is_replaced() {
        let old = r##"<measure><note color="#123456">A</note></measure>"##;
        let new = r##"<measure><note color="#123456">B</note></measure>"##;
        let tokens = compute(old, new);
        let result = project_overlay(old, new, &tokens).unwrap();

        assert!(result.old_xml.contains(r##"<note color="#FFFF00">A</note>"##));
        assert!(!result.old_xml.contains("#123456"));
    }

    #[test]
    fn test_projection_touches_nothing_else() {
        let old = "<measure><note><pitch><step>C</step></pitch></note><direction/></measure>";
        let new = "<measure><note><pitch><step>D</step></pitch></note><direction/></measure>";
        let tokens = compute(old, new);
        let result = project_overlay(old, new, &tokens).unwrap();

        // Removing the color attributes must give back the plain document.
        let stripped = result.old_xml.replace(r##" color="#FFFF00""##, "");
        let plain = xml::print_to_string(&xml::parse_str(old).unwrap()).unwrap();
        assert_eq!(stripped, plain);
    }

    #[test]
    fn test_musicxml_change_and_insert_scenario() {
        let old = "<score-partwise><part id=\"P1\"><measure number=\"1\">\
                   <note><pitch><step>C</step></pitch></note>\
                   <note><pitch><step>D</step></pitch></note>\
                   </measure></part></score-partwise>";
        let new = "<score-partwise><part id=\"P1\"><measure number=\"1\">\
                   <note><pitch><step>C</step></pitch></note>\
                   <note><pitch><step>E</step></pitch></note>\
                   <note><pitch><step>F</step></pitch></note>\
                   </measure></part></score-partwise>";

        let tokens = compute(old, new);
        let result = project_overlay(old, new, &tokens).unwrap();

        // The D-pitch note reads as changed on the old side.
        assert!(result
            .old_xml
            .contains(r##"<note color="#FFFF00"><pitch><step>D</step></pitch></note>"##));
        // The E-pitch note reads as changed, the F-pitch note as inserted.
        assert!(result
            .new_xml
            .contains(r##"<note color="#FFFF00"><pitch><step>E</step></pitch></note>"##));
        assert!(result
            .new_xml
            .contains(r##"<note color="#00FF00"><pitch><step>F</step></pitch></note>"##));
        assert!(result.unused_tokens.is_empty());
    }
}

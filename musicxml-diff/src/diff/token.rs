//! Typed diff tokens.
//!
//! A token describes one elementary edit (element, attribute or direct text
//! content, inserted, deleted or changed) addressed by a locator. The serde
//! representation is the wire schema shared across implementations:
//! `{editType, nodeType, xpath, name?, oldValue?, newValue?}`.

use serde::{Deserialize, Serialize};

/// The kind of edit a token describes.
///
/// Elements are never `Change`: a renamed element surfaces as a
/// delete/insert pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EditType {
    Insert,
    Delete,
    Change,
}

impl std::fmt::Display for EditType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditType::Insert => write!(f, "INSERT"),
            EditType::Delete => write!(f, "DELETE"),
            EditType::Change => write!(f, "CHANGE"),
        }
    }
}

/// One elementary edit with its locator.
///
/// Value presence follows the edit type: INSERT carries `new_value` only,
/// DELETE carries `old_value` only, CHANGE carries both. The constructors
/// below enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "UPPERCASE")]
pub enum XmlDiffToken {
    /// An element was inserted or deleted.
    Element {
        #[serde(rename = "editType")]
        edit: EditType,
        xpath: String,
        name: String,
    },
    /// An attribute was inserted, deleted or changed.
    Attribute {
        #[serde(rename = "editType")]
        edit: EditType,
        xpath: String,
        name: String,
        #[serde(rename = "oldValue", skip_serializing_if = "Option::is_none", default)]
        old_value: Option<String>,
        #[serde(rename = "newValue", skip_serializing_if = "Option::is_none", default)]
        new_value: Option<String>,
    },
    /// Direct text content was inserted, deleted or changed.
    Content {
        #[serde(rename = "editType")]
        edit: EditType,
        xpath: String,
        #[serde(rename = "oldValue", skip_serializing_if = "Option::is_none", default)]
        old_value: Option<String>,
        #[serde(rename = "newValue", skip_serializing_if = "Option::is_none", default)]
        new_value: Option<String>,
    },
}

impl XmlDiffToken {
    /// Token for an inserted element.
    pub fn element_insert(xpath: String, name: String) -> Self {
        XmlDiffToken::Element {
            edit: EditType::Insert,
            xpath,
            name,
        }
    }

    /// Token for a deleted element.
    pub fn element_delete(xpath: String, name: String) -> Self {
        XmlDiffToken::Element {
            edit: EditType::Delete,
            xpath,
            name,
        }
    }

    /// Token for an inserted attribute.
    pub fn attribute_insert(xpath: String, name: String, new_value: String) -> Self {
        XmlDiffToken::Attribute {
            edit: EditType::Insert,
            xpath,
            name,
            old_value: None,
            new_value: Some(new_value),
        }
    }

    /// Token for a deleted attribute.
    pub fn attribute_delete(xpath: String, name: String, old_value: String) -> Self {
        XmlDiffToken::Attribute {
            edit: EditType::Delete,
            xpath,
            name,
            old_value: Some(old_value),
            new_value: None,
        }
    }

    /// Token for an attribute whose value changed.
    pub fn attribute_change(
        xpath: String,
        name: String,
        old_value: String,
        new_value: String,
    ) -> Self {
        XmlDiffToken::Attribute {
            edit: EditType::Change,
            xpath,
            name,
            old_value: Some(old_value),
            new_value: Some(new_value),
        }
    }

    /// Token for inserted text content.
    pub fn content_insert(xpath: String, new_value: String) -> Self {
        XmlDiffToken::Content {
            edit: EditType::Insert,
            xpath,
            old_value: None,
            new_value: Some(new_value),
        }
    }

    /// Token for deleted text content.
    pub fn content_delete(xpath: String, old_value: String) -> Self {
        XmlDiffToken::Content {
            edit: EditType::Delete,
            xpath,
            old_value: Some(old_value),
            new_value: None,
        }
    }

    /// Token for changed text content.
    pub fn content_change(xpath: String, old_value: String, new_value: String) -> Self {
        XmlDiffToken::Content {
            edit: EditType::Change,
            xpath,
            old_value: Some(old_value),
            new_value: Some(new_value),
        }
    }

    /// The edit type of this token.
    pub fn edit(&self) -> EditType {
        match self {
            XmlDiffToken::Element { edit, .. }
            | XmlDiffToken::Attribute { edit, .. }
            | XmlDiffToken::Content { edit, .. } => *edit,
        }
    }

    /// The locator of this token.
    pub fn xpath(&self) -> &str {
        match self {
            XmlDiffToken::Element { xpath, .. }
            | XmlDiffToken::Attribute { xpath, .. }
            | XmlDiffToken::Content { xpath, .. } => xpath,
        }
    }

    /// Returns true if this token addresses an element.
    pub fn is_element(&self) -> bool {
        matches!(self, XmlDiffToken::Element { .. })
    }
}

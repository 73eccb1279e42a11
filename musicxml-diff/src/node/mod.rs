//! Node structures for the XML DOM tree.
//!
//! The DOM is the mutable in-memory form of a document used by the parser,
//! the printer and the overlay projector. Nodes are reference counted with
//! weak parent links so ancestor walks are cheap. The document itself is a
//! synthetic container node with no content whose children are the
//! prolog (PIs, comments) and the root element.

mod xml_content;

pub use xml_content::{XmlComment, XmlContent, XmlElement, XmlProcessingInstruction, XmlText};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A reference-counted pointer to a node.
pub type NodeRef = Rc<RefCell<NodeInner>>;

/// Creates a new node reference.
pub fn new_node_ref(inner: NodeInner) -> NodeRef {
    Rc::new(RefCell::new(inner))
}

/// A node in the DOM tree.
#[derive(Debug)]
pub struct NodeInner {
    /// Child nodes, in document order.
    children: Vec<NodeRef>,
    /// Content of this node; `None` marks the synthetic document container.
    content: Option<XmlContent>,
    /// Weak reference to the parent node.
    parent: Weak<RefCell<NodeInner>>,
}

impl NodeInner {
    /// Creates a node with the given content.
    pub fn new(content: Option<XmlContent>) -> Self {
        NodeInner {
            children: Vec::new(),
            content,
            parent: Weak::new(),
        }
    }

    /// Returns the content of this node.
    pub fn content(&self) -> Option<&XmlContent> {
        self.content.as_ref()
    }

    /// Returns a mutable reference to the content.
    pub fn content_mut(&mut self) -> Option<&mut XmlContent> {
        self.content.as_mut()
    }

    /// Returns the number of children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns the children as a slice.
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// Returns a weak reference to the parent.
    pub fn parent(&self) -> &Weak<RefCell<NodeInner>> {
        &self.parent
    }

    /// Returns the element name, if this node is an element.
    pub fn element_name(&self) -> Option<String> {
        self.content
            .as_ref()
            .and_then(|c| c.as_element())
            .map(|e| e.qname().to_string())
    }
}

/// Helper functions that work with NodeRef.
impl NodeInner {
    /// Adds a child node. Must be called on the NodeRef wrapper.
    pub fn add_child_to_ref(parent_ref: &NodeRef, child_ref: NodeRef) {
        child_ref.borrow_mut().parent = Rc::downgrade(parent_ref);
        parent_ref.borrow_mut().children.push(child_ref);
    }

    /// Returns the document's root element, skipping prolog nodes.
    pub fn document_element(document: &NodeRef) -> Option<NodeRef> {
        document
            .borrow()
            .children()
            .iter()
            .find(|c| c.borrow().content().is_some_and(|c| c.is_element()))
            .cloned()
    }

    /// Returns the element children of a node, in document order.
    pub fn element_children(node: &NodeRef) -> Vec<NodeRef> {
        node.borrow()
            .children()
            .iter()
            .filter(|c| c.borrow().content().is_some_and(|c| c.is_element()))
            .cloned()
            .collect()
    }
}

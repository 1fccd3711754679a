//! Shared node storage.
//!
//! Nodes and node lists are reference-counted handles with interior
//! mutability. Cloning a handle aliases the storage; identity is pointer
//! identity (`ptr_eq`), never value equality.
//!
//! Invariants:
//! - A structured element's first child is its content slot; its inner markup
//!   lives in the slot's children.
//! - Handles are `!Send`: a document and all of its views live on one thread.

use crate::attributes::Attributes;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct NodeData {
    pub content: String,
    pub attributes: Attributes,
    pub children: Structure,
}

#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeData>>);

impl Node {
    pub fn new(content: impl Into<String>, attributes: Attributes, children: Structure) -> Self {
        Node(Rc::new(RefCell::new(NodeData {
            content: content.into(),
            attributes,
            children,
        })))
    }

    /// A fragment with no attributes and no children.
    pub fn leaf(content: impl Into<String>) -> Self {
        Node::new(content, Attributes::new(), Structure::new())
    }

    pub fn content(&self) -> Ref<'_, str> {
        Ref::map(self.0.borrow(), |data| data.content.as_str())
    }

    pub fn set_content(&self, content: impl Into<String>) {
        self.0.borrow_mut().content = content.into();
    }

    pub fn attributes(&self) -> Ref<'_, Attributes> {
        Ref::map(self.0.borrow(), |data| &data.attributes)
    }

    pub fn attributes_mut(&self) -> RefMut<'_, Attributes> {
        RefMut::map(self.0.borrow_mut(), |data| &mut data.attributes)
    }

    /// Aliasing handle to this node's children.
    pub fn children(&self) -> Structure {
        self.0.borrow().children.clone()
    }

    /// The first child, which holds the inner content of a structured element.
    pub fn content_slot(&self) -> Option<Node> {
        self.0.borrow().children.first()
    }

    pub fn is_leaf(&self) -> bool {
        self.0.borrow().children.is_empty()
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[cfg(feature = "internal-api")]
    pub fn data(&self) -> Ref<'_, NodeData> {
        self.0.borrow()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("Node")
            .field("content", &data.content)
            .field("attributes", &data.attributes)
            .field("children", &data.children)
            .finish()
    }
}

/// An ordered, shared list of nodes: the document roots or a node's children.
#[derive(Clone, Default)]
pub struct Structure(Rc<RefCell<Vec<Node>>>);

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Structure(Rc::new(RefCell::new(nodes)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn first(&self) -> Option<Node> {
        self.0.borrow().first().cloned()
    }

    pub fn get(&self, index: usize) -> Option<Node> {
        self.0.borrow().get(index).cloned()
    }

    /// Snapshot of the current handles; safe to hold across mutations.
    pub fn nodes(&self) -> Vec<Node> {
        self.0.borrow().clone()
    }

    /// Position of `node` by identity.
    pub fn position(&self, node: &Node) -> Option<usize> {
        self.0.borrow().iter().position(|n| n.ptr_eq(node))
    }

    pub fn push(&self, node: Node) {
        self.0.borrow_mut().push(node);
    }

    pub fn insert_all(&self, index: usize, nodes: Vec<Node>) {
        let mut list = self.0.borrow_mut();
        let index = index.min(list.len());
        list.splice(index..index, nodes);
    }

    pub fn extend(&self, nodes: Vec<Node>) {
        self.0.borrow_mut().extend(nodes);
    }

    /// Remove `node` by identity. Returns whether anything was removed.
    pub fn remove_node(&self, node: &Node) -> bool {
        let mut list = self.0.borrow_mut();
        let before = list.len();
        list.retain(|n| !n.ptr_eq(node));
        list.len() != before
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn ptr_eq(&self, other: &Structure) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn borrow(&self) -> Ref<'_, Vec<Node>> {
        self.0.borrow()
    }
}

impl fmt::Debug for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}

impl FromIterator<Node> for Structure {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Structure::from_nodes(iter.into_iter().collect())
    }
}

//! In-place edits through a document or view.
//!
//! Every operation targets the focus node (see [`Document::node`]) and writes
//! through shared storage, so the edit is visible from the source document and
//! every other view over it. Missing targets make an operation a no-op.

use crate::attributes::AttrKey;
use crate::document::Document;
use crate::node::{Node, Structure};
use crate::render::{render, strip_tags};
use std::fmt;

/// Something that can be spliced into a structure.
#[derive(Clone, Debug)]
pub enum Insertable {
    /// Node handles inserted as-is, sharing storage with wherever they came from.
    Nodes(Vec<Node>),
    /// Becomes a single leaf fragment, written verbatim.
    Text(String),
}

impl Insertable {
    pub fn text(value: impl fmt::Display) -> Self {
        Insertable::Text(value.to_string())
    }

    fn into_nodes(self) -> Vec<Node> {
        match self {
            Insertable::Nodes(nodes) => nodes,
            Insertable::Text(text) => vec![Node::leaf(text)],
        }
    }
}

impl From<&Document> for Insertable {
    fn from(doc: &Document) -> Self {
        Insertable::Nodes(doc.structure().nodes())
    }
}

impl From<Document> for Insertable {
    fn from(doc: Document) -> Self {
        Insertable::from(&doc)
    }
}

impl From<Vec<Node>> for Insertable {
    fn from(nodes: Vec<Node>) -> Self {
        Insertable::Nodes(nodes)
    }
}

impl From<Node> for Insertable {
    fn from(node: Node) -> Self {
        Insertable::Nodes(vec![node])
    }
}

impl From<&str> for Insertable {
    fn from(text: &str) -> Self {
        Insertable::Text(text.to_owned())
    }
}

impl From<String> for Insertable {
    fn from(text: String) -> Self {
        Insertable::Text(text)
    }
}

impl From<&String> for Insertable {
    fn from(text: &String) -> Self {
        Insertable::Text(text.clone())
    }
}

/// True when `node`'s subtree owns `target`, so splicing `node` into `target`
/// would make the node its own descendant.
fn owns_structure(node: &Node, target: &Structure) -> bool {
    let children = node.children();
    children.ptr_eq(target) || children.nodes().iter().any(|child| owns_structure(child, target))
}

fn splice_would_cycle(nodes: &[Node], target: &Structure) -> bool {
    let cycles = nodes.iter().any(|node| owns_structure(node, target));
    if cycles {
        log::debug!(target: "string_doc.mutate", "skipped insert: a node would contain itself");
    }
    cycles
}

impl Document {
    pub fn set_attribute(&self, key: impl Into<AttrKey>, value: impl Into<String>) {
        let key = key.into();
        let Some(node) = self.node() else {
            log::debug!(target: "string_doc.mutate", "set_attribute {key}: no node");
            return;
        };
        log::trace!(target: "string_doc.mutate", "set_attribute {key}");
        node.attributes_mut().set(key, Some(value.into()));
    }

    /// Same as [`Document::set_attribute`].
    pub fn update_attribute(&self, key: impl Into<AttrKey>, value: impl Into<String>) {
        self.set_attribute(key, value);
    }

    /// A bare attribute reads as the empty string.
    pub fn get_attribute(&self, key: impl Into<AttrKey>) -> Option<String> {
        let key = key.into();
        let node = self.node()?;
        let attributes = node.attributes();
        attributes.get(&key).map(str::to_owned)
    }

    pub fn remove_attribute(&self, key: impl Into<AttrKey>) {
        let key = key.into();
        if let Some(node) = self.node() {
            if node.attributes_mut().remove(&key).is_some() {
                log::trace!(target: "string_doc.mutate", "remove_attribute {key}");
            }
        }
    }

    /// Detach the focus node from the structure that holds it.
    pub fn remove(&self) {
        let Some(node) = self.node() else {
            return;
        };
        if !self.structure().remove_node(&node) {
            log::debug!(target: "string_doc.mutate", "remove: node already detached");
        }
    }

    /// Empty the inner markup of the focus node.
    pub fn clear(&self) {
        match self.slot() {
            Some(slot) => slot.children().clear(),
            None => log::debug!(target: "string_doc.mutate", "clear: focus has no content slot"),
        }
    }

    /// Inner markup with every tag removed.
    pub fn text(&self) -> String {
        strip_tags(&self.html()).into_owned()
    }

    pub fn set_text(&self, text: impl fmt::Display) {
        self.set_inner(Insertable::text(text));
    }

    /// Inner markup of the focus node.
    pub fn html(&self) -> String {
        self.slot()
            .map(|slot| render(&slot.children()))
            .unwrap_or_default()
    }

    pub fn set_html(&self, html: impl fmt::Display) {
        self.set_inner(Insertable::text(html));
    }

    fn set_inner(&self, content: Insertable) {
        let Some(slot) = self.slot() else {
            log::debug!(target: "string_doc.mutate", "set inner content: focus has no content slot");
            return;
        };
        let children = slot.children();
        children.clear();
        children.extend(content.into_nodes());
    }

    pub fn append(&self, content: impl Into<Insertable>) {
        let nodes = content.into().into_nodes();
        let Some(slot) = self.slot() else {
            log::debug!(target: "string_doc.mutate", "append: focus has no content slot");
            return;
        };
        let children = slot.children();
        if !splice_would_cycle(&nodes, &children) {
            children.extend(nodes);
        }
    }

    pub fn prepend(&self, content: impl Into<Insertable>) {
        let nodes = content.into().into_nodes();
        let Some(slot) = self.slot() else {
            log::debug!(target: "string_doc.mutate", "prepend: focus has no content slot");
            return;
        };
        let children = slot.children();
        if !splice_would_cycle(&nodes, &children) {
            children.insert_all(0, nodes);
        }
    }

    /// Insert siblings right after the focus node.
    pub fn after(&self, content: impl Into<Insertable>) {
        self.insert_sibling(content.into(), 1);
    }

    /// Insert siblings right before the focus node.
    pub fn before(&self, content: impl Into<Insertable>) {
        self.insert_sibling(content.into(), 0);
    }

    fn insert_sibling(&self, content: Insertable, offset: usize) {
        let nodes = content.into_nodes();
        let structure = self.structure();
        if splice_would_cycle(&nodes, structure) {
            return;
        }
        let Some(node) = self.node() else {
            structure.extend(nodes);
            return;
        };
        match structure.position(&node) {
            Some(index) => structure.insert_all(index + offset, nodes),
            None => log::debug!(target: "string_doc.mutate", "insert sibling: focus is detached"),
        }
    }

    /// Swap the focus node for `content`. A detached focus leaves nothing to
    /// remove, and the content goes to the front of the structure.
    pub fn replace(&self, content: impl Into<Insertable>) {
        let nodes = content.into().into_nodes();
        let structure = self.structure();
        if splice_would_cycle(&nodes, structure) {
            return;
        }
        let index = self
            .node()
            .and_then(|node| {
                let index = structure.position(&node)?;
                structure.remove_node(&node);
                Some(index)
            })
            .unwrap_or(0);
        log::trace!(target: "string_doc.mutate", "replace at {index} with {} nodes", nodes.len());
        structure.insert_all(index, nodes);
    }
}

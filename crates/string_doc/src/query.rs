//! Discovery of binding points.
//!
//! Every query walks the view's structure depth-first, parent before children,
//! left to right, and hands back documents that alias the storage they were
//! found in.

use crate::attributes::AttrKey;
use crate::document::Document;
use crate::node::{Node, Structure};
use std::collections::BTreeMap;

/// A node carrying `data-scope`, with what belongs to it.
#[derive(Clone, Debug)]
pub struct Scope {
    pub doc: Document,
    pub name: String,
    /// Properties owned by this scope; nested scopes keep their own.
    pub props: Vec<Prop>,
    /// Scopes found strictly inside this one.
    pub nested: Vec<Scope>,
}

/// A node carrying `data-prop`.
#[derive(Clone, Debug)]
pub struct Prop {
    pub doc: Document,
    pub name: String,
}

impl Document {
    pub fn scopes(&self) -> Vec<Scope> {
        let mut out = Vec::new();
        find_scopes(self.structure(), &mut out);
        log::trace!(target: "string_doc.query", "found {} scopes", out.len());
        out
    }

    /// Older name for [`Document::scopes`].
    pub fn bindings(&self) -> Vec<Scope> {
        self.scopes()
    }

    /// Views of every node whose `data-scope` is `name`.
    pub fn scope(&self, name: &str) -> Vec<Document> {
        self.scopes()
            .into_iter()
            .filter(|scope| scope.name == name)
            .map(|scope| scope.doc)
            .collect()
    }

    /// Properties belonging to the focus node, treated as a scope.
    pub fn props(&self) -> Vec<Prop> {
        match self.node() {
            Some(node) => props_of(&node, self.structure()),
            None => Vec::new(),
        }
    }

    /// Views of the `prop_name` properties under the first scope named `scope_name`.
    pub fn prop(&self, scope_name: &str, prop_name: &str) -> Vec<Document> {
        let Some(scope) = self.scopes().into_iter().find(|s| s.name == scope_name) else {
            log::debug!(target: "string_doc.query", "no scope named {scope_name:?}");
            return Vec::new();
        };
        scope
            .props
            .into_iter()
            .filter(|prop| prop.name == prop_name)
            .map(|prop| prop.doc)
            .collect()
    }

    /// Containers by name. On duplicate names the later node wins.
    pub fn containers(&self) -> BTreeMap<String, Document> {
        named(self.structure(), &AttrKey::Container)
    }

    pub fn container(&self, name: &str) -> Option<Document> {
        self.containers().remove(name)
    }

    /// Partials by name. On duplicate names the later node wins.
    pub fn partials(&self) -> BTreeMap<String, Document> {
        named(self.structure(), &AttrKey::Partial)
    }

    pub fn partial(&self, name: &str) -> Option<Document> {
        self.partials().remove(name)
    }
}

fn attribute(node: &Node, key: &AttrKey) -> Option<String> {
    node.attributes().get(key).map(str::to_owned)
}

fn find_scopes(structure: &Structure, out: &mut Vec<Scope>) {
    for node in structure.nodes() {
        if let Some(name) = attribute(&node, &AttrKey::Scope) {
            let mut nested = Vec::new();
            find_scopes(&node.children(), &mut nested);
            out.push(Scope {
                doc: Document::from_structure(structure.clone(), Some(node.clone())),
                name,
                props: props_of(&node, structure),
                nested,
            });
        }
        find_scopes(&node.children(), out);
    }
}

/// The scope node's own `data-prop`, then every `data-prop` below it that is
/// not inside (or on) a nested scope.
fn props_of(scope: &Node, owner: &Structure) -> Vec<Prop> {
    let mut out = Vec::new();
    if let Some(name) = attribute(scope, &AttrKey::Prop) {
        out.push(Prop {
            doc: Document::from_structure(owner.clone(), Some(scope.clone())),
            name,
        });
    }
    find_props(&scope.children(), &mut out);
    out
}

fn find_props(structure: &Structure, out: &mut Vec<Prop>) {
    for node in structure.nodes() {
        if node.attributes().contains(&AttrKey::Scope) {
            continue;
        }
        if let Some(name) = attribute(&node, &AttrKey::Prop) {
            out.push(Prop {
                doc: Document::from_structure(structure.clone(), Some(node.clone())),
                name,
            });
        }
        find_props(&node.children(), out);
    }
}

fn named(structure: &Structure, key: &AttrKey) -> BTreeMap<String, Document> {
    fn go(structure: &Structure, key: &AttrKey, out: &mut BTreeMap<String, Document>) {
        for node in structure.nodes() {
            if let Some(name) = attribute(&node, key) {
                let doc = Document::from_structure(structure.clone(), Some(node.clone()));
                if out.insert(name.clone(), doc).is_some() {
                    log::trace!(target: "string_doc.query", "{key} {name:?} redefined; later node wins");
                }
            }
            go(&node.children(), key, out);
        }
    }
    let mut out = BTreeMap::new();
    go(structure, key, &mut out);
    out
}

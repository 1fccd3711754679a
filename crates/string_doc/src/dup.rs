//! Deep copies of shared structures.

use crate::node::{Node, Structure};

/// Copy every reachable node into fresh storage.
pub fn deep_copy(structure: &Structure) -> Structure {
    deep_copy_tracking(structure, None).0
}

/// Deep copy that also returns the copy of `target`, when `target` is reachable.
///
/// A node reachable more than once is copied once per occurrence; the first
/// copy in traversal order is the one reported for `target`.
pub(crate) fn deep_copy_tracking(
    structure: &Structure,
    target: Option<&Node>,
) -> (Structure, Option<Node>) {
    let mut found = None;
    let copy = copy_structure(structure, target, &mut found);
    (copy, found)
}

fn copy_structure(structure: &Structure, target: Option<&Node>, found: &mut Option<Node>) -> Structure {
    structure
        .nodes()
        .iter()
        .map(|node| copy_node(node, target, found))
        .collect()
}

fn copy_node(node: &Node, target: Option<&Node>, found: &mut Option<Node>) -> Node {
    let copy = Node::new(
        node.content().to_string(),
        node.attributes().clone(),
        Structure::new(),
    );
    if found.is_none() && target.is_some_and(|t| t.ptr_eq(node)) {
        *found = Some(copy.clone());
    }
    let children = copy_structure(&node.children(), target, found);
    copy.children().extend(children.nodes());
    copy
}

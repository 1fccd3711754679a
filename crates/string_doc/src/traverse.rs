use crate::node::{Node, Structure};

/// Visit every node depth-first, parent before children, left to right.
pub fn walk(structure: &Structure, visit: &mut impl FnMut(&Node, usize)) {
    fn go(structure: &Structure, depth: usize, visit: &mut impl FnMut(&Node, usize)) {
        for node in structure.nodes() {
            visit(&node, depth);
            go(&node.children(), depth + 1, visit);
        }
    }
    go(structure, 0, visit);
}

/// All nodes in traversal order; the content fragments of a flattened structure.
pub fn fragments(structure: &Structure) -> Vec<Node> {
    let mut out = Vec::new();
    walk(structure, &mut |node, _| out.push(node.clone()));
    out
}

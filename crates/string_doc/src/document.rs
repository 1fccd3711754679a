//! Documents and the views derived from them.
//!
//! A [`Document`] is a handle to a structure (a node list) plus an optional
//! focus node inside it. A freshly parsed document has no focus; query results
//! are documents focused on the node they found, over the list that owns that
//! node. Both kinds share storage with the document they came from.
//!
//! Invariants:
//! - `Clone` aliases. Only [`Document::duplicate`] produces independent storage.
//! - Without an explicit focus, the effective focus is the first node of the
//!   structure, or nothing for an empty structure.
//! - Equality is equality of rendered markup.

use crate::builder::build_structure;
use crate::config::ParserConfig;
use crate::dup::deep_copy_tracking;
use crate::error::ParseError;
use crate::node::{Node, Structure};
use crate::render::{render, render_to};
use std::fmt;

#[derive(Clone, Default)]
pub struct Document {
    structure: Structure,
    focus: Option<Node>,
}

impl Document {
    pub fn parse(html: &str) -> Result<Self, ParseError> {
        Self::parse_with_config(html, &ParserConfig::default())
    }

    pub fn parse_with_config(html: &str, config: &ParserConfig) -> Result<Self, ParseError> {
        Ok(Self::from_structure(build_structure(html, config)?, None))
    }

    /// Parse raw bytes, rejecting input that is not UTF-8.
    pub fn parse_bytes(bytes: &[u8], config: &ParserConfig) -> Result<Self, ParseError> {
        let html = std::str::from_utf8(bytes)?;
        Self::parse_with_config(html, config)
    }

    /// A view over `structure`, focused on `focus` when given.
    pub fn from_structure(structure: Structure, focus: Option<Node>) -> Self {
        Self { structure, focus }
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// The node operations act on.
    pub fn node(&self) -> Option<Node> {
        match &self.focus {
            Some(node) => Some(node.clone()),
            None => self.structure.first(),
        }
    }

    /// True when this document was derived with an explicit focus.
    pub fn is_view(&self) -> bool {
        self.focus.is_some()
    }

    /// The focus node's content slot, whose children are its inner markup.
    pub(crate) fn slot(&self) -> Option<Node> {
        self.node().and_then(|node| node.content_slot())
    }

    /// Independent deep copy. A focused view stays focused on the copy of its node.
    pub fn duplicate(&self) -> Self {
        let (structure, focus) = deep_copy_tracking(&self.structure, self.focus.as_ref());
        Self { structure, focus }
    }

    pub fn to_html(&self) -> String {
        render(&self.structure)
    }

    pub fn write_html<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        render_to(&self.structure, out)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_html(f)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("html", &self.to_html())
            .field("focus", &self.focus.as_ref().map(|n| n.content().to_string()))
            .finish()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.to_html() == other.to_html()
    }
}

impl PartialEq<str> for Document {
    fn eq(&self, other: &str) -> bool {
        self.to_html() == other
    }
}

impl PartialEq<&str> for Document {
    fn eq(&self, other: &&str) -> bool {
        self.to_html() == *other
    }
}

impl std::str::FromStr for Document {
    type Err = ParseError;

    fn from_str(html: &str) -> Result<Self, Self::Err> {
        Document::parse(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmarked_markup_round_trips_exactly() {
        let inputs = [
            "",
            "plain text",
            "<!DOCTYPE html>\n<html lang=en><HEAD><title>T</title></HEAD>\n<body class='x'>a &amp; b<br></body></html>\n",
            "<p>unclosed <b>bold",
            "a < b > c </ d <!-- unterminated",
            "<script>if (a<b) document.write('</p>')</script>",
        ];
        for input in inputs {
            let doc = Document::parse(input).expect("parse");
            assert_eq!(doc.to_html(), input);
        }
    }

    #[test]
    fn empty_document_has_no_node() {
        let doc = Document::parse("").expect("parse");
        assert!(doc.node().is_none());
        assert!(doc.slot().is_none());
        assert!(!doc.is_view());
    }

    #[test]
    fn default_focus_is_first_root() {
        let doc = Document::parse("<p>a</p><p>b</p>").expect("parse");
        assert_eq!(&*doc.node().expect("node").content(), "<p>a</p><p>b</p>");
    }

    #[test]
    fn equality_is_by_rendered_text() {
        let a = Document::parse(r#"<div data-scope="x">t</div>"#).expect("parse");
        let b = Document::from_structure(
            Structure::from_nodes(vec![Node::leaf(r#"<div data-scope="x">t</div>"#)]),
            None,
        );
        assert_eq!(a, b);
        assert!(a == r#"<div data-scope="x">t</div>"#);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn parse_bytes_rejects_invalid_utf8() {
        let err = Document::parse_bytes(b"<p>\xff</p>", &ParserConfig::default())
            .expect_err("invalid utf-8");
        assert_eq!(err, ParseError::InvalidUtf8 { valid_up_to: 3 });
    }

    #[test]
    fn clone_aliases_and_duplicate_does_not() {
        let doc: Document = r#"<p data-prop="x">a</p>"#.parse().expect("parse");
        let alias = doc.clone();
        let copy = doc.duplicate();

        alias
            .node()
            .expect("node")
            .set_content("<section");
        assert!(doc.to_html().starts_with("<section"));
        assert!(copy.to_html().starts_with("<p"));
    }
}

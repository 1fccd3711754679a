//! Structure -> markup.
//!
//! A node renders as its content, then its attributes (` name="value"`, or
//! ` name` for bare attributes), then its children in order. Raw fragments have
//! no attributes or children, so they come out exactly as parsed.

use crate::entities::escape_attribute_value;
use crate::node::{Node, Structure};
use regex::Regex;
use std::borrow::Cow;
use std::fmt::{self, Write};
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

pub fn render(structure: &Structure) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = render_to(structure, &mut out);
    out
}

pub fn render_to<W: Write>(structure: &Structure, out: &mut W) -> fmt::Result {
    for node in structure.borrow().iter() {
        write_node(node, out)?;
    }
    Ok(())
}

pub fn render_node(node: &Node) -> String {
    let mut out = String::new();
    let _ = write_node(node, &mut out);
    out
}

fn write_node<W: Write>(node: &Node, out: &mut W) -> fmt::Result {
    out.write_str(&node.content())?;
    for (key, value) in node.attributes().iter() {
        out.write_char(' ')?;
        out.write_str(key.markup_name())?;
        if let Some(value) = value {
            write!(out, "=\"{}\"", escape_attribute_value(value))?;
        }
    }
    render_to(&node.children(), out)
}

/// Drop every `<...>` run, leaving plain text.
pub fn strip_tags(html: &str) -> Cow<'_, str> {
    TAG_PATTERN.replace_all(html, "")
}

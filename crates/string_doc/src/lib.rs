//! A shared, mutable HTML template tree.
//!
//! Markup is parsed into a tree where only the elements that matter for
//! binding (those carrying `data-scope`, `data-prop`, `data-container` or
//! `data-partial`, plus their ancestors) are broken into nodes. Everything
//! else stays as verbatim source text, so rendering an untouched document
//! reproduces its input byte for byte.
//!
//! Queries return [`Document`] views that alias the tree they were found in;
//! edits through a view are visible from the document and from every other
//! view over the same storage.

pub mod debug;
pub mod dup;
pub mod perf_fixtures;
pub mod render;
pub mod traverse;

mod attributes;
mod builder;
mod config;
mod document;
mod entities;
mod error;
mod mutate;
mod node;
mod query;
mod title;
mod tokenizer;

#[cfg(all(test, feature = "perf-tests"))]
mod perf_guards;

pub use crate::attributes::{AttrKey, Attributes};
pub use crate::config::ParserConfig;
pub use crate::document::Document;
pub use crate::dup::deep_copy;
pub use crate::error::ParseError;
pub use crate::mutate::Insertable;
pub use crate::node::{Node, NodeData, Structure};
pub use crate::query::{Prop, Scope};
pub use crate::render::{render, render_node, render_to, strip_tags};

/// Parse with the default [`ParserConfig`].
pub fn parse(html: &str) -> Result<Document, ParseError> {
    Document::parse(html)
}

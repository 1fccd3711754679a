//! Builds the shared structure from tokens.
//!
//! Two passes over an index arena:
//! 1. Open/close elements from the token stream (lenient: an end tag closes
//!    the nearest open element with that name, implicitly closing anything
//!    opened after it; stray end tags stay text) and record which elements
//!    carry a binding marker.
//! 2. Emit nodes. An element is structured when it, or any descendant, carries
//!    a marker; everything else is emitted as exact source slices, with
//!    adjacent slices merged into one fragment.

use crate::attributes::{AttrKey, Attributes};
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::node::{Node, Structure};
use crate::tokenizer::{Token, tokenize};
use std::ops::Range;

#[derive(Debug)]
enum Item {
    Raw(Range<usize>),
    Element(usize),
}

#[derive(Debug)]
struct ArenaElement {
    parent: Option<usize>,
    name: String,
    name_span: Range<usize>,
    attributes: Attributes,
    start: usize,
    end: usize,
    /// Content of the slot node: `>` normally, `/>` for `<img ... />`.
    slot: &'static str,
    void: bool,
    marked: bool,
    children: Vec<Item>,
}

struct Builder<'a> {
    input: &'a str,
    config: &'a ParserConfig,
    elements: Vec<ArenaElement>,
    roots: Vec<Item>,
    open: Vec<usize>,
}

pub(crate) fn build_structure(input: &str, config: &ParserConfig) -> Result<Structure, ParseError> {
    let mut builder = Builder {
        input,
        config,
        elements: Vec::new(),
        roots: Vec::new(),
        open: Vec::new(),
    };
    for token in tokenize(input, config.decode_attribute_entities) {
        builder.push_token(token)?;
    }
    builder.finish()
}

impl<'a> Builder<'a> {
    fn push_item(&mut self, item: Item) {
        match self.open.last() {
            Some(&parent) => self.elements[parent].children.push(item),
            None => self.roots.push(item),
        }
    }

    fn push_token(&mut self, token: Token) -> Result<(), ParseError> {
        match token {
            Token::Raw { span } => self.push_item(Item::Raw(span)),
            Token::StartTag {
                name,
                span,
                name_span,
                attributes: raw_attributes,
                self_closing,
                void,
                terminated,
            } => {
                let mut attributes = Attributes::new();
                for (key, value) in raw_attributes {
                    attributes.insert_new(AttrKey::new(&key), value);
                }
                let marked = attributes.has_binding();
                if marked && !terminated {
                    return Err(ParseError::UnterminatedTag {
                        name,
                        position: span.start,
                    });
                }

                let index = self.elements.len();
                let opens = terminated && !void && !self_closing;
                self.elements.push(ArenaElement {
                    parent: self.open.last().copied(),
                    name,
                    name_span,
                    attributes,
                    start: span.start,
                    end: span.end,
                    slot: if void && self_closing { "/>" } else { ">" },
                    void,
                    marked,
                    children: Vec::new(),
                });
                self.push_item(Item::Element(index));
                if opens {
                    self.open.push(index);
                }
            }
            Token::EndTag { name, span } => {
                let matching = self
                    .open
                    .iter()
                    .rposition(|&index| self.elements[index].name == name);
                match matching {
                    Some(position) => {
                        for index in self.open.drain(position + 1..) {
                            self.elements[index].end = span.start;
                        }
                        let index = self.open[position];
                        self.open.truncate(position);
                        self.elements[index].end = span.end;
                    }
                    None => {
                        log::trace!(
                            target: "string_doc.parse",
                            "stray </{name}> at byte {} kept as text",
                            span.start
                        );
                        self.push_item(Item::Raw(span));
                    }
                }
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Structure, ParseError> {
        for index in std::mem::take(&mut self.open) {
            self.elements[index].end = self.input.len();
        }

        // Children always sit at higher indices than their parent, so a reverse
        // sweep sees every descendant before its ancestors.
        for index in (0..self.elements.len()).rev() {
            if self.elements[index].marked {
                if let Some(parent) = self.elements[index].parent {
                    self.elements[parent].marked = true;
                }
            }
        }

        self.check_structured_depth()?;

        let roots = std::mem::take(&mut self.roots);
        let nodes = self.emit_items(roots);
        let structured = self.elements.iter().filter(|e| e.marked).count();
        log::debug!(
            target: "string_doc.parse",
            "built {} root nodes ({} structured elements, {} elements total)",
            nodes.len(),
            structured,
            self.elements.len()
        );
        Ok(Structure::from_nodes(nodes))
    }

    /// Only structured elements nest in the output; unmarked markup is flat
    /// text however many end tags it omits. Parents sit at lower indices, so one
    /// forward sweep sees every parent's depth first.
    fn check_structured_depth(&self) -> Result<(), ParseError> {
        let mut depths = vec![0usize; self.elements.len()];
        for (index, element) in self.elements.iter().enumerate() {
            if !element.marked {
                continue;
            }
            let depth = element.parent.map_or(0, |parent| depths[parent]) + 1;
            if depth > self.config.max_depth {
                return Err(ParseError::NestingTooDeep {
                    max_depth: self.config.max_depth,
                    position: element.start,
                });
            }
            depths[index] = depth;
        }
        Ok(())
    }

    fn emit_items(&mut self, items: Vec<Item>) -> Vec<Node> {
        let input = self.input;
        let mut out = Vec::new();
        let mut pending: Option<String> = None;

        for item in items {
            let raw = match item {
                Item::Raw(span) => span,
                Item::Element(index) if !self.elements[index].marked => {
                    let element = &self.elements[index];
                    element.start..element.end
                }
                Item::Element(index) => {
                    if let Some(text) = pending.take() {
                        out.push(Node::leaf(text));
                    }
                    out.push(self.emit_element(index));
                    continue;
                }
            };
            let text = &input[raw];
            match pending.take() {
                Some(mut buffer) if self.config.merge_raw_fragments => {
                    buffer.push_str(text);
                    pending = Some(buffer);
                }
                Some(done) => {
                    out.push(Node::leaf(done));
                    pending = Some(text.to_string());
                }
                None => pending = Some(text.to_string()),
            }
        }

        if let Some(text) = pending {
            out.push(Node::leaf(text));
        }
        out
    }

    fn emit_element(&mut self, index: usize) -> Node {
        let children = std::mem::take(&mut self.elements[index].children);
        let inner = self.emit_items(children);

        let input = self.input;
        let element = &mut self.elements[index];
        let source_name = &input[element.name_span.clone()];
        log::trace!(
            target: "string_doc.parse",
            "structured <{}> at byte {}",
            element.name,
            element.start
        );

        let mut parts = vec![Node::new(
            element.slot,
            Attributes::new(),
            Structure::from_nodes(inner),
        )];
        if !element.void {
            parts.push(Node::leaf(format!("</{source_name}>")));
        }
        Node::new(
            format!("<{source_name}"),
            std::mem::take(&mut element.attributes),
            Structure::from_nodes(parts),
        )
    }
}

//! `<title>` lookup over raw fragment text.
//!
//! The title is found textually: fragments are visited in traversal order and
//! the first one whose content contains `<title>...</title>` wins. A title
//! split across several fragments is not seen.

use crate::document::Document;
use crate::traverse::fragments;
use regex::{NoExpand, Regex};
use std::sync::LazyLock;

static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title>(.*?)</title>").expect("title pattern is valid"));

impl Document {
    pub fn title(&self) -> Option<String> {
        fragments(self.structure()).iter().find_map(|node| {
            TITLE_PATTERN
                .captures(&node.content())
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_owned())
        })
    }

    /// Rewrite the first `<title>` element's text. Without one, nothing changes.
    pub fn set_title(&self, title: &str) {
        let replacement = format!("<title>{title}</title>");
        for node in fragments(self.structure()) {
            let updated = {
                let content = node.content();
                if !TITLE_PATTERN.is_match(&content) {
                    continue;
                }
                TITLE_PATTERN
                    .replacen(&content, 1, NoExpand(&replacement))
                    .into_owned()
            };
            node.set_content(updated);
            log::trace!(target: "string_doc.mutate", "title set to {title:?}");
            return;
        }
        log::debug!(target: "string_doc.mutate", "set_title: no <title> found");
    }
}

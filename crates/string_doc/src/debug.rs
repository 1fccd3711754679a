use crate::node::{Node, Structure};

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

/// Indented, line-per-node outline of a structure, at most `cap` lines.
///
/// Structured elements print their opening tag with attributes and nest their
/// inner content; raw fragments print as a quoted, single-line preview.
pub fn outline(structure: &Structure, cap: usize) -> Vec<String> {
    struct IndentGuard<'a> {
        indent: &'a mut String,
    }

    impl Drop for IndentGuard<'_> {
        fn drop(&mut self) {
            let new_len = self.indent.len() - INDENT_STEP.len();
            self.indent.truncate(new_len);
        }
    }

    fn walk(structure: &Structure, indent: &mut String, out: &mut Vec<String>, left: &mut usize) {
        for node in structure.nodes() {
            if *left == 0 {
                return;
            }
            *left -= 1;
            match node.content_slot() {
                Some(slot) => {
                    out.push(format!("{indent}{}", opening_tag(&node, &slot)));
                    indent.push_str(INDENT_STEP);
                    let guard = IndentGuard { indent };
                    walk(&slot.children(), guard.indent, out, left);
                }
                None => {
                    let content = node.content();
                    if let Some(trimmed) = nonempty_trimmed(&content) {
                        let mut line = String::with_capacity(indent.len() + PREVIEW_CHARS + 4);
                        line.push_str(indent);
                        line.push('"');
                        push_preview(&mut line, trimmed);
                        line.push('"');
                        out.push(line);
                    }
                }
            }
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    let mut indent = String::new();
    walk(structure, &mut indent, &mut out, &mut left);
    out
}

fn opening_tag(node: &Node, slot: &Node) -> String {
    let mut line = node.content().to_string();
    for (key, value) in node.attributes().iter() {
        line.push(' ');
        line.push_str(key.markup_name());
        if let Some(value) = value {
            line.push_str("=\"");
            line.push_str(value);
            line.push('"');
        }
    }
    line.push_str(&slot.content());
    line
}

fn nonempty_trimmed(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn push_preview(out: &mut String, s: &str) {
    for (i, ch) in s.chars().enumerate() {
        if i == PREVIEW_CHARS {
            out.push('…');
            return;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn outline_nests_structured_elements() {
        let doc = Document::parse(concat!(
            "<!-- top -->\n",
            r#"<div data-scope="post"><h1 data-prop="title">Hello</h1><br data-prop="gap"></div>"#,
        ))
        .expect("parse");
        let lines = outline(doc.structure(), 100);
        assert_eq!(
            lines,
            [
                r#""<!-- top -->""#,
                r#"<div data-scope="post">"#,
                r#"  <h1 data-prop="title">"#,
                r#"    "Hello""#,
                r#"  <br data-prop="gap">"#,
            ]
        );
    }

    #[test]
    fn outline_respects_cap_and_truncates_previews() {
        let long = "x".repeat(60);
        let doc = Document::parse(&format!(r#"<p data-prop="a">{long}</p><p data-prop="b"></p>"#))
            .expect("parse");
        let lines = outline(doc.structure(), 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], format!("  \"{}…\"", "x".repeat(PREVIEW_CHARS)));
    }
}

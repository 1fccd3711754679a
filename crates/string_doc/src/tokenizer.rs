//! Span-preserving markup tokenizer.
//!
//! Every byte of the input belongs to exactly one token, in order, so any run
//! of tokens can be turned back into the exact source text by slicing. This is
//! what lets unmarked markup round-trip byte-for-byte.
//!
//! Known limitations (intentional):
//! - Not an HTML5 state machine; no parse-error recovery beyond treating
//!   unrecognised `<` as text.
//! - Tag/attribute names are restricted to ASCII `[A-Za-z0-9:_-]`
//!   (attribute names additionally allow `@` and `.` for framework syntaxes).
//! - Rawtext close-tag scanning accepts only ASCII whitespace before `>`.

use crate::entities::decode_entities;
use memchr::memchr;
use std::ops::Range;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";
const SCRIPT_CLOSE_TAG: &[u8] = b"</script";
const STYLE_CLOSE_TAG: &[u8] = b"</style";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    /// Text, comments, doctypes, processing instructions and stray markup.
    Raw { span: Range<usize> },
    StartTag {
        /// ASCII-lowercased tag name.
        name: String,
        span: Range<usize>,
        /// Byte range of the name as written in the source.
        name_span: Range<usize>,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
        void: bool,
        /// False when input ended before the closing `>`.
        terminated: bool,
    },
    EndTag { name: String, span: Range<usize> },
}

#[cfg(test)]
impl Token {
    fn span(&self) -> &Range<usize> {
        match self {
            Token::Raw { span } | Token::StartTag { span, .. } | Token::EndTag { span, .. } => {
                span
            }
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn is_attribute_name_byte(b: u8) -> bool {
    is_name_byte(b) || b == b'@' || b == b'.'
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

/// Find `</script` or `</style` (any case) followed by optional ASCII whitespace and `>`.
/// Returns the relative `(start, end)` of the close tag.
fn find_rawtext_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let n = close_tag.len();
    let mut i = 0;
    while i + n <= bytes.len() {
        i += memchr(b'<', &bytes[i..])?;
        if i + n > bytes.len() {
            return None;
        }
        if starts_with_ignore_ascii_case_at(bytes, i, close_tag) {
            let mut k = i + n;
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < bytes.len() && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

/// True when the `<` at `i` opens something the tokenizer understands.
fn opens_markup(bytes: &[u8], i: usize) -> bool {
    match bytes.get(i + 1) {
        Some(b) if b.is_ascii_alphabetic() => true,
        Some(b'!') | Some(b'?') => true,
        Some(b'/') => bytes.get(i + 2).is_some_and(|b| b.is_ascii_alphabetic()),
        _ => false,
    }
}

pub(crate) fn tokenize(input: &str, decode_attributes: bool) -> Vec<Token> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut out = Vec::new();
    let mut i = 0;

    // Slice endpoints are only ever placed at ASCII structural bytes, so they
    // stay on UTF-8 boundaries.
    while i < len {
        if bytes[i] != b'<' || !opens_markup(bytes, i) {
            let start = i;
            i += 1;
            loop {
                match memchr(b'<', &bytes[i..]) {
                    Some(rel) if opens_markup(bytes, i + rel) => {
                        i += rel;
                        break;
                    }
                    Some(rel) => i += rel + 1,
                    None => {
                        i = len;
                        break;
                    }
                }
            }
            debug_assert!(input.is_char_boundary(i));
            out.push(Token::Raw { span: start..i });
            continue;
        }

        if input[i..].starts_with(COMMENT_START) {
            let body = i + COMMENT_START.len();
            let end = input[body..]
                .find(COMMENT_END)
                .map_or(len, |rel| body + rel + COMMENT_END.len());
            out.push(Token::Raw { span: i..end });
            i = end;
            continue;
        }

        if bytes[i + 1] == b'!' || bytes[i + 1] == b'?' {
            // Doctype, CDATA-ish or processing instruction: opaque up to `>`.
            let end = memchr(b'>', &bytes[i..]).map_or(len, |rel| i + rel + 1);
            out.push(Token::Raw { span: i..end });
            i = end;
            continue;
        }

        if bytes[i + 1] == b'/' {
            let name_start = i + 2;
            let mut j = name_start;
            while j < len && is_name_byte(bytes[j]) {
                j += 1;
            }
            let name = input[name_start..j].to_ascii_lowercase();
            let end = memchr(b'>', &bytes[j..]).map_or(len, |rel| j + rel + 1);
            out.push(Token::EndTag { name, span: i..end });
            i = end;
            continue;
        }

        let (token, next) = start_tag(input, i, decode_attributes);
        let rawtext_close = match &token {
            Token::StartTag {
                name,
                self_closing: false,
                terminated: true,
                ..
            } if name == "script" => Some(SCRIPT_CLOSE_TAG),
            Token::StartTag {
                name,
                self_closing: false,
                terminated: true,
                ..
            } if name == "style" => Some(STYLE_CLOSE_TAG),
            _ => None,
        };
        let name = match &token {
            Token::StartTag { name, .. } => name.clone(),
            _ => String::new(),
        };
        out.push(token);
        i = next;

        if let Some(close_tag) = rawtext_close {
            match find_rawtext_close_tag(&input[i..], close_tag) {
                Some((rel_start, rel_end)) => {
                    if rel_start > 0 {
                        out.push(Token::Raw {
                            span: i..i + rel_start,
                        });
                    }
                    out.push(Token::EndTag {
                        name,
                        span: i + rel_start..i + rel_end,
                    });
                    i += rel_end;
                }
                None => {
                    // No close tag: the rest of the input is rawtext.
                    if i < len {
                        out.push(Token::Raw { span: i..len });
                    }
                    i = len;
                }
            }
        }
    }

    log::trace!(target: "string_doc.parse", "tokenized {} bytes into {} tokens", len, out.len());
    out
}

/// Scan the start tag whose `<` is at `start`. Returns the token and the offset after it.
fn start_tag(input: &str, start: usize, decode_attributes: bool) -> (Token, usize) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let name_start = start + 1;
    let mut k = name_start;
    while k < len && is_name_byte(bytes[k]) {
        k += 1;
    }
    let name_span = name_start..k;
    let name = input[name_span.clone()].to_ascii_lowercase();

    let mut attributes: Vec<(String, Option<String>)> = Vec::new();
    let mut self_closing = false;
    let mut terminated = false;

    let skip_whitespace = |k: &mut usize| {
        while *k < len && bytes[*k].is_ascii_whitespace() {
            *k += 1;
        }
    };

    loop {
        skip_whitespace(&mut k);
        if k >= len {
            break;
        }
        if bytes[k] == b'>' {
            k += 1;
            terminated = true;
            break;
        }
        if bytes[k] == b'/' {
            if k + 1 < len && bytes[k + 1] == b'>' {
                self_closing = true;
                terminated = true;
                k += 2;
                break;
            }
            k += 1;
            continue;
        }

        let attr_start = k;
        while k < len && is_attribute_name_byte(bytes[k]) {
            k += 1;
        }
        if attr_start == k {
            // Junk byte inside the tag; step over the whole char.
            k += input[k..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        let attr_name = input[attr_start..k].to_string();

        skip_whitespace(&mut k);
        let value = if k < len && bytes[k] == b'=' {
            k += 1;
            skip_whitespace(&mut k);
            let raw = if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                k += 1;
                let value_start = k;
                k = memchr(quote, &bytes[k..]).map_or(len, |rel| k + rel);
                let raw = &input[value_start..k];
                if k < len {
                    k += 1;
                }
                raw
            } else {
                let value_start = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                        break;
                    }
                    k += 1;
                }
                &input[value_start..k]
            };
            Some(if decode_attributes {
                decode_entities(raw).into_owned()
            } else {
                raw.to_string()
            })
        } else {
            None
        };
        attributes.push((attr_name, value));
    }

    let void = is_void_element(&name);
    (
        Token::StartTag {
            name,
            span: start..k,
            name_span,
            attributes,
            self_closing,
            void,
            terminated,
        },
        k,
    )
}

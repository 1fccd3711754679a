//! Character references in attribute values.
//!
//! Decoding is deliberately narrow: the five XML entities plus `&nbsp;`, and
//! semicolon-terminated decimal/hex references that name a Unicode scalar.
//! Anything else is copied through unchanged. Escaping is the inverse the
//! renderer needs so that a re-parse yields the same value.

use memchr::memchr;
use std::borrow::Cow;

const NAMED: &[(&[u8], char)] = &[
    (b"&amp;", '&'),
    (b"&lt;", '<'),
    (b"&gt;", '>'),
    (b"&quot;", '"'),
    (b"&apos;", '\''),
    (b"&nbsp;", '\u{00A0}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

pub(crate) fn decode_entities(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut i = first;

    while i < bytes.len() {
        if bytes[i] != b'&' {
            let next = memchr(b'&', &bytes[i..]).map_or(bytes.len(), |rel| i + rel);
            out.push_str(&s[i..next]);
            i = next;
            continue;
        }
        match decode_one(s, i) {
            Some((ch, consumed)) => {
                out.push(ch);
                i += consumed;
            }
            None => {
                out.push('&');
                i += 1;
            }
        }
    }

    Cow::Owned(out)
}

/// Decode the reference starting at `s[at] == '&'`; returns the char and bytes consumed.
fn decode_one(s: &str, at: usize) -> Option<(char, usize)> {
    let rest = &s.as_bytes()[at..];
    if let Some((name, ch)) = NAMED.iter().find(|(name, _)| rest.starts_with(name)) {
        return Some((*ch, name.len()));
    }

    let (digits_at, radix, max_digits) = if rest.starts_with(b"&#x") || rest.starts_with(b"&#X") {
        (3, 16, MAX_HEX_DIGITS)
    } else if rest.starts_with(b"&#") {
        (2, 10, MAX_DEC_DIGITS)
    } else {
        return None;
    };

    let digits = rest[digits_at..]
        .iter()
        .take(max_digits + 1)
        .take_while(|b| b.is_ascii_digit() || (radix == 16 && b.is_ascii_hexdigit()))
        .count();
    if digits == 0 || digits > max_digits || rest.get(digits_at + digits) != Some(&b';') {
        return None;
    }

    let text = &s[at + digits_at..at + digits_at + digits];
    let ch = u32::from_str_radix(text, radix).ok().and_then(char::from_u32)?;
    Some((ch, digits_at + digits + 1))
}

/// Escape a value for a double-quoted attribute.
pub(crate) fn escape_attribute_value(value: &str) -> Cow<'_, str> {
    if !value.bytes().any(|b| b == b'&' || b == b'"') {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_values_are_borrowed() {
        assert!(matches!(decode_entities("120×32"), Cow::Borrowed(_)));
        assert!(matches!(escape_attribute_value("post"), Cow::Borrowed(_)));
    }

    #[test]
    fn decodes_named_and_numeric_references() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("&quot;hi&quot;"), "\"hi\"");
        assert_eq!(decode_entities("a&nbsp;b"), "a\u{00A0}b");
        assert_eq!(decode_entities("&#215;&#xD7;"), "××");
    }

    #[test]
    fn leaves_malformed_references_alone() {
        assert_eq!(decode_entities("&notanentity;"), "&notanentity;");
        assert_eq!(decode_entities("&amp"), "&amp");
        assert_eq!(decode_entities("&#215 "), "&#215 ");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#11141111;"), "&#11141111;");
        assert_eq!(decode_entities("&#;&#x;"), "&#;&#x;");
        assert_eq!(decode_entities("&#xZZ;&amp;"), "&#xZZ;&");
    }

    #[test]
    fn escape_then_decode_restores_value() {
        for value in ["a & b", "say \"hi\"", "&amp; literal", "π <b>"] {
            let escaped = escape_attribute_value(value);
            assert!(!escaped.contains('"'));
            assert_eq!(decode_entities(&escaped), value);
        }
    }
}

//! Errors raised while turning markup into a structure.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Input bytes were not UTF-8; `valid_up_to` is the byte offset of the first bad sequence.
    InvalidUtf8 { valid_up_to: usize },
    /// A start tag carrying a binding marker ran into end of input before `>`.
    UnterminatedTag { name: String, position: usize },
    /// Element nesting exceeded [`ParserConfig::max_depth`](crate::ParserConfig::max_depth).
    NestingTooDeep { max_depth: usize, position: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidUtf8 { valid_up_to } => {
                write!(f, "input is not valid UTF-8 (first bad byte at {valid_up_to})")
            }
            ParseError::UnterminatedTag { name, position } => {
                write!(f, "unterminated <{name}> tag at byte {position}")
            }
            ParseError::NestingTooDeep {
                max_depth,
                position,
            } => write!(
                f,
                "element nesting deeper than {max_depth} levels at byte {position}"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<std::str::Utf8Error> for ParseError {
    fn from(err: std::str::Utf8Error) -> Self {
        ParseError::InvalidUtf8 {
            valid_up_to: err.valid_up_to(),
        }
    }
}

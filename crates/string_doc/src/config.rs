/// Parser configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest nesting of structured elements accepted before parsing fails
    /// with [`ParseError::NestingTooDeep`](crate::ParseError::NestingTooDeep).
    /// Unmarked markup stays flat text and does not count. Every traversal over
    /// parser output recurses at most this deep.
    pub max_depth: usize,
    /// Decode character references in attribute values (`&amp;` -> `&`).
    pub decode_attribute_entities: bool,
    /// Merge adjacent raw siblings into a single fragment.
    pub merge_raw_fragments: bool,
}

impl ParserConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 512;
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            decode_attribute_entities: true,
            merge_raw_fragments: true,
        }
    }
}

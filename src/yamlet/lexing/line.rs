//! Line token types
//!
//!     yamlet is line based: every content line of a document is classified on its own, before
//!     the parser looks at indentation. A line is one of two shapes:
//!
//!         - SequenceItem: `-` alone, or `- ` followed by the item's value
//!         - MappingEntry: `key: value`, split at the first top-level colon
//!
//!     A line that is neither (no top-level colon) is kept as Text; whether that is an error
//!     depends on the container it lands in, which only the parser knows.
//!
//!     Blank and comment lines never become line tokens.
//!
//!     See [classify_line](crate::yamlet::lexing::line_classification::classify_line) for the
//!     classification rules.

use std::fmt;

/// One classified content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineToken<'a> {
    /// 1-based line number in the source.
    pub number: usize,

    /// Count of leading spaces.
    pub indent: usize,

    /// The line without indentation, trailing whitespace or inline comment.
    pub content: &'a str,

    pub line_type: LineType<'a>,
}

impl LineToken<'_> {
    pub fn is_sequence_item(&self) -> bool {
        matches!(self.line_type, LineType::SequenceItem { .. })
    }
}

/// The classification of a content line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType<'a> {
    /// `- value`. `value` is trimmed and may be empty; `value_column` is the column at which
    /// it starts.
    SequenceItem { value: &'a str, value_column: usize },

    /// `key: value`, both trimmed.
    MappingEntry { key: &'a str, value: &'a str },

    /// Content with no top-level key separator.
    Text,
}

impl fmt::Display for LineType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineType::SequenceItem { .. } => "SEQUENCE_ITEM",
            LineType::MappingEntry { .. } => "MAPPING_ENTRY",
            LineType::Text => "TEXT",
        };
        write!(f, "{}", name)
    }
}

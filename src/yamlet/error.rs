//! Error types for parsing and typed extraction
//!
//! Every parse failure is fatal: the parser returns a single [`ParseError`] carrying the
//! 1-based line number and an [`ErrorKind`], and never a partial tree.

use thiserror::Error;

/// Why a document was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A tab appears in the leading whitespace of a content line.
    #[error("tab indentation not supported")]
    TabIndentation,

    /// A `- item` line whose enclosing container is a mapping.
    #[error("list item without array context")]
    ListItemOutsideSequence,

    /// A non-item line whose enclosing container is a sequence.
    #[error("mapping entry without mapping context")]
    EntryOutsideMapping,

    /// A line in a mapping with no top-level `:`.
    #[error("missing ':' in mapping entry")]
    MissingColon,

    /// A value that opens a quote but is not exactly one well-formed quoted token.
    #[error("unterminated quoted scalar `{0}`")]
    UnterminatedQuote(String),

    /// A `{...}` or `[...]` value that does not parse.
    #[error("invalid inline flow literal `{literal}` near `{token}`")]
    InvalidFlow { literal: String, token: String },
}

impl ErrorKind {
    /// Lexical errors are about characters; the rest are about document structure.
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            ErrorKind::TabIndentation
                | ErrorKind::UnterminatedQuote(_)
                | ErrorKind::InvalidFlow { .. }
        )
    }
}

/// A parse failure at a specific line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    pub kind: ErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: ErrorKind) -> Self {
        Self { line, kind }
    }

    /// Format the source around the offending line.
    ///
    /// Shows 2 lines before the error, the error line with a >> marker, and 2 lines after.
    /// All lines are numbered.
    pub fn source_context(&self, source: &str) -> String {
        let lines: Vec<&str> = source.lines().collect();
        let error_line = self.line.saturating_sub(1);

        let start_line = error_line.saturating_sub(2);
        let end_line = (error_line + 3).min(lines.len());

        let mut context = String::new();
        for (offset, line) in lines[start_line.min(end_line)..end_line].iter().enumerate() {
            let line_num = start_line + offset;
            let marker = if line_num == error_line { ">>" } else { "  " };
            context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, line));
        }
        context
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Failure of [`from_str`](crate::yamlet::parsing::from_str): either the text is not a valid
/// document, or the document does not have the requested shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("document does not match the requested shape: {0}")]
    Shape(#[from] serde_json::Error),
}

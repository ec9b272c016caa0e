//! Lexing: turning physical lines into classified line tokens
//!
//! The lexer is shallow. It knows about indentation, comments and the two line
//! shapes (sequence item, mapping entry); everything else is the parser's job.

pub mod line;
pub mod line_classification;

pub use line::{LineToken, LineType};
pub use line_classification::{classify_line, count_indent};

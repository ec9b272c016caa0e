//! Block scalars
//!
//! A key or list item whose whole value is one of `|`, `|-`, `|+` (literal) or `>`, `>-`, `>+`
//! (folded) takes its string from the lines that follow:
//!
//!     note: |
//!       line one
//!       line two
//!
//! Content lines are indented exactly two columns past the key (or the `-` of a bare item);
//! that prefix is removed. The block ends at the first non-blank line indented less, which is
//! left for the parser.
//!
//! Chomping indicators are accepted but all behave the same: trailing blank lines are dropped
//! and the value never ends with a newline.

use crate::yamlet::lexing::count_indent;

/// Offset of block content from the column of the key that introduces it.
pub const BLOCK_INDENT_STEP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    /// `|`: lines joined with newlines.
    Literal,
    /// `>`: lines joined with spaces, blank lines become newlines.
    Folded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chomping {
    Clip,
    Strip,
    Keep,
}

/// A parsed block indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub style: BlockStyle,
    pub chomping: Chomping,
}

impl BlockHeader {
    /// Recognize a value that is exactly a block indicator.
    pub fn parse(indicator: &str) -> Option<Self> {
        let mut chars = indicator.chars();
        let style = match chars.next()? {
            '|' => BlockStyle::Literal,
            '>' => BlockStyle::Folded,
            _ => return None,
        };
        let chomping = match chars.as_str() {
            "" => Chomping::Clip,
            "-" => Chomping::Strip,
            "+" => Chomping::Keep,
            _ => return None,
        };
        Some(Self { style, chomping })
    }
}

/// The value read from a block and the index of the first line it did not consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockScalar {
    pub value: String,
    pub next_line: usize,
}

/// Read block content starting at `lines[start]`.
pub fn read_block_scalar(
    lines: &[&str],
    start: usize,
    content_indent: usize,
    header: BlockHeader,
) -> BlockScalar {
    let mut collected: Vec<&str> = Vec::new();
    let mut index = start;

    while let Some(line) = lines.get(index) {
        if line.trim().is_empty() {
            collected.push("");
        } else if count_indent(line) < content_indent {
            break;
        } else {
            collected.push(&line[content_indent..]);
        }
        index += 1;
    }

    while collected.last() == Some(&"") {
        collected.pop();
    }

    let value = match header.style {
        BlockStyle::Literal => collected.join("\n"),
        BlockStyle::Folded => fold_lines(&collected),
    };

    tracing::trace!(
        ?header,
        first_line = start + 1,
        consumed = index - start,
        "read block scalar"
    );

    BlockScalar {
        value,
        next_line: index,
    }
}

/// Join runs of text lines with single spaces; each blank line between runs is a newline.
fn fold_lines(lines: &[&str]) -> String {
    let mut out = String::new();
    let mut pending_breaks = 0usize;

    for line in lines {
        let segment = line.trim();
        if segment.is_empty() {
            if !out.is_empty() {
                pending_breaks += 1;
            }
            continue;
        }
        if !out.is_empty() {
            if pending_breaks > 0 {
                out.push_str(&"\n".repeat(pending_breaks));
            } else {
                out.push(' ');
            }
        }
        out.push_str(segment);
        pending_breaks = 0;
    }

    out
}

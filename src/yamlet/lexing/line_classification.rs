//! Line Classification
//!
//! Determines, for one physical line, its indentation and its shape. Classification is pure:
//! it never looks at neighbouring lines.
//!
//! Classification follows this specific order (important for correctness):
//! 1. Blank and comment lines (skipped, even if their whitespace contains tabs)
//! 2. Tab in the leading whitespace (error)
//! 3. Inline comment removal
//! 4. Sequence items (`-` alone or `- `)
//! 5. Mapping entries (first top-level `:`)
//! 6. Default to text

use super::line::{LineToken, LineType};
use crate::yamlet::error::{ErrorKind, ParseError};

/// Classify one line. Returns `Ok(None)` for blank and comment lines.
pub fn classify_line(number: usize, raw: &str) -> Result<Option<LineToken<'_>>, ParseError> {
    if is_blank_or_comment(raw) {
        return Ok(None);
    }

    let indent = count_indent(raw);
    let rest = &raw[indent..];
    if rest.starts_with('\t') {
        return Err(ParseError::new(number, ErrorKind::TabIndentation));
    }

    let content = strip_inline_comment(rest).trim_end();
    let line_type = classify_content(indent, content);

    Ok(Some(LineToken {
        number,
        indent,
        content,
        line_type,
    }))
}

fn classify_content(indent: usize, content: &str) -> LineType<'_> {
    if content == "-" || content.starts_with("- ") {
        let value = content[1..].trim_start();
        return LineType::SequenceItem {
            value,
            value_column: indent + content.len() - value.len(),
        };
    }

    match find_separator(content) {
        Some(pos) => LineType::MappingEntry {
            key: content[..pos].trim(),
            value: content[pos + 1..].trim(),
        },
        None => LineType::Text,
    }
}

/// Check if line is blank (only whitespace) or a full-line comment
pub fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Count of leading space characters (tabs are not counted)
pub fn count_indent(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

/// Byte offset of the first top-level `:` (outside quotes and brackets).
pub fn find_separator(text: &str) -> Option<usize> {
    scan_unquoted(text, |_, ch, depth| ch == ':' && depth == 0)
}

/// Like [`find_separator`], but the colon must be followed by whitespace or end the text.
///
/// Used for `- key: value` items, so that `- 12:30` and `- https://x` stay scalars.
pub fn find_key_separator(text: &str) -> Option<usize> {
    scan_unquoted(text, |idx, ch, depth| {
        ch == ':'
            && depth == 0
            && text[idx + 1..]
                .chars()
                .next()
                .map_or(true, char::is_whitespace)
    })
}

/// Remove a trailing `# comment`. A `#` only starts a comment outside quotes, and only at the
/// start of the text or after whitespace (`color: a#b` keeps its value).
pub fn strip_inline_comment(text: &str) -> &str {
    let cut = scan_unquoted(text, |idx, ch, _| {
        ch == '#'
            && text[..idx]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace)
    });
    match cut {
        Some(idx) => &text[..idx],
        None => text,
    }
}

/// Walk `text`, skipping quoted regions, calling `visit(byte_index, char, bracket_depth)` for
/// every unquoted character. Returns the index of the first character `visit` accepts.
///
/// A quote only opens a quoted region at the start of a token (start of text, after
/// whitespace, or after one of `[{,:`), so apostrophes inside words are plain characters.
/// A quote that is never closed is also a plain character.
fn scan_unquoted<F>(text: &str, mut visit: F) -> Option<usize>
where
    F: FnMut(usize, char, usize) -> bool,
{
    let mut depth = 0usize;
    let mut prev: Option<char> = None;
    let mut pos = 0;

    while let Some(ch) = text[pos..].chars().next() {
        if (ch == '"' || ch == '\'') && opens_token(prev) {
            if let Some(close) = closing_quote(text, pos, ch) {
                prev = Some(ch);
                pos = close + 1;
                continue;
            }
        }

        match ch {
            '[' | '{' => depth += 1,
            ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if visit(pos, ch, depth) {
            return Some(pos);
        }
        prev = Some(ch);
        pos += ch.len_utf8();
    }

    None
}

/// Byte index of the quote closing the one at `open`. Double quotes honour backslash escapes;
/// single quotes are escaped by doubling.
fn closing_quote(text: &str, open: usize, quote: char) -> Option<usize> {
    let mut chars = text[open + 1..].char_indices().peekable();
    while let Some((offset, ch)) = chars.next() {
        if quote == '"' && ch == '\\' {
            chars.next();
        } else if ch == quote {
            if quote == '\'' && chars.peek().map(|&(_, c)| c) == Some('\'') {
                chars.next();
            } else {
                return Some(open + 1 + offset);
            }
        }
    }
    None
}

fn opens_token(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '[' | '{' | ',' | ':'),
    }
}

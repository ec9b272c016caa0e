//! Scalar coercion
//!
//! Turns a trimmed value token into a typed node. Rules are tried in order:
//!
//! 1. empty -> null
//! 2. `true` / `false` -> boolean
//! 3. `null` / `~` -> null
//! 4. `[-+]digits[.digits]` -> number
//! 5. `"..."` -> string, with `\n`, `\"` and `\\` unescaped (other escapes kept as written)
//! 6. `'...'` -> string, with `''` read as one quote
//! 7. `{...}` / `[...]` -> inline flow container (see [flow](super::flow))
//! 8. anything else -> the text itself

use once_cell::sync::Lazy;
use regex::Regex;

use super::flow::parse_flow;
use crate::yamlet::document::Node;
use crate::yamlet::error::ErrorKind;

static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?[0-9]+(\.[0-9]+)?$").expect("number pattern compiles"));

/// Coerce a value token to a node.
pub fn coerce_scalar(token: &str) -> Result<Node, ErrorKind> {
    let token = token.trim();
    match token {
        "" => return Ok(Node::null()),
        "true" => return Ok(Node::boolean(true)),
        "false" => return Ok(Node::boolean(false)),
        "null" | "~" => return Ok(Node::null()),
        _ => {}
    }

    if let Some(number) = parse_number(token) {
        return Ok(Node::number(number));
    }
    if token.starts_with('"') {
        return unquote_double(token).map(Node::string);
    }
    if token.starts_with('\'') {
        return unquote_single(token).map(Node::string);
    }
    if token.starts_with('{') || token.starts_with('[') {
        return parse_flow(token);
    }

    Ok(Node::string(token))
}

/// The numeric value of `token`, if it matches the integer-or-decimal pattern.
pub fn parse_number(token: &str) -> Option<f64> {
    if NUMBER_PATTERN.is_match(token) {
        token.parse().ok()
    } else {
        None
    }
}

/// Read a double-quoted token. The closing quote must be the last character.
pub(crate) fn unquote_double(token: &str) -> Result<String, ErrorKind> {
    let unterminated = || ErrorKind::UnterminatedQuote(token.to_string());
    let inner = token.strip_prefix('"').ok_or_else(unterminated)?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => return Err(unterminated()),
            },
            '"' if chars.as_str().is_empty() => return Ok(out),
            '"' => return Err(unterminated()),
            _ => out.push(ch),
        }
    }

    Err(unterminated())
}

/// Read a single-quoted token. The closing quote must be the last character.
pub(crate) fn unquote_single(token: &str) -> Result<String, ErrorKind> {
    let unterminated = || ErrorKind::UnterminatedQuote(token.to_string());
    let inner = token.strip_prefix('\'').ok_or_else(unterminated)?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\'' {
            out.push(ch);
            continue;
        }
        if chars.peek() == Some(&'\'') {
            chars.next();
            out.push('\'');
        } else if chars.peek().is_none() {
            return Ok(out);
        } else {
            return Err(unterminated());
        }
    }

    Err(unterminated())
}

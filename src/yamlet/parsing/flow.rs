//! Inline flow literals
//!
//! A value that starts with `{` or `[` is read as a single-line, JSON-like container:
//!
//!     tags: [design, build, 2024]
//!     size: {width: 40, unit: ft}
//!
//! Unlike JSON, words need no quotes. A bare word is a boolean (`true`/`false`, any case), null
//! (`null`, any case, or `~`), or a number when it looks like one, and a string otherwise.
//! Consecutive words are one string, so `[web design, branding]` has two items. Quoted strings
//! follow the same rules as quoted scalars. Containers may nest within the line.
//!
//! Bare words cannot contain `:` `,` or brackets; quote them. Containers nest at most
//! [`MAX_FLOW_DEPTH`] levels.

use logos::Logos;
use std::ops::Range;

use super::scalar::{parse_number, unquote_double, unquote_single};
use crate::yamlet::document::{Mapping, Node};
use crate::yamlet::error::ErrorKind;

/// Deepest container nesting accepted inside one flow literal.
pub const MAX_FLOW_DEPTH: usize = 128;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
enum FlowToken {
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,
    #[regex(r"'([^']|'')*'")]
    SingleQuoted,
    #[regex(r#"[^\s{}\[\],:"'][^\s{}\[\],:]*"#)]
    Bare,
}

/// Parse a complete flow literal. Anything after the outermost container is an error.
pub fn parse_flow(literal: &str) -> Result<Node, ErrorKind> {
    let mut parser = FlowParser::new(literal)?;
    let node = parser.parse_value()?;
    match parser.next() {
        None => Ok(node),
        Some((_, span)) => Err(parser.invalid(span)),
    }
}

struct FlowParser<'s> {
    literal: &'s str,
    tokens: Vec<(FlowToken, Range<usize>)>,
    pos: usize,
    depth: usize,
}

impl<'s> FlowParser<'s> {
    fn new(literal: &'s str) -> Result<Self, ErrorKind> {
        let mut tokens = Vec::new();
        let mut lexer = FlowToken::lexer(literal);
        while let Some(result) = lexer.next() {
            let span = lexer.span();
            match result {
                Ok(token) => tokens.push((token, span)),
                Err(()) => {
                    let rest = &literal[span.start..];
                    if rest.starts_with('"') || rest.starts_with('\'') {
                        return Err(ErrorKind::UnterminatedQuote(rest.to_string()));
                    }
                    return Err(ErrorKind::InvalidFlow {
                        literal: literal.to_string(),
                        token: lexer.slice().to_string(),
                    });
                }
            }
        }
        Ok(Self {
            literal,
            tokens,
            pos: 0,
            depth: 0,
        })
    }

    fn next(&mut self) -> Option<(FlowToken, Range<usize>)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn peek(&self) -> Option<FlowToken> {
        self.tokens.get(self.pos).map(|(token, _)| *token)
    }

    fn eat(&mut self, expected: FlowToken) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn invalid(&self, span: Range<usize>) -> ErrorKind {
        ErrorKind::InvalidFlow {
            literal: self.literal.to_string(),
            token: self.literal[span].to_string(),
        }
    }

    fn unexpected_end(&self) -> ErrorKind {
        ErrorKind::InvalidFlow {
            literal: self.literal.to_string(),
            token: "end of line".to_string(),
        }
    }

    fn parse_value(&mut self) -> Result<Node, ErrorKind> {
        match self.next() {
            Some((FlowToken::OpenBrace, span)) => self.nested(span, Self::parse_mapping),
            Some((FlowToken::OpenBracket, span)) => self.nested(span, Self::parse_sequence),
            Some((FlowToken::DoubleQuoted, span)) => {
                unquote_double(&self.literal[span]).map(Node::string)
            }
            Some((FlowToken::SingleQuoted, span)) => {
                unquote_single(&self.literal[span]).map(Node::string)
            }
            Some((FlowToken::Bare, span)) => {
                let text = self.bare_run(span);
                Ok(coerce_bare(text))
            }
            Some((_, span)) => Err(self.invalid(span)),
            None => Err(self.unexpected_end()),
        }
    }

    /// Parse a container body one level deeper, rejecting the opening bracket past the limit.
    fn nested(
        &mut self,
        open: Range<usize>,
        body: fn(&mut Self) -> Result<Node, ErrorKind>,
    ) -> Result<Node, ErrorKind> {
        if self.depth >= MAX_FLOW_DEPTH {
            return Err(self.invalid(open));
        }
        self.depth += 1;
        let node = body(self);
        self.depth -= 1;
        node
    }

    /// Extend a bare word over the bare words that follow it, keeping the original spacing.
    fn bare_run(&mut self, first: Range<usize>) -> &'s str {
        let literal = self.literal;
        let mut end = first.end;
        while let Some((FlowToken::Bare, span)) = self.tokens.get(self.pos) {
            end = span.end;
            self.pos += 1;
        }
        &literal[first.start..end]
    }

    fn parse_sequence(&mut self) -> Result<Node, ErrorKind> {
        let mut items = Vec::new();
        if self.eat(FlowToken::CloseBracket) {
            return Ok(Node::Sequence(items));
        }
        loop {
            items.push(self.parse_value()?);
            match self.next() {
                Some((FlowToken::Comma, _)) => continue,
                Some((FlowToken::CloseBracket, _)) => return Ok(Node::Sequence(items)),
                Some((_, span)) => return Err(self.invalid(span)),
                None => return Err(self.unexpected_end()),
            }
        }
    }

    fn parse_mapping(&mut self) -> Result<Node, ErrorKind> {
        let mut map = Mapping::new();
        if self.eat(FlowToken::CloseBrace) {
            return Ok(Node::Mapping(map));
        }
        loop {
            let key = self.parse_key()?;
            match self.next() {
                Some((FlowToken::Colon, _)) => {}
                Some((_, span)) => return Err(self.invalid(span)),
                None => return Err(self.unexpected_end()),
            }
            let value = self.parse_value()?;
            map.insert(key, value);
            match self.next() {
                Some((FlowToken::Comma, _)) => continue,
                Some((FlowToken::CloseBrace, _)) => return Ok(Node::Mapping(map)),
                Some((_, span)) => return Err(self.invalid(span)),
                None => return Err(self.unexpected_end()),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, ErrorKind> {
        match self.next() {
            Some((FlowToken::Bare, span)) => Ok(self.bare_run(span).to_string()),
            Some((FlowToken::DoubleQuoted, span)) => unquote_double(&self.literal[span]),
            Some((FlowToken::SingleQuoted, span)) => unquote_single(&self.literal[span]),
            Some((_, span)) => Err(self.invalid(span)),
            None => Err(self.unexpected_end()),
        }
    }
}

fn coerce_bare(text: &str) -> Node {
    if text.eq_ignore_ascii_case("true") {
        Node::boolean(true)
    } else if text.eq_ignore_ascii_case("false") {
        Node::boolean(false)
    } else if text.eq_ignore_ascii_case("null") || text == "~" {
        Node::null()
    } else if let Some(number) = parse_number(text) {
        Node::number(number)
    } else {
        Node::string(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(items: Vec<Node>) -> Node {
        Node::Sequence(items)
    }

    #[test]
    fn test_sequence_of_bare_words() {
        assert_eq!(
            parse_flow("[design, build, 2024, TRUE, null]"),
            Ok(seq(vec![
                Node::from("design"),
                Node::from("build"),
                Node::number(2024.0),
                Node::boolean(true),
                Node::null(),
            ]))
        );
    }

    #[test]
    fn test_multi_word_items_keep_spacing() {
        assert_eq!(
            parse_flow("[web  design, branding]"),
            Ok(seq(vec![Node::from("web  design"), Node::from("branding")]))
        );
    }

    #[test]
    fn test_mapping_preserves_order() {
        let node = parse_flow("{width: 40, unit: ft, 'label': \"Main hall\"}").unwrap();
        let map = node.as_mapping().unwrap();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["width", "unit", "label"]);
        assert_eq!(map["width"], Node::number(40.0));
        assert_eq!(map["unit"], Node::from("ft"));
        assert_eq!(map["label"], Node::from("Main hall"));
    }

    #[test]
    fn test_nested_containers() {
        let node = parse_flow("{a: [1, {b: ~}], c: {}}").unwrap();
        assert_eq!(
            node.get("a"),
            Some(&seq(vec![
                Node::number(1.0),
                Node::from_iter([("b", Node::null())])
            ]))
        );
        assert_eq!(node.get("c"), Some(&Node::empty_mapping()));
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(parse_flow("[]"), Ok(seq(vec![])));
        assert_eq!(parse_flow("{ }"), Ok(Node::empty_mapping()));
    }

    #[test]
    fn test_quoted_items() {
        assert_eq!(
            parse_flow(r#"["a, b", 'it''s', "x\ny"]"#),
            Ok(seq(vec![
                Node::from("a, b"),
                Node::from("it's"),
                Node::from("x\ny"),
            ]))
        );
    }

    #[test]
    fn test_unbalanced_literals_are_rejected() {
        assert_eq!(
            parse_flow("[a, b"),
            Err(ErrorKind::InvalidFlow {
                literal: "[a, b".into(),
                token: "end of line".into()
            })
        );
        assert_eq!(
            parse_flow("[a]]"),
            Err(ErrorKind::InvalidFlow {
                literal: "[a]]".into(),
                token: "]".into()
            })
        );
        assert!(matches!(
            parse_flow("{a: 1,}"),
            Err(ErrorKind::InvalidFlow { .. })
        ));
        assert!(matches!(parse_flow("{a}"), Err(ErrorKind::InvalidFlow { .. })));
        assert!(matches!(parse_flow("[a,, b]"), Err(ErrorKind::InvalidFlow { .. })));
    }

    #[test]
    fn test_colon_in_bare_word_is_rejected() {
        assert_eq!(
            parse_flow("[http://x]"),
            Err(ErrorKind::InvalidFlow {
                literal: "[http://x]".into(),
                token: ":".into()
            })
        );
    }

    #[test]
    fn test_nesting_depth_is_limited() {
        let at_limit = format!(
            "{}{}",
            "[".repeat(MAX_FLOW_DEPTH),
            "]".repeat(MAX_FLOW_DEPTH)
        );
        assert!(parse_flow(&at_limit).is_ok());

        let too_deep = format!("{}{}", "[".repeat(20_000), "]".repeat(20_000));
        assert_eq!(
            parse_flow(&too_deep),
            Err(ErrorKind::InvalidFlow {
                literal: too_deep.clone(),
                token: "[".into()
            })
        );

        let mixed = format!("{}{}", "{a: [".repeat(MAX_FLOW_DEPTH), "]}".repeat(MAX_FLOW_DEPTH));
        assert!(matches!(
            parse_flow(&mixed),
            Err(ErrorKind::InvalidFlow { ref token, .. }) if token == "{"
        ));
    }

    #[test]
    fn test_unterminated_quote_inside_flow() {
        assert_eq!(
            parse_flow("[\"open]"),
            Err(ErrorKind::UnterminatedQuote("\"open]".into()))
        );
    }
}

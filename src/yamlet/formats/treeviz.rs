//! Treeviz formatter for document trees
//!
//! Treeviz is a one-line-per-node view of a parsed document, for scanning its structure
//! quickly. Nesting is drawn with box connectors; labels are truncated to 30 characters.
//!
//! Example:
//!
//!     ⧉ document (2 entries)
//!     ├─ ≔ a (1 entry)
//!     │  └─ ◦ b: 1
//!     └─ ☰ c (2 items)
//!        ├─ • "x"
//!        └─ • 2
//!
//! Icons
//!     Document: ⧉
//!     Mapping: ≔
//!     Sequence: ☰
//!     Scalar under a key: ◦
//!     Scalar in a sequence: •

use super::registry::{FormatError, Formatter};
use crate::yamlet::document::{Node, Scalar};

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Strings are quoted so that `"1"` and `1` look different.
fn scalar_label(scalar: &Scalar) -> String {
    match scalar {
        Scalar::String(s) => truncate(&format!("{:?}", s), LABEL_WIDTH),
        other => truncate(&other.to_string(), LABEL_WIDTH),
    }
}

fn size_label(node: &Node) -> String {
    match node {
        Node::Mapping(map) => plural(map.len(), "entry", "entries"),
        Node::Sequence(items) => plural(items.len(), "item", "items"),
        Node::Scalar(_) => String::new(),
    }
}

pub fn to_treeviz_str(doc: &Node) -> String {
    let mut result = String::new();
    match doc {
        Node::Scalar(scalar) => {
            result.push_str(&format!("⧉ {}\n", scalar_label(scalar)));
        }
        container => {
            result.push_str(&format!("⧉ document ({})\n", size_label(container)));
            append_children(&mut result, container, "");
        }
    }
    result
}

fn append_children(result: &mut String, node: &Node, prefix: &str) {
    match node {
        Node::Mapping(map) => {
            for (i, (key, child)) in map.iter().enumerate() {
                let is_last = i == map.len() - 1;
                append_node(result, &truncate(key, LABEL_WIDTH), child, true, prefix, is_last);
            }
        }
        Node::Sequence(items) => {
            for (i, child) in items.iter().enumerate() {
                let is_last = i == items.len() - 1;
                append_node(result, &format!("[{}]", i), child, false, prefix, is_last);
            }
        }
        Node::Scalar(_) => {}
    }
}

fn append_node(
    result: &mut String,
    label: &str,
    node: &Node,
    keyed: bool,
    prefix: &str,
    is_last: bool,
) {
    let connector = if is_last { "└─" } else { "├─" };

    let line = match node {
        Node::Mapping(_) => format!("≔ {} ({})", label, size_label(node)),
        Node::Sequence(_) => format!("☰ {} ({})", label, size_label(node)),
        Node::Scalar(scalar) if keyed => format!("◦ {}: {}", label, scalar_label(scalar)),
        Node::Scalar(scalar) => format!("• {}", scalar_label(scalar)),
    };
    result.push_str(&format!("{}{} {}\n", prefix, connector, line));

    let new_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
    append_children(result, node, &new_prefix);
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, doc: &Node) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn description(&self) -> &str {
        "Tree view, one line per node"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yamlet::parsing::parse;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_treeviz_str(&Node::empty_mapping()), "⧉ document (0 entries)\n");
    }

    #[test]
    fn test_nested_document() {
        let doc = parse("a:\n  b: 1\nc: [x, 2]").unwrap();
        let expected = [
            "⧉ document (2 entries)",
            "├─ ≔ a (1 entry)",
            "│  └─ ◦ b: 1",
            "└─ ☰ c (2 items)",
            "   ├─ • \"x\"",
            "   └─ • 2",
        ];
        assert_eq!(to_treeviz_str(&doc), expected.join("\n") + "\n");
    }

    #[test]
    fn test_long_strings_are_truncated() {
        let doc = parse("note: aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap();
        let out = to_treeviz_str(&doc);
        assert!(out.contains(&format!("◦ note: \"{}...", "a".repeat(29))));
    }
}

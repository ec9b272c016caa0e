//! Testing utilities for document assertions
//!
//! Checking a parsed tree by hand means matching on every level:
//!
//! ```rust-example
//! match doc.get("items") {
//!     Some(Node::Sequence(items)) => match &items[0] {
//!         Node::Mapping(m) => assert_eq!(m.get("name"), Some(&Node::from("a"))),
//!         other => panic!("expected mapping, got {other:?}"),
//!     },
//!     other => panic!("expected sequence, got {other:?}"),
//! }
//! ```
//!
//! [assert_node](fn@assert_node) does the same with a fluent API, and failure messages name
//! the path to the node that did not match:
//!
//! ```rust-example
//! assert_node(&doc)
//!     .keys(&["items"])
//!     .key("items", |items| {
//!         items.sequence_len(2).item(0, |item| {
//!             item.key("name", |name| {
//!                 name.string("a");
//!             });
//!         });
//!     });
//! ```

use crate::yamlet::document::{Mapping, Node, NodeKind};

/// Start asserting on a node. The context path starts at `$`.
pub fn assert_node(node: &Node) -> NodeAssertion<'_> {
    NodeAssertion {
        node,
        context: "$".to_string(),
    }
}

pub struct NodeAssertion<'a> {
    pub(crate) node: &'a Node,
    pub(crate) context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn kind(self, expected: NodeKind) -> Self {
        assert_eq!(
            self.node.kind(),
            expected,
            "{}: Expected {}, found {:?}",
            self.context,
            expected,
            self.node
        );
        self
    }

    pub fn mapping_len(self, expected: usize) -> Self {
        let actual = self.expect_mapping().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} entries, found {} entries",
            self.context, expected, actual
        );
        self
    }

    /// The mapping's keys, in order.
    pub fn keys(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.expect_mapping().keys().map(String::as_str).collect();
        assert_eq!(
            actual, expected,
            "{}: Expected keys {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }

    pub fn key<F>(self, key: &str, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let map = self.expect_mapping();
        let child = map.get(key).unwrap_or_else(|| {
            panic!(
                "{}: Missing key {:?} (keys: {:?})",
                self.context,
                key,
                map.keys().collect::<Vec<_>>()
            )
        });
        assertion(NodeAssertion {
            node: child,
            context: format!("{}.{}", self.context, key),
        });
        self
    }

    pub fn sequence_len(self, expected: usize) -> Self {
        let actual = self.expect_sequence().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} items, found {} items",
            self.context, expected, actual
        );
        self
    }

    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let items = self.expect_sequence();
        assert!(
            index < items.len(),
            "{}: Item index {} out of bounds (sequence has {} items)",
            self.context,
            index,
            items.len()
        );
        assertion(NodeAssertion {
            node: &items[index],
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    pub fn string(self, expected: &str) -> Self {
        assert_eq!(
            self.node.as_str(),
            Some(expected),
            "{}: Expected string {:?}, found {:?}",
            self.context,
            expected,
            self.node
        );
        self
    }

    pub fn string_contains(self, substring: &str) -> Self {
        let actual = self.node.as_str().unwrap_or_else(|| {
            panic!("{}: Expected string, found {:?}", self.context, self.node)
        });
        assert!(
            actual.contains(substring),
            "{}: Expected string containing {:?}, found {:?}",
            self.context,
            substring,
            actual
        );
        self
    }

    pub fn number(self, expected: f64) -> Self {
        assert_eq!(
            self.node.as_f64(),
            Some(expected),
            "{}: Expected number {}, found {:?}",
            self.context,
            expected,
            self.node
        );
        self
    }

    pub fn boolean(self, expected: bool) -> Self {
        assert_eq!(
            self.node.as_bool(),
            Some(expected),
            "{}: Expected boolean {}, found {:?}",
            self.context,
            expected,
            self.node
        );
        self
    }

    pub fn null(self) -> Self {
        assert!(
            self.node.is_null(),
            "{}: Expected null, found {:?}",
            self.context,
            self.node
        );
        self
    }

    fn expect_mapping(&self) -> &'a Mapping {
        self.node.as_mapping().unwrap_or_else(|| {
            panic!(
                "{}: Expected mapping, found {}",
                self.context,
                self.node.kind()
            )
        })
    }

    fn expect_sequence(&self) -> &'a [Node] {
        self.node.as_sequence().unwrap_or_else(|| {
            panic!(
                "{}: Expected sequence, found {}",
                self.context,
                self.node.kind()
            )
        })
    }
}

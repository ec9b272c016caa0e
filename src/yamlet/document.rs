//! Document tree
//!
//!     The parser produces a tree of plain values: mappings, sequences and scalar leaves. The
//!     root of every document is a mapping. Mappings keep their keys in insertion order; a key
//!     that appears twice keeps its first position and takes the later value.
//!
//!     Numbers are stored as 64-bit floats. When serialized (JSON, YAML, typed extraction),
//!     integral values are emitted as integers so that `count: 3` round-trips as `3`, not `3.0`.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Ordered key -> node container.
pub type Mapping = IndexMap<String, Node>;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

/// The shape of a node, used in diagnostics and the tree view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Mapping,
    Sequence,
    String,
    Number,
    Boolean,
    Null,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Mapping => "mapping",
            NodeKind::Sequence => "sequence",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::Null => "null",
        };
        write!(f, "{}", name)
    }
}

impl Node {
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    pub fn boolean(value: bool) -> Self {
        Node::Scalar(Scalar::Boolean(value))
    }

    pub fn number(value: f64) -> Self {
        Node::Scalar(Scalar::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::Scalar(Scalar::String(value.into()))
    }

    /// An empty mapping (the value of an empty document).
    pub fn empty_mapping() -> Self {
        Node::Mapping(Mapping::new())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Mapping(_) => NodeKind::Mapping,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Scalar(Scalar::String(_)) => NodeKind::String,
            Node::Scalar(Scalar::Number(_)) => NodeKind::Number,
            Node::Scalar(Scalar::Boolean(_)) => NodeKind::Boolean,
            Node::Scalar(Scalar::Null) => NodeKind::Null,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Scalar(Scalar::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// The number as an integer, if it has no fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_f64().and_then(integral)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Scalar(Scalar::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::Null))
    }

    /// Look up a key when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Follow a chain of mapping keys from this node.
    ///
    /// An empty path returns the node itself.
    pub fn get_path(&self, path: &[&str]) -> Option<&Node> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Convert to a `serde_json::Value`, preserving key order.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Node::Mapping(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Node::Sequence(items) => Value::Array(items.iter().map(Node::to_json).collect()),
            Node::Scalar(Scalar::Null) => Value::Null,
            Node::Scalar(Scalar::Boolean(b)) => Value::Bool(*b),
            Node::Scalar(Scalar::String(s)) => Value::String(s.clone()),
            Node::Scalar(Scalar::Number(n)) => match integral(*n) {
                Some(i) => Value::from(i),
                None => serde_json::Number::from_f64(*n)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
            },
        }
    }
}

/// Largest float below which every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

fn integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        Some(n as i64)
    } else {
        None
    }
}

impl fmt::Display for Scalar {
    /// Plain rendering: strings unquoted, integral numbers without a fraction.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Number(n) => match integral(*n) {
                Some(i) => write!(f, "{}", i),
                None => write!(f, "{}", n),
            },
            Scalar::String(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Boolean(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) => match integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Mapping(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
            Node::Sequence(items) => serializer.collect_seq(items),
            Node::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::string(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::string(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::number(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::number(value as f64)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::boolean(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Node::Mapping(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        Node::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::from_iter([
            (
                "site",
                Node::from_iter([("title", Node::from("River Oak")), ("year", Node::from(2024i64))]),
            ),
            (
                "tags",
                Node::from(vec![Node::from("web"), Node::from(1.5), Node::null()]),
            ),
        ])
    }

    #[test]
    fn test_kind_names() {
        let node = sample();
        assert_eq!(node.kind(), NodeKind::Mapping);
        assert_eq!(node.get("tags").unwrap().kind().to_string(), "sequence");
        assert_eq!(Node::null().kind().to_string(), "null");
    }

    #[test]
    fn test_get_path() {
        let node = sample();
        assert_eq!(
            node.get_path(&["site", "title"]).and_then(Node::as_str),
            Some("River Oak")
        );
        assert_eq!(node.get_path(&["site", "year"]).and_then(Node::as_i64), Some(2024));
        assert!(node.get_path(&["site", "missing"]).is_none());
        assert_eq!(node.get_path(&[]), Some(&node));
    }

    #[test]
    fn test_as_i64_rejects_fractions() {
        assert_eq!(Node::number(1.5).as_i64(), None);
        assert_eq!(Node::number(-4.0).as_i64(), Some(-4));
        assert_eq!(Node::string("4").as_i64(), None);
    }

    #[test]
    fn test_to_json_preserves_order_and_integers() {
        let json = sample().to_json();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["site", "tags"]);
        assert_eq!(json["site"]["year"], serde_json::json!(2024));
        assert!(json["site"]["year"].is_i64());
        assert_eq!(json["tags"], serde_json::json!(["web", 1.5, null]));
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let node = sample();
        let via_serde = serde_json::to_value(&node).unwrap();
        assert_eq!(via_serde, node.to_json());
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"site":{"title":"River Oak","year":2024},"tags":["web",1.5,null]}"#
        );
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Number(42.0).to_string(), "42");
        assert_eq!(Scalar::Number(0.25).to_string(), "0.25");
        assert_eq!(Scalar::Boolean(false).to_string(), "false");
        assert_eq!(Scalar::Null.to_string(), "null");
        assert_eq!(Scalar::String("plain".into()).to_string(), "plain");
    }
}

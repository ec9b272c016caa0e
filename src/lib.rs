//! # yamlet
//!
//! A parser for a restricted, indentation-sensitive YAML dialect used for site and content
//! configuration files.
//!
//! A document is a mapping at the top level, nested by indentation, with `- ` sequences,
//! scalars (strings, numbers, booleans, null), quoted strings, single-line flow containers
//! (`[a, b]`, `{k: v}`), `|` / `>` block scalars and `#` comments. Anchors, tags, multiple
//! documents and multi-line flow containers are not supported.
//!
//! ```ignore
//! let doc = yamlet_parser::parse("title: Home\ntags: [a, b]\n")?;
//! assert_eq!(doc.get("title").and_then(|n| n.as_str()), Some("Home"));
//! ```
//!
//! ## Testing
//!
//! For assertions over parsed trees, see the [testing module](yamlet::testing).

pub mod yamlet;

pub use yamlet::document::{Mapping, Node, NodeKind, Scalar};
pub use yamlet::error::{DecodeError, ErrorKind, ParseError};
pub use yamlet::parsing::{coerce_scalar, from_str, parse};

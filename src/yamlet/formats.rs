//! Output format implementations for document trees
//!
//! This module contains the formats a parsed document can be written in:
//! - json: pretty-printed JSON, key order preserved
//! - yaml: standard YAML
//! - treeviz: one line per node, for reading a tree at a glance

pub mod json;
pub mod registry;
pub mod treeviz;
pub mod yaml;

pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
pub use yaml::YamlFormatter;

//! YAML output

use super::registry::{FormatError, Formatter};
use crate::yamlet::document::Node;

/// Standard YAML, as written by `serde_yaml`.
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, doc: &Node) -> Result<String, FormatError> {
        serde_yaml::to_string(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Standard YAML"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yamlet::parsing::parse;

    #[test]
    fn test_yaml_output_reads_back() {
        let doc = parse("title: Home\nsize:\n  width: 40\ntags:\n  - a\n  - b").unwrap();
        let out = YamlFormatter.serialize(&doc).unwrap();
        assert_eq!(out, "title: Home\nsize:\n  width: 40\ntags:\n- a\n- b\n");
    }
}

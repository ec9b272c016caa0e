//! JSON output

use super::registry::{FormatError, Formatter};
use crate::yamlet::document::Node;

/// Pretty-printed JSON with a trailing newline. Integral numbers print without a fraction.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Node) -> Result<String, FormatError> {
        let mut out = serde_json::to_string_pretty(doc)
            .map_err(|e| FormatError::SerializationError(e.to_string()))?;
        out.push('\n');
        Ok(out)
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON"
    }
}

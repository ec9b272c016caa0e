//! Output formats by name
//!
//! `yamlet parse --format <name>` looks its formatter up here. The built-in set is json, yaml
//! and treeviz; callers may add their own with [`FormatRegistry::register`].

use crate::yamlet::document::Node;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Renders a parsed document as text.
pub trait Formatter: Send + Sync {
    /// Registry key, as typed on the command line.
    fn name(&self) -> &str;

    fn serialize(&self, doc: &Node) -> Result<String, FormatError>;

    /// One line for `yamlet formats`.
    fn description(&self) -> &str {
        ""
    }
}

/// Formatters keyed by name. Names iterate in sorted order.
#[derive(Default)]
pub struct FormatRegistry {
    formatters: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// A registry holding json, yaml and treeviz.
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry.register(super::TreevizFormatter);
        registry
    }

    /// Add `formatter` under its name, replacing any formatter already there.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn serialize(&self, doc: &Node, format: &str) -> Result<String, FormatError> {
        self.get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?
            .serialize(doc)
    }

    /// `(name, description)` pairs in name order.
    pub fn list_formats(&self) -> Vec<(&str, &str)> {
        self.formatters
            .iter()
            .map(|(name, formatter)| (name.as_str(), formatter.description()))
            .collect()
    }
}

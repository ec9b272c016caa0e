//! Parsing module for yamlet documents
//!
//! Source text goes through four stages, leaves first:
//! 1. **Line classification** ([lexing](crate::yamlet::lexing)): indentation and line shape
//! 2. **Scalar coercion** ([scalar]): value tokens to typed leaves, including inline flow
//!    containers ([flow])
//! 3. **Block scalars** ([block_scalar]): `|` and `>` values spanning several lines
//! 4. **Context stack** ([engine]): nests mappings and sequences by indentation
//!
//! Any error aborts the whole parse; there is no partial tree.

pub mod block_scalar;
pub mod engine;
pub mod flow;
pub mod scalar;

use serde::de::DeserializeOwned;

use crate::yamlet::error::DecodeError;

pub use engine::parse;
pub use scalar::coerce_scalar;

/// Parse `text` and deserialize the tree into `T`.
///
/// Integral numbers deserialize into integer fields; mappings deserialize into structs or maps.
pub fn from_str<T: DeserializeOwned>(text: &str) -> Result<T, DecodeError> {
    let root = parse(text)?;
    Ok(serde_json::from_value(root.to_json())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Project {
        title: String,
        year: u32,
        featured: bool,
        tags: Vec<String>,
        cover: Option<String>,
    }

    #[test]
    fn test_from_str_into_struct() {
        let project: Project =
            from_str("title: Harbour\nyear: 2023\nfeatured: true\ntags: [a, b]\ncover:\n")
                .unwrap();
        assert_eq!(
            project,
            Project {
                title: "Harbour".into(),
                year: 2023,
                featured: true,
                tags: vec!["a".into(), "b".into()],
                cover: None,
            }
        );
    }

    #[test]
    fn test_from_str_into_map() {
        let map: BTreeMap<String, f64> = from_str("a: 1.5\nb: -2").unwrap();
        assert_eq!(map["a"], 1.5);
        assert_eq!(map["b"], -2.0);
    }

    #[test]
    fn test_from_str_errors() {
        let err = from_str::<Project>("title: x\n\tyear: 1").unwrap_err();
        assert!(matches!(err, DecodeError::Parse(ref e) if e.line == 2));

        let err = from_str::<Project>("title: x").unwrap_err();
        assert!(matches!(err, DecodeError::Shape(_)));
    }
}

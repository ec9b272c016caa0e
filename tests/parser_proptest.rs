//! Property-based tests for the parser
//!
//! These tests generate documents and scalar tokens and check that parsing is deterministic,
//! never panics, and coerces values the same way regardless of surrounding text.

use proptest::prelude::*;
use yamlet_parser::{coerce_scalar, parse, Mapping, Node};

/// Words that coerce to something other than a string
fn is_keyword(word: &str) -> bool {
    matches!(word, "true" | "false" | "null")
}

fn scalar_text() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<i32>().prop_map(|n| n.to_string()),
        "[a-z]{1,10}( [a-z]{1,10}){0,3}",
        Just("true".to_string()),
        Just("~".to_string()),
        "[a-z]{1,6}".prop_map(|w| format!("[{}, 1]", w)),
        "[a-zA-Z ,.!?]{0,12}".prop_map(|s| format!("'{}'", s)),
    ]
}

proptest! {
    #[test]
    fn test_parse_is_deterministic(
        entries in prop::collection::vec(("[a-z]{1,8}", scalar_text(), 0usize..3), 0..20)
    ) {
        let mut text = String::new();
        for (key, value, depth) in &entries {
            text.push_str(&"  ".repeat(*depth));
            text.push_str(&format!("{}: {}\n", key, value));
        }
        prop_assert_eq!(parse(&text), parse(&text));
    }

    #[test]
    fn test_flat_mapping_keeps_first_position_and_last_value(
        entries in prop::collection::vec(("[a-e]{1,2}", any::<i16>()), 1..30)
    ) {
        let text: String = entries
            .iter()
            .map(|(key, value)| format!("{}: {}\n", key, value))
            .collect();

        let mut expected = Mapping::new();
        for (key, value) in &entries {
            expected.insert(key.clone(), Node::number(f64::from(*value)));
        }

        prop_assert_eq!(parse(&text).unwrap(), Node::Mapping(expected));
    }

    #[test]
    fn test_integers_coerce_to_numbers(n in any::<i32>()) {
        prop_assert_eq!(coerce_scalar(&n.to_string()), Ok(Node::number(f64::from(n))));
    }

    #[test]
    fn test_plain_words_stay_strings(word in "[a-z][a-z_-]{0,15}") {
        prop_assume!(!is_keyword(&word));
        prop_assert_eq!(coerce_scalar(&word), Ok(Node::from(word.as_str())));
    }

    #[test]
    fn test_single_quoted_strings_unescape(inner in "[a-zA-Z0-9 ',.!?:#-]{0,20}") {
        let quoted = format!("'{}'", inner.replace('\'', "''"));
        prop_assert_eq!(coerce_scalar(&quoted), Ok(Node::from(inner.as_str())));
    }

    #[test]
    fn test_value_survives_nesting(value in scalar_text(), depth in 1usize..6) {
        let expected = coerce_scalar(&value).unwrap();

        let mut text = String::new();
        for level in 0..depth {
            text.push_str(&format!("{}k{}:\n", "  ".repeat(level), level));
        }
        text.push_str(&format!("{}leaf: {}\n", "  ".repeat(depth), value));

        let keys: Vec<String> = (0..depth).map(|level| format!("k{}", level)).collect();
        let mut path: Vec<&str> = keys.iter().map(String::as_str).collect();
        path.push("leaf");

        let doc = parse(&text).unwrap();
        prop_assert_eq!(doc.get_path(&path), Some(&expected));
    }

    #[test]
    fn test_arbitrary_input_never_panics(text in "[ -~\n\t]{0,200}") {
        let _ = parse(&text);
    }
}

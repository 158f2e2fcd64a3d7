//! Pure value-coercion primitives.
//!
//! Everything here is total: any JSON value (or its absence) in, a
//! usable value out. Nothing raises, nothing allocates beyond the
//! returned value.

use crate::fields;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Try each candidate key in order; return the first value that is
/// present and not null.
pub fn resolve<'a, K: AsRef<str>>(
    bag: &'a Map<String, Value>,
    candidates: &[K],
) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| bag.get(key.as_ref()))
        .find(|value| !value.is_null())
}

/// Derive the casing variants a provider might use for a camelCase
/// field name: the name itself, snake_case, PascalCase, and
/// human-spaced Title Case.
pub fn key_variants(camel: &str) -> Vec<String> {
    let mut snake = String::with_capacity(camel.len() + 4);
    let mut title = String::with_capacity(camel.len() + 4);
    for (i, c) in camel.chars().enumerate() {
        if c.is_uppercase() {
            snake.push('_');
            title.push(' ');
            snake.extend(c.to_lowercase());
            title.push(c);
        } else {
            snake.push(c);
            if i == 0 {
                title.extend(c.to_uppercase());
            } else {
                title.push(c);
            }
        }
    }
    let mut pascal = String::with_capacity(camel.len());
    let mut chars = camel.chars();
    if let Some(first) = chars.next() {
        pascal.extend(first.to_uppercase());
        pascal.extend(chars);
    }
    vec![camel.to_string(), snake, pascal, title]
}

/// Humanize a camelCase field name for placeholder text: each internal
/// uppercase letter is preceded by a space, and the result is
/// lowercased. `"financialImplications"` becomes
/// `"financial implications"`.
pub fn humanize(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 4);
    for c in camel.chars() {
        if c.is_uppercase() {
            out.push(' ');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Coerce a resolved value into a flat prose string.
///
/// Strings pass through. Absent or null values become the documented
/// "not available" placeholder; nested objects become the "not properly
/// formatted" placeholder. Scalars are stringified and arrays joined,
/// so the result is always printable.
pub fn flat_string(value: Option<&Value>, field: &str) -> String {
    match value {
        None | Some(Value::Null) => {
            debug!(field, "field missing from payload, using placeholder");
            fields::missing_placeholder(field)
        }
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(_)) => {
            warn!(field, "field arrived as a nested object, using placeholder");
            fields::malformed_placeholder(field)
        }
        Some(Value::Array(items)) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

/// Coerce a resolved value into an array of strings. Anything that is
/// not an array yields an empty sequence; non-string elements are
/// stringified.
pub fn string_array(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(scalar_text).collect(),
        _ => Vec::new(),
    }
}

/// Render a single JSON value as display text: strings unquoted,
/// everything else via its compact JSON form.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_resolve_returns_first_present_key() {
        let bag = bag(json!({"bill_number": "HB 2", "BillNumber": "HB 3"}));
        let value = resolve(&bag, fields::BILL_NUMBER_KEYS).unwrap();
        assert_eq!(value, &json!("HB 2"));
    }

    #[test]
    fn test_resolve_skips_null_values() {
        let bag = bag(json!({"billNumber": null, "Bill Number": "HB 4"}));
        let value = resolve(&bag, fields::BILL_NUMBER_KEYS).unwrap();
        assert_eq!(value, &json!("HB 4"));
    }

    #[test]
    fn test_resolve_none_when_no_candidate_present() {
        let bag = bag(json!({"unrelated": 1, "billNumber": null}));
        assert!(resolve(&bag, fields::BILL_NUMBER_KEYS).is_none());
    }

    #[test]
    fn test_key_variants_cover_four_conventions() {
        assert_eq!(
            key_variants("financialImplications"),
            vec![
                "financialImplications",
                "financial_implications",
                "FinancialImplications",
                "Financial Implications",
            ]
        );
    }

    #[test]
    fn test_key_variants_single_word() {
        assert_eq!(
            key_variants("summary"),
            vec!["summary", "summary", "Summary", "Summary"]
        );
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("financialImplications"), "financial implications");
        assert_eq!(humanize("changesTo"), "changes to");
        assert_eq!(humanize("summary"), "summary");
    }

    #[test]
    fn test_flat_string_passes_strings_through() {
        assert_eq!(
            flat_string(Some(&json!("a paragraph")), "changesTo"),
            "a paragraph"
        );
    }

    #[test]
    fn test_flat_string_missing_and_null() {
        let expected = fields::missing_placeholder("changesTo");
        assert_eq!(flat_string(None, "changesTo"), expected);
        assert_eq!(flat_string(Some(&Value::Null), "changesTo"), expected);
    }

    #[test]
    fn test_flat_string_object_is_malformed_not_missing() {
        let value = json!({"current": "old law", "proposed": "new law"});
        assert_eq!(
            flat_string(Some(&value), "changesTo"),
            fields::malformed_placeholder("changesTo")
        );
    }

    #[test]
    fn test_flat_string_is_deterministic_over_malformed_shapes() {
        let value = json!({"a": 1});
        let first = flat_string(Some(&value), "otherFactors");
        let second = flat_string(Some(&value), "otherFactors");
        assert_eq!(first, second);
    }

    #[test]
    fn test_flat_string_totality_over_scalars_and_arrays() {
        assert_eq!(flat_string(Some(&json!(42)), "f"), "42");
        assert_eq!(flat_string(Some(&json!(true)), "f"), "true");
        assert_eq!(flat_string(Some(&json!(["x", "y"])), "f"), "x, y");
        assert_eq!(flat_string(Some(&json!(["x", 3])), "f"), "x, 3");
    }

    #[test]
    fn test_string_array_passes_arrays_through() {
        let value = json!(["https://a.example", 7, {"k": "v"}]);
        assert_eq!(
            string_array(Some(&value)),
            vec!["https://a.example", "7", r#"{"k":"v"}"#]
        );
    }

    #[test]
    fn test_string_array_non_arrays_are_empty() {
        assert!(string_array(None).is_empty());
        assert!(string_array(Some(&json!("one"))).is_empty());
        assert!(string_array(Some(&json!({"a": 1}))).is_empty());
        assert!(string_array(Some(&Value::Null)).is_empty());
    }
}

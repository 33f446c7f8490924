//! Field diffs for audit update entries

use std::fmt;

use serde_json::{Map, Value};

/// Fields that change on every save and carry no information in a diff
const BOOKKEEPING_FIELDS: &[&str] = &["updated_at"];

const MAX_STRING_CHARS: usize = 50;

/// One changed top-level field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange<'a> {
    Added(&'a str, &'a Value),
    Removed(&'a str, &'a Value),
    Modified(&'a str, &'a Value, &'a Value),
}

impl fmt::Display for FieldChange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(key, v) => write!(f, "{}: (added) -> {}", key, format_value(v)),
            Self::Removed(key, v) => write!(f, "{}: {} -> (removed)", key, format_value(v)),
            Self::Modified(key, old, new) => {
                write!(f, "{}: {} -> {}", key, format_value(old), format_value(new))
            }
        }
    }
}

/// Changed top-level fields of two JSON objects, in `before`'s key order
/// followed by added keys
pub fn field_changes<'a>(before: &'a Map<String, Value>, after: &'a Map<String, Value>) -> Vec<FieldChange<'a>> {
    let tracked = |key: &String| !BOOKKEEPING_FIELDS.contains(&key.as_str());

    let changed_or_removed = before.iter().filter(|(k, _)| tracked(*k)).filter_map(|(key, old)| {
        match after.get(key) {
            Some(new) if new != old => Some(FieldChange::Modified(key, old, new)),
            Some(_) => None,
            None => Some(FieldChange::Removed(key, old)),
        }
    });

    let added = after
        .iter()
        .filter(|(k, _)| tracked(*k) && !before.contains_key(*k))
        .map(|(key, new)| FieldChange::Added(key, new));

    changed_or_removed.chain(added).collect()
}

/// Summarize the top-level field changes between two JSON values
///
/// Returns `None` when nothing but bookkeeping fields changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let summary = match (before, after) {
        (Value::Object(b), Value::Object(a)) => field_changes(b, a)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        _ if before != after => format!("{} -> {}", format_value(before), format_value(after)),
        _ => String::new(),
    };

    (!summary.is_empty()).then_some(summary)
}

/// Format a JSON value for a one-line summary
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
            format!("\"{}...\"", s.chars().take(MAX_STRING_CHARS - 3).collect::<String>())
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_change() {
        let before = json!({"category": "Food", "amount": 1000});
        let after = json!({"category": "Food", "amount": 1500});

        assert_eq!(generate_diff(&before, &after).unwrap(), "amount: 1000 -> 1500");
    }

    #[test]
    fn test_updated_at_alone_is_no_change() {
        let before = json!({"amount": 100, "updated_at": "2025-03-01T10:00:00Z"});
        let after = json!({"amount": 100, "updated_at": "2025-03-02T10:00:00Z"});

        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_updated_at_is_hidden_next_to_real_changes() {
        let before = json!({"description": "Lunch", "updated_at": "a"});
        let after = json!({"description": "Team lunch", "updated_at": "b"});

        assert_eq!(
            generate_diff(&before, &after).unwrap(),
            "description: \"Lunch\" -> \"Team lunch\""
        );
    }

    #[test]
    fn test_receipt_added_and_removed() {
        let without = json!({"category": "Food"});
        let with = json!({"category": "Food", "receipt_url": "https://r.example/1"});

        assert_eq!(
            generate_diff(&without, &with).unwrap(),
            "receipt_url: (added) -> \"https://r.example/1\""
        );
        assert_eq!(
            generate_diff(&with, &without).unwrap(),
            "receipt_url: \"https://r.example/1\" -> (removed)"
        );
    }

    #[test]
    fn test_nested_and_array_values_are_summarized() {
        let before = json!({"preferences": {"currency": "USD"}, "custom": ["Pets"]});
        let after = json!({"preferences": {"currency": "EUR"}, "custom": ["Pets", "Gifts"]});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("preferences: {1 fields} -> {1 fields}"));
        assert!(diff.contains("custom: [1 items] -> [2 items]"));
    }

    #[test]
    fn test_field_changes_variants() {
        let before = json!({"name": "Al", "theme": "dark"});
        let after = json!({"name": "Alex", "currency": "EUR"});
        let (Value::Object(b), Value::Object(a)) = (&before, &after) else {
            unreachable!()
        };

        let changes = field_changes(b, a);
        assert_eq!(changes.len(), 3);
        assert!(changes.contains(&FieldChange::Removed("theme", &json!("dark"))));
        assert!(changes.contains(&FieldChange::Added("currency", &json!("EUR"))));
    }

    #[test]
    fn test_long_description_truncates_on_char_boundary() {
        let before = json!({"description": "€".repeat(60)});
        let after = json!({"description": ""});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains(&format!("\"{}...\"", "€".repeat(47))));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!("test")), "\"test\"");
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(generate_diff(&json!(1), &json!(2)).unwrap(), "1 -> 2");
        assert!(generate_diff(&json!("x"), &json!("x")).is_none());
    }
}

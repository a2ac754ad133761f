//! Inheritance of config-level settings into pages.
//!
//! - `styles` / `scripts`: config entries first, page entries appended,
//!   duplicates dropped keeping the first occurrence
//! - `imports` / `theme`: shallow merge, the override wins on key collision

use std::collections::HashSet;

use serde_json::{Map, Value};

/// Concatenate two lists, keeping only the first occurrence of each entry.
#[must_use]
pub fn merge_unique(base: &[String], overrides: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    base.iter()
        .chain(overrides)
        .filter(|entry| seen.insert(entry.as_str()))
        .cloned()
        .collect()
}

/// Shallow-merge two maps.
///
/// An overridden key keeps its position from `base`; new keys are appended
/// in `overrides` order.
#[must_use]
pub fn merge_map(
    base: Option<&Map<String, Value>>,
    overrides: Option<&Map<String, Value>>,
) -> Map<String, Value> {
    let mut merged = base.cloned().unwrap_or_default();
    for (key, value) in overrides.into_iter().flatten() {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|&s| s.to_owned()).collect()
    }

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_merge_unique_config_first() {
        let merged = merge_unique(&strings(&["a"]), &strings(&["a", "b"]));

        assert_eq!(merged, strings(&["a", "b"]));
    }

    #[test]
    fn test_merge_unique_drops_duplicates_within_a_list() {
        let merged = merge_unique(&strings(&["a", "b", "a"]), &strings(&["c", "b", "c"]));

        assert_eq!(merged, strings(&["a", "b", "c"]));
    }

    #[test]
    fn test_merge_unique_empty() {
        assert!(merge_unique(&[], &[]).is_empty());
    }

    #[test]
    fn test_merge_map_override_wins() {
        let base = map(json!({"React": "react", "Button": "./button"}));
        let overrides = map(json!({"Button": "./fancy-button", "Card": "./card"}));

        let merged = merge_map(Some(&base), Some(&overrides));

        assert_eq!(
            merged,
            map(json!({
                "React": "react",
                "Button": "./fancy-button",
                "Card": "./card",
            }))
        );
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, ["React", "Button", "Card"]);
    }

    #[test]
    fn test_merge_map_missing_sides() {
        let only = map(json!({"a": 1}));

        assert_eq!(merge_map(None, Some(&only)), only);
        assert_eq!(merge_map(Some(&only), None), only);
        assert!(merge_map(None, None).is_empty());
    }
}

//! Theme defaults.

use serde_json::{Map, Value};

use crate::merge::merge_map;

const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("background", "#F9F9F9"),
    ("textColor", "#333333"),
    ("codeColor", "#00263E"),
    ("linkColor", "#FF5555"),
    ("lightColor", "#D6D6D6"),
    ("pageHeadingBackground", "#003B5C"),
    ("pageHeadingTextColor", "#FFFFFF"),
    ("navBarBackground", "#F2F2F2"),
    ("navBarTextColor", "#003B5C"),
    ("brandColor", "#003B5C"),
    ("sidebarColor", "#FFFFFF"),
    ("sidebarColorActive", "#EBEBEB"),
    ("sidebarColorText", "#003B5C"),
    ("sidebarColorTextActive", "#FF5555"),
    ("sidebarColorLine", "#EBEBEB"),
    ("sidebarColorHeading", "#003B5C"),
    ("bgLight", "#F2F2F2"),
    ("bgDark", "#333333"),
];

const DEFAULT_FONTS: &[(&str, &str)] = &[
    ("fontFamily", "'Roboto', sans-serif"),
    ("fontHeading", "'Roboto', sans-serif"),
    ("fontMono", "'Roboto Mono', monospace"),
];

/// Theme used when the author overrides nothing.
#[must_use]
pub fn default_theme() -> Map<String, Value> {
    let mut theme: Map<String, Value> = DEFAULT_COLORS
        .iter()
        .chain(DEFAULT_FONTS)
        .map(|&(key, value)| (key.to_owned(), Value::from(value)))
        .collect();

    // Pixels
    theme.insert("pageHeadingHeight".to_owned(), Value::from(200));
    theme.insert("baseFontSize".to_owned(), Value::from(16));
    // Modular scale ratio
    theme.insert("msRatio".to_owned(), Value::from(1.2));

    theme
}

/// Default theme with the author's overrides applied on top.
#[must_use]
pub fn merge_theme(overrides: Option<&Map<String, Value>>) -> Map<String, Value> {
    merge_map(Some(&default_theme()), overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_theme_without_overrides_is_default() {
        assert_eq!(merge_theme(None), default_theme());
    }

    #[test]
    fn test_merge_theme_author_wins() {
        let overrides = match json!({"brandColor": "#000000", "logo": "logo.svg"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let theme = merge_theme(Some(&overrides));

        assert_eq!(theme["brandColor"], json!("#000000"));
        assert_eq!(theme["logo"], json!("logo.svg"));
        assert_eq!(theme["textColor"], json!("#333333"));
        assert_eq!(theme.len(), default_theme().len() + 1);
    }

    #[test]
    fn test_default_theme_numeric_values() {
        let theme = default_theme();

        assert_eq!(theme["baseFontSize"], json!(16));
        assert_eq!(theme["msRatio"], json!(1.2));
    }
}

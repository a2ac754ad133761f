//! Author-supplied page configuration.
//!
//! [`RawConfig`] and [`RawPage`] mirror what a site maintainer writes. Fields
//! whose type is checked by diagnostics (`src`, `component`) are kept as
//! untyped [`Value`]s so that a wrongly-typed entry still parses and can be
//! reported instead of rejected. The same goes for `path`, `name` and
//! `title`, since YAML reads `path: 2024` as a number. Keys the compiler does
//! not know are kept in `extra` and passed through to the output untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One authored page node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage {
    /// Route segment, relative to the configured base path.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub path: Option<Value>,
    /// Deprecated spelling of `path`.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Value>,
    /// Display title.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Value>,
    /// Content source. Expected to be a string.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub src: Option<Value>,
    /// Reference to a renderable component symbol.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub component: Option<Value>,
    /// Nested child pages. `Some(None)` when authored as `null`.
    #[serde(
        default,
        deserialize_with = "deserialize_present_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub pages: Option<Option<Vec<RawPage>>>,
    /// Page-level stylesheets, appended after the config-level ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<String>>,
    /// Page-level scripts, appended after the config-level ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<Vec<String>>,
    /// Page-level imports, overriding config-level entries with the same key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imports: Option<Map<String, Value>>,
    /// Any other authored keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What an authored page renders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PageKind<'a> {
    /// A page rendered from a content source.
    Source(&'a Value),
    /// A page rendered by a component.
    Component(&'a Value),
    /// A pure grouping node.
    Container(&'a [RawPage]),
}

/// Why a page does not have exactly one of `src`, `component` or `pages`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShapeViolation {
    /// None of the three properties is set.
    #[error("none of them is set")]
    Empty,
    /// More than one of the three properties is set.
    #[error("found {}", describe_conflict(*.src, *.component, *.pages))]
    Conflict {
        src: bool,
        component: bool,
        pages: bool,
    },
}

fn describe_conflict(src: bool, component: bool, pages: bool) -> String {
    [(src, "`src`"), (component, "`component`"), (pages, "`pages`")]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect::<Vec<_>>()
        .join(" and ")
}

impl RawPage {
    /// Classify the page by which of `src`, `component` and `pages` it carries.
    ///
    /// A property counts as present even when its value is `null`.
    pub fn kind(&self) -> Result<PageKind<'_>, ShapeViolation> {
        let pages = self
            .pages
            .as_ref()
            .map(|pages| pages.as_deref().unwrap_or_default());
        match (&self.src, &self.component, pages) {
            (Some(src), None, None) => Ok(PageKind::Source(src)),
            (None, Some(component), None) => Ok(PageKind::Component(component)),
            (None, None, Some(pages)) => Ok(PageKind::Container(pages)),
            (None, None, None) => Err(ShapeViolation::Empty),
            (src, component, pages) => Err(ShapeViolation::Conflict {
                src: src.is_some(),
                component: component.is_some(),
                pages: pages.is_some(),
            }),
        }
    }

    /// Authored child pages, if any.
    #[must_use]
    pub fn children(&self) -> Option<&[RawPage]> {
        self.pages.as_ref().and_then(Option::as_deref)
    }

    /// Route segment used to build the page path.
    ///
    /// Uses `path` unless it is unset, `null`, empty, `false` or zero, then
    /// `name`, then the empty segment. Numbers and booleans are written out.
    #[must_use]
    pub fn route_segment(&self) -> String {
        let segment = if is_set(self.path.as_ref()) {
            self.path.as_ref()
        } else {
            self.name.as_ref()
        };
        segment.and_then(scalar_text).unwrap_or_default()
    }

    /// Short human-readable label identifying the page in diagnostics.
    #[must_use]
    pub fn label(&self) -> String {
        let text = |value: &Option<Value>| {
            value
                .as_ref()
                .and_then(scalar_text)
                .filter(|text| !text.is_empty())
        };
        if let Some(path) = text(&self.path) {
            return format!("path `{path}`");
        }
        if let Some(name) = text(&self.name) {
            return format!("name `{name}`");
        }
        match text(&self.title) {
            Some(title) => format!("title `{title}`"),
            None => "unnamed page".to_owned(),
        }
    }
}

/// Text of a scalar value: strings as-is, numbers and booleans written out.
///
/// `null`, arrays and objects have no text.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Root page configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    /// Site title, used as `superTitle` of top-level pages.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Value>,
    /// Prefix of every page path (default `/`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// Stylesheets shared by every page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<String>>,
    /// Scripts shared by every page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<Vec<String>>,
    /// Imports shared by every page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imports: Option<Map<String, Value>>,
    /// Theme overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Map<String, Value>>,
    /// Specimen registry, passed through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specimens: Option<Map<String, Value>>,
    /// Top-level pages.
    pub pages: Vec<RawPage>,
    /// Any other authored keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawConfig {
    /// Base path, falling back to `/` when unset or empty.
    #[must_use]
    pub fn base_path(&self) -> &str {
        self.base_path
            .as_deref()
            .filter(|base| !base.is_empty())
            .unwrap_or("/")
    }
}

/// Deserialize a field that counts as present even when its value is `null`.
///
/// Combined with `#[serde(default)]`, an absent key stays `None` while an
/// explicit `null` becomes `Some(Value::Null)`.
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Deserialize an optional field whose explicit `null` must stay distinguishable.
///
/// An absent key stays `None`, `null` becomes `Some(None)`.
pub(crate) fn deserialize_present_option<'de, D, T>(
    deserializer: D,
) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Whether a `src`/`component`/`path` value is set to something usable.
///
/// Empty strings, `false`, zero and `null` do not.
pub(crate) fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

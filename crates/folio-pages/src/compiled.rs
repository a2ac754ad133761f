//! Compiled configuration: the page tree, the route list and passthrough fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::component::ComponentRegistry;
use crate::diagnostic::{DiagnosticSink, TracingSink};
use crate::flatten::{FlatPage, flatten};
use crate::raw::{RawConfig, deserialize_present};
use crate::theme::merge_theme;
use crate::tree::{CompiledPage, TreeCompiler};

/// Key marking a configuration value as already compiled.
pub const COMPILED_MARKER: &str = "__folioCompiled";

/// Output of [`compile`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledConfig {
    /// Completion marker, always `true` for compiler output.
    #[serde(rename = "__folioCompiled")]
    pub compiled: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imports: Option<Map<String, Value>>,
    /// Default theme merged with the author's overrides.
    pub theme: Map<String, Value>,
    pub specimens: Map<String, Value>,
    /// Routable pages in route order.
    pub pages: Vec<FlatPage>,
    /// Hierarchical page tree for navigation.
    pub page_tree: Vec<CompiledPage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Error returned when a configuration value cannot be compiled.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The root configuration has no `pages` array.
    #[error("Page configuration must contain a `pages` array")]
    MissingPages,
    /// The value does not have the shape of a page configuration.
    #[error("Invalid page configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Compile a configuration, logging diagnostics through `tracing`.
#[must_use]
pub fn compile(raw: &RawConfig, components: &dyn ComponentRegistry) -> CompiledConfig {
    compile_with_sink(raw, components, &mut TracingSink)
}

/// Compile a configuration, reporting diagnostics to `sink`.
#[must_use]
pub fn compile_with_sink(
    raw: &RawConfig,
    components: &dyn ComponentRegistry,
    sink: &mut dyn DiagnosticSink,
) -> CompiledConfig {
    let page_tree = TreeCompiler::new(raw, components, sink).compile();
    let pages = flatten(&page_tree);

    tracing::debug!(
        top_level = page_tree.len(),
        routes = pages.len(),
        "Compiled page configuration"
    );

    CompiledConfig {
        compiled: true,
        title: raw.title.clone(),
        base_path: raw.base_path.clone(),
        styles: raw.styles.clone(),
        scripts: raw.scripts.clone(),
        imports: raw.imports.clone(),
        theme: merge_theme(raw.theme.as_ref()),
        specimens: raw.specimens.clone().unwrap_or_default(),
        pages,
        page_tree,
        extra: raw.extra.clone(),
    }
}

/// Whether `value` carries the completion marker.
#[must_use]
pub fn is_compiled(value: &Value) -> bool {
    value
        .get(COMPILED_MARKER)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Compile an untyped configuration value unless it is already compiled.
///
/// Already-compiled values are returned as they are; compiling them again
/// would renumber every page.
///
/// # Errors
///
/// Returns [`CompileError::MissingPages`] if an uncompiled value has no
/// `pages` array, or [`CompileError::Invalid`] if it cannot be read as a
/// configuration.
pub fn configure(
    value: Value,
    components: &dyn ComponentRegistry,
) -> Result<CompiledConfig, CompileError> {
    configure_with_sink(value, components, &mut TracingSink)
}

/// [`configure`] reporting diagnostics to `sink`.
///
/// # Errors
///
/// See [`configure`].
pub fn configure_with_sink(
    value: Value,
    components: &dyn ComponentRegistry,
    sink: &mut dyn DiagnosticSink,
) -> Result<CompiledConfig, CompileError> {
    if is_compiled(&value) {
        tracing::debug!("Configuration already compiled, skipping");
        return Ok(serde_json::from_value(value)?);
    }

    if !value.get("pages").is_some_and(Value::is_array) {
        return Err(CompileError::MissingPages);
    }

    let raw: RawConfig = serde_json::from_value(value)?;
    Ok(compile_with_sink(&raw, components, sink))
}

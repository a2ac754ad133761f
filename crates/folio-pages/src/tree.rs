//! Page tree compilation.
//!
//! Walks the authored pages depth-first, pre-order. Each page is validated,
//! numbered, given an absolute path and inherits the config-level styles,
//! scripts and imports. Children are compiled before the next sibling, so a
//! parent's id is smaller than every id in its subtree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::component::ComponentRegistry;
use crate::diagnostic::{DiagnosticSink, validate_page};
use crate::merge::{merge_map, merge_unique};
use crate::path::normalize_path;
use crate::raw::{RawConfig, RawPage, deserialize_present, is_set};

/// A compiled page tree node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledPage {
    /// Unique within one compilation, assigned in pre-order starting at 1.
    pub id: u64,
    /// Absolute, normalized route path.
    pub path: String,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Value>,
    /// Title of the parent page, or the site title for top-level pages.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub super_title: Option<Value>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Value>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub src: Option<Value>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub component: Option<Value>,
    pub styles: Vec<String>,
    pub scripts: Vec<String>,
    pub imports: Map<String, Value>,
    /// Compiled children; `None` unless the page was authored with `pages`.
    #[serde(default)]
    pub pages: Option<Vec<CompiledPage>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompiledPage {
    /// Whether the page renders something (has `src` or `component`).
    ///
    /// Pages without content are pure containers and get no route.
    #[must_use]
    pub fn has_content(&self) -> bool {
        is_set(self.src.as_ref()) || is_set(self.component.as_ref())
    }

    /// Compiled children, empty for leaf pages.
    #[must_use]
    pub fn children(&self) -> &[CompiledPage] {
        self.pages.as_deref().unwrap_or_default()
    }
}

/// Compiles the page tree of one [`RawConfig`].
///
/// The id counter lives in the compiler, so every compilation numbers its
/// pages independently.
pub struct TreeCompiler<'a> {
    config: &'a RawConfig,
    components: &'a dyn ComponentRegistry,
    sink: &'a mut dyn DiagnosticSink,
    last_id: u64,
}

impl<'a> TreeCompiler<'a> {
    /// Create a compiler for `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - Authored configuration
    /// * `components` - Registry used to check `component` references
    /// * `sink` - Receiver of diagnostics
    pub fn new(
        config: &'a RawConfig,
        components: &'a dyn ComponentRegistry,
        sink: &'a mut dyn DiagnosticSink,
    ) -> Self {
        Self {
            config,
            components,
            sink,
            last_id: 0,
        }
    }

    /// Compile every top-level page, consuming the compiler.
    #[must_use]
    pub fn compile(mut self) -> Vec<CompiledPage> {
        let config = self.config;
        self.compile_pages(&config.pages, config.title.as_ref())
    }

    fn compile_pages(
        &mut self,
        pages: &[RawPage],
        super_title: Option<&Value>,
    ) -> Vec<CompiledPage> {
        pages
            .iter()
            .map(|page| self.compile_page(page, super_title))
            .collect()
    }

    fn compile_page(&mut self, page: &RawPage, super_title: Option<&Value>) -> CompiledPage {
        validate_page(page, self.components, &mut *self.sink);

        self.last_id += 1;
        let id = self.last_id;

        // Children are numbered right after their parent
        let pages = page
            .children()
            .map(|children| self.compile_pages(children, page.title.as_ref()));

        let config = self.config;
        CompiledPage {
            id,
            path: normalize_path(config.base_path(), &page.route_segment()),
            title: page.title.clone(),
            super_title: super_title.cloned(),
            name: page.name.clone(),
            src: page.src.clone(),
            component: page.component.clone(),
            styles: merge_unique(
                config.styles.as_deref().unwrap_or_default(),
                page.styles.as_deref().unwrap_or_default(),
            ),
            scripts: merge_unique(
                config.scripts.as_deref().unwrap_or_default(),
                page.scripts.as_deref().unwrap_or_default(),
            ),
            imports: merge_map(config.imports.as_ref(), page.imports.as_ref()),
            pages,
            extra: page.extra.clone(),
        }
    }
}

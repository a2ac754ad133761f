//! Page configuration compiler for Folio.
//!
//! This crate turns an authored, hierarchical page configuration into:
//! - a page tree ([`CompiledPage`]) for navigation menus
//! - a flat route list ([`FlatPage`]) for route registration
//!
//! Malformed pages never fail compilation. They produce [`Diagnostic`]s
//! which are handed to a [`DiagnosticSink`] (by default, logged as
//! `tracing` warnings).
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use folio_pages::{AcceptAll, RawConfig, compile};
//!
//! let raw: RawConfig = serde_json::from_value(serde_json::json!({
//!     "title": "Docs",
//!     "pages": [{"path": "intro", "title": "Intro", "src": "intro.md"}]
//! }))?;
//!
//! let compiled = compile(&raw, &AcceptAll);
//! assert_eq!(compiled.pages[0].page.path, "/intro");
//! # Ok(())
//! # }
//! ```

mod compiled;
mod component;
mod diagnostic;
mod flatten;
mod merge;
mod path;
mod raw;
mod theme;
mod tree;

pub use compiled::{
    COMPILED_MARKER, CompileError, CompiledConfig, compile, compile_with_sink, configure,
    configure_with_sink, is_compiled,
};
pub use component::{AcceptAll, ComponentRegistry, ComponentSet, component_name, resolves};
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
pub use flatten::{FlatPage, flatten};
pub use merge::{merge_map, merge_unique};
pub use path::normalize_path;
pub use raw::{PageKind, RawConfig, RawPage, ShapeViolation, scalar_text};
pub use theme::{default_theme, merge_theme};
pub use tree::{CompiledPage, TreeCompiler};

//! Advisory diagnostics for malformed pages.
//!
//! Diagnostics never stop compilation. Each one is handed to a
//! [`DiagnosticSink`] at the moment the offending page is visited, together
//! with a copy of that page.

use std::fmt;

use crate::component::{self, ComponentRegistry};
use crate::raw::{RawPage, ShapeViolation};

/// Kind of authoring problem found on a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticKind {
    /// `name` is set.
    #[error("page property `name` is deprecated, use `path` instead")]
    DeprecatedName,
    /// `title` is missing.
    #[error("page property `title` is missing")]
    MissingTitle,
    /// `src` is set to something other than a string.
    #[error("page property `src` must be a string")]
    InvalidSource,
    /// `component` does not resolve to a registered component.
    #[error("page property `component` must reference a registered component")]
    UnresolvedComponent,
    /// Not exactly one of `src`, `component` or `pages` is set.
    #[error("page must have exactly one of `src`, `component` or `pages` ({0})")]
    InvalidShape(ShapeViolation),
}

impl DiagnosticKind {
    /// Stable identifier for logs and tooling.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::DeprecatedName => "deprecated-name",
            Self::MissingTitle => "missing-title",
            Self::InvalidSource => "invalid-src",
            Self::UnresolvedComponent => "unresolved-component",
            Self::InvalidShape(_) => "invalid-shape",
        }
    }
}

/// A diagnostic attached to the page that triggered it.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    /// What is wrong.
    pub kind: DiagnosticKind,
    /// The offending page as authored.
    pub page: RawPage,
}

impl Diagnostic {
    #[must_use]
    pub fn new(kind: DiagnosticKind, page: &RawPage) -> Self {
        Self {
            kind,
            page: page.clone(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.kind, self.page.label())
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticSink {
    /// Handle one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Sink that logs each diagnostic as a `tracing` warning.
///
/// The whole offending page is attached as the `node` field.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            code = diagnostic.kind.code(),
            page = %diagnostic.page.label(),
            node = ?diagnostic.page,
            "{}",
            diagnostic.kind
        );
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Check one page and report every problem found on it.
pub(crate) fn validate_page(
    page: &RawPage,
    components: &dyn ComponentRegistry,
    sink: &mut dyn DiagnosticSink,
) {
    if page.name.is_some() {
        sink.report(Diagnostic::new(DiagnosticKind::DeprecatedName, page));
    }
    if page.title.is_none() {
        sink.report(Diagnostic::new(DiagnosticKind::MissingTitle, page));
    }
    if page.src.as_ref().is_some_and(|src| !src.is_string()) {
        sink.report(Diagnostic::new(DiagnosticKind::InvalidSource, page));
    }
    if page
        .component
        .as_ref()
        .is_some_and(|reference| !component::resolves(components, reference))
    {
        sink.report(Diagnostic::new(DiagnosticKind::UnresolvedComponent, page));
    }
    if let Err(violation) = page.kind() {
        sink.report(Diagnostic::new(DiagnosticKind::InvalidShape(violation), page));
    }
}

//! Resolution of page `component` references.
//!
//! The compiler never loads components. It only checks that a reference
//! names a symbol the host has already registered.

use std::collections::HashSet;

use serde_json::Value;

/// Registry of component symbols known to the host.
pub trait ComponentRegistry {
    /// Whether `name` is a registered component.
    fn contains(&self, name: &str) -> bool;
}

/// Fixed set of registered component names.
#[derive(Clone, Debug, Default)]
pub struct ComponentSet {
    names: HashSet<String>,
}

impl ComponentSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component name.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }
}

impl<S: Into<String>> FromIterator<S> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl ComponentRegistry for ComponentSet {
    fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Registry that accepts any non-empty symbol name.
///
/// Used when the host does not declare its components up front.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl ComponentRegistry for AcceptAll {
    fn contains(&self, name: &str) -> bool {
        !name.is_empty()
    }
}

/// Extract the symbol name from a component reference.
///
/// A reference is either the symbol name itself or a module object whose
/// `default` export is the symbol name.
#[must_use]
pub fn component_name(reference: &Value) -> Option<&str> {
    match reference {
        Value::String(name) => Some(name),
        Value::Object(module) => module.get("default").and_then(Value::as_str),
        _ => None,
    }
}

/// Whether a component reference resolves to a registered component.
pub fn resolves(registry: &dyn ComponentRegistry, reference: &Value) -> bool {
    component_name(reference).is_some_and(|name| registry.contains(name))
}

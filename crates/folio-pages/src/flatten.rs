//! Route list derived from the page tree.

use serde::{Deserialize, Serialize};

use crate::tree::CompiledPage;

/// A routable page with its position in the route list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlatPage {
    /// 0-based position among routable pages. Unrelated to the page id.
    pub index: usize,
    #[serde(flatten)]
    pub page: CompiledPage,
}

/// Flatten the first two tiers of the page tree into a route list.
///
/// Each top-level page is followed by its direct children. Grandchildren are
/// not pulled up. Pages without `src` or `component` are dropped and the
/// remaining pages are indexed in order.
#[must_use]
pub fn flatten(tree: &[CompiledPage]) -> Vec<FlatPage> {
    tree.iter()
        .flat_map(|page| std::iter::once(page).chain(page.children()))
        .filter(|page| page.has_content())
        .enumerate()
        .map(|(index, page)| FlatPage {
            index,
            page: page.clone(),
        })
        .collect()
}

//! Route path normalization.

/// Join a page's route segment onto the base path.
///
/// The result always starts with `/`, never contains empty segments and
/// never ends with `/` unless it is the root itself. Every page, however
/// deeply nested, is joined onto the same base path: nesting in the page
/// tree does not nest the URL.
#[must_use]
pub fn normalize_path(base_path: &str, segment: &str) -> String {
    let parts: Vec<&str> = base_path
        .split('/')
        .chain(segment.split('/'))
        .filter(|part| !part.is_empty())
        .collect();

    format!("/{}", parts.join("/"))
}

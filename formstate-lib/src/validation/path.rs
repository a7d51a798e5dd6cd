//! Field path helpers
//!
//! A field path addresses a possibly nested field with dot segments
//! (`address.street`) or bracket segments (`roles[0]`, `person[name]`).
//! Both notations may be mixed within one path.

/// Returns `true` if `path` is a strict descendant of `ancestor`.
///
/// `path` must start with `ancestor` followed directly by `.` or `[`.
/// Plain string prefixes do not count: `first_name` is not a descendant of
/// `first`.
pub fn is_descendant(path: &str, ancestor: &str) -> bool {
    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('['))
}

/// Returns `true` if `path` equals `target` or descends from it.
pub fn is_within(path: &str, target: &str) -> bool {
    path == target || is_descendant(path, target)
}

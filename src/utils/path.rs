//! Slug extraction from request paths.

/// Strips exactly one leading and one trailing `/` from a request path.
///
/// Inner separators are kept, so `/a/b/` yields `a/b` (which the slug
/// pattern then rejects).
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slug_candidate("/promo"), "promo");
/// assert_eq!(slug_candidate("/promo/"), "promo");
/// assert_eq!(slug_candidate("//promo//"), "/promo/");
/// ```
pub fn slug_candidate(path: &str) -> &str {
    let path = path.strip_prefix('/').unwrap_or(path);
    path.strip_suffix('/').unwrap_or(path)
}

/// Returns `true` for the root path `/`.
pub fn is_root(path: &str) -> bool {
    path == "/"
}

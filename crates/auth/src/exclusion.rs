//! Path exclusion matching
//!
//! Decides whether authentication is required for a request path given the
//! configured exclusion patterns. A pattern ending in `*` excludes every path
//! sharing its prefix; any other pattern must match exactly. Missing paths
//! are treated as sensitive.

/// Strip at most one trailing slash; `/api/v1/status/` and `/api/v1/status`
/// are equivalent for exclusion purposes.
fn normalize(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Returns `true` when the path requires authentication.
///
/// Pure function of its inputs; no side effects.
pub fn require_auth(path: Option<&str>, excluded_paths: &[String]) -> bool {
    let Some(path) = path else {
        return true;
    };

    if excluded_paths.is_empty() {
        return true;
    }

    let path = normalize(path);
    for pattern in excluded_paths {
        let excluded = match pattern.strip_suffix('*') {
            // The prefix is the pattern minus the marker, verbatim: "/foo/*"
            // must not reach "/foobar". Only the exact-prefix comparison gets
            // the trailing-slash equivalence.
            Some(prefix) => path.starts_with(prefix) || path == normalize(prefix),
            None => path == normalize(pattern),
        };
        if excluded {
            return false;
        }
    }

    true
}

//! # Route Ordering
//!
//! A total order over routes, used to keep every route listing deterministic.
//! This is presentation order, not HTTP matching precedence.
//!
//! ```text
//! /abc GET  <  /abc POST  <  /def GET  <  /abc/{id} GET  <  /abc/stu DELETE
//! └─ 2 segments ──────────────────────┘  └─ 3 segments ──────────────────┘
//! ```
//!
//! 1. Fewer `/`-separated segments sorts first.
//! 2. At the first differing segment, `{param}` sorts before a literal;
//!    two segments of the same kind compare by their text.
//! 3. Identical paths fall back to [`METHOD_PRECEDENCE`].

use std::cmp::Ordering;

use crate::core::document::Route;

/// Fixed tie-break order for routes sharing a path template.
pub const METHOD_PRECEDENCE: [&str; 9] = [
    "GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "CONNECT", "OPTIONS", "TRACE",
];

/// Position of `method` in [`METHOD_PRECEDENCE`], or `None` for methods outside it.
pub fn method_rank(method: &str) -> Option<usize> {
    METHOD_PRECEDENCE
        .iter()
        .position(|m| m.eq_ignore_ascii_case(method))
}

/// Compare two HTTP methods.
///
/// Unranked methods sort after every ranked one and, among themselves, by
/// their upper-cased name.
pub fn compare_methods(a: &str, b: &str) -> Ordering {
    match (method_rank(a), method_rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_ascii_uppercase().cmp(&b.to_ascii_uppercase()),
    }
}

fn is_param_segment(segment: &str) -> bool {
    segment.starts_with('{')
}

fn compare_segments(a: &str, b: &str) -> Ordering {
    match (is_param_segment(a), is_param_segment(b)) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.cmp(b),
    }
}

/// Compare two path templates, ignoring the method.
pub fn compare_paths(a: &str, b: &str) -> Ordering {
    let a_segments: Vec<&str> = a.split('/').collect();
    let b_segments: Vec<&str> = b.split('/').collect();

    a_segments
        .len()
        .cmp(&b_segments.len())
        .then_with(|| {
            a_segments
                .iter()
                .zip(&b_segments)
                .find(|(x, y)| x != y)
                .map_or(Ordering::Equal, |(x, y)| compare_segments(x, y))
        })
}

/// Full route comparator: path template first, then method.
pub fn compare_routes(a: &Route, b: &Route) -> Ordering {
    compare_paths(&a.path, &b.path).then_with(|| compare_methods(&a.method, &b.method))
}

/// Sort routes in place. The sort is stable, so exact duplicates keep
/// their relative order.
pub fn sort_routes(routes: &mut [Route]) {
    routes.sort_by(compare_routes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::route;

    fn keys(routes: &[Route]) -> Vec<(String, String)> {
        routes
            .iter()
            .map(|r| (r.path.clone(), r.method.clone()))
            .collect()
    }

    fn shuffled_fixture() -> Vec<Route> {
        vec![
            route("/abc", "POST"),
            route("/abc/{xId}/stu", "POST"),
            route("/abc/stu", "DELETE"),
            route("/abc", "DELETE"),
            route("/def/{yId}", "PUT"),
            route("/def", "POST"),
            route("/abc/{xId}/stu/{yId}", "GET"),
            route("/abc", "PUT"),
            route("/abc/{xId}", "GET"),
            route("/abc", "GET"),
            route("/def/{xId}", "POST"),
            route("/abc", "PATCH"),
            route("/abc/xyz/{xId}", "PATCH"),
            route("/def", "GET"),
        ]
    }

    #[test]
    fn test_sort_routes_matches_reference_order() {
        let mut routes = shuffled_fixture();
        sort_routes(&mut routes);

        let expected: Vec<(String, String)> = [
            ("/abc", "GET"),
            ("/abc", "POST"),
            ("/abc", "PUT"),
            ("/abc", "PATCH"),
            ("/abc", "DELETE"),
            ("/def", "GET"),
            ("/def", "POST"),
            ("/abc/{xId}", "GET"),
            ("/abc/stu", "DELETE"),
            ("/def/{xId}", "POST"),
            ("/def/{yId}", "PUT"),
            ("/abc/{xId}/stu", "POST"),
            ("/abc/xyz/{xId}", "PATCH"),
            ("/abc/{xId}/stu/{yId}", "GET"),
        ]
        .iter()
        .map(|(p, m)| (p.to_string(), m.to_string()))
        .collect();

        assert_eq!(keys(&routes), expected);
    }

    #[test]
    fn test_sort_is_deterministic() {
        let mut first = shuffled_fixture();
        let mut second = shuffled_fixture();
        second.reverse();
        sort_routes(&mut first);
        sort_routes(&mut second);
        assert_eq!(keys(&first), keys(&second));

        let snapshot = keys(&first);
        sort_routes(&mut first);
        assert_eq!(keys(&first), snapshot);
    }

    #[test]
    fn test_fewer_segments_first_regardless_of_content() {
        assert_eq!(compare_paths("/zzz", "/aaa/aaa"), Ordering::Less);
        assert_eq!(compare_paths("/{z}", "/a/b"), Ordering::Less);
        assert_eq!(compare_paths("/a/b/c", "/z"), Ordering::Greater);
    }

    #[test]
    fn test_param_segment_before_literal() {
        assert_eq!(compare_paths("/users/{zzz}", "/users/aaa"), Ordering::Less);
        assert_eq!(compare_paths("/users/aaa", "/users/{id}"), Ordering::Greater);
        // decided at the first difference, later segments don't matter
        assert_eq!(compare_paths("/a/{x}/zzz", "/a/b/aaa"), Ordering::Less);
    }

    #[test]
    fn test_same_kind_segments_compare_by_text() {
        assert_eq!(compare_paths("/a/{xId}", "/a/{yId}"), Ordering::Less);
        assert_eq!(compare_paths("/a/stu", "/a/abc"), Ordering::Greater);
    }

    #[test]
    fn test_method_tie_break_order() {
        for pair in METHOD_PRECEDENCE.windows(2) {
            let a = route("/pets", pair[0]);
            let b = route("/pets", pair[1]);
            assert_eq!(compare_routes(&a, &b), Ordering::Less, "{} < {}", pair[0], pair[1]);
            assert_eq!(compare_routes(&b, &a), Ordering::Greater);
        }
    }

    #[test]
    fn test_unranked_methods_sort_last_by_name() {
        assert_eq!(method_rank("QUERY"), None);
        assert_eq!(compare_methods("TRACE", "QUERY"), Ordering::Less);
        assert_eq!(compare_methods("QUERY", "PROPFIND"), Ordering::Greater);
        assert_eq!(compare_methods("query", "QUERY"), Ordering::Equal);
    }

    #[test]
    fn test_method_rank_is_case_insensitive() {
        assert_eq!(method_rank("get"), Some(0));
        assert_eq!(method_rank("Trace"), Some(8));
    }
}

//! Textual rewrite suggestions.

use std::sync::LazyLock;

use regex::Regex;

static SELECT_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SELECT\s+\*").expect("select star pattern"));

static LIMIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)LIMIT\s+\d+").expect("limit pattern"));

static IMPLICIT_JOIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)WHERE\s+.*=.*AND.*=.*").expect("implicit join pattern"));

static DISTINCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)DISTINCT").expect("distinct pattern"));

static GROUP_BY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)GROUP\s+BY").expect("group by pattern"));

static NOT_IN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)NOT\s+IN").expect("not in pattern"));

/// Returns rewrite hints for the query, one per matching heuristic.
///
/// Each test is independent and purely textual; the trigger conditions have
/// known false edges (a `NOT IN` over a literal list still fires, a WHERE
/// with two unrelated equalities reads as a comma join) and those edges are
/// part of the contract.
pub fn suggest_rewrites(query: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    let upper = query.to_uppercase();

    if SELECT_STAR_RE.is_match(query) {
        suggestions.push("Replace SELECT * with specific column names".to_string());
    }

    if !LIMIT_RE.is_match(query) && !upper.contains("INSERT") {
        suggestions.push("Add LIMIT clause to prevent large result sets".to_string());
    }

    if IMPLICIT_JOIN_RE.is_match(query) && !upper.contains("JOIN") {
        suggestions.push(
            "Consider using explicit JOIN syntax instead of comma-separated tables".to_string(),
        );
    }

    if DISTINCT_RE.is_match(query) && GROUP_BY_RE.is_match(query) {
        suggestions.push("DISTINCT is redundant with GROUP BY - consider removing one".to_string());
    }

    if NOT_IN_RE.is_match(query) {
        suggestions
            .push("Consider using NOT EXISTS instead of NOT IN for better performance".to_string());
    }

    suggestions
}

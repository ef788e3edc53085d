//! Complexity scoring for raw SQL text.

use std::sync::LazyLock;

use regex::Regex;

static JOIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bJOIN\b").expect("join pattern"));

static SUBQUERY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bSELECT\b.*\bFROM\b.*\(.*?\bSELECT\b").expect("subquery pattern")
});

static AGGREGATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(COUNT|SUM|AVG|MAX|MIN|GROUP BY)\b").expect("aggregate pattern")
});

static CONNECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bAND\b|\bOR\b").expect("connective pattern"));

/// Scores a query's syntactic complexity on a 0-100 scale.
///
/// JOINs weigh 10, nested `SELECT..FROM..(..SELECT` shapes 15, aggregate
/// keywords 8, boolean connectives 3, and a wildcard anywhere in the text
/// adds a flat 10. The sum is clamped to 100; empty text scores 0.
pub fn complexity_score(query: &str) -> u8 {
    let mut score = JOIN_RE.find_iter(query).count() * 10;
    score += SUBQUERY_RE.find_iter(query).count() * 15;
    score += AGGREGATE_RE.find_iter(query).count() * 8;
    if query.contains('*') {
        score += 10;
    }
    score += CONNECTIVE_RE.find_iter(query).count() * 3;
    score.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_scores_zero() {
        assert_eq!(complexity_score(""), 0);
    }

    #[test]
    fn three_joins_score_thirty() {
        let query =
            "SELECT a.x FROM a JOIN b ON a.id = b.id JOIN c ON b.id = c.id JOIN d ON c.id = d.id";
        assert_eq!(complexity_score(query), 30);
    }

    #[test]
    fn ten_joins_clamp_to_one_hundred() {
        let query = "JOIN ".repeat(10);
        assert_eq!(complexity_score(&query), 100);
        let query = "JOIN ".repeat(14);
        assert_eq!(complexity_score(&query), 100);
    }

    #[test]
    fn wildcard_adds_flat_ten() {
        assert_eq!(complexity_score("SELECT * FROM users"), 10);
    }

    #[test]
    fn aggregates_and_connectives_weighted() {
        let query = "SELECT COUNT(x) FROM t WHERE a = 1 AND b = 2 OR c = 3";
        assert_eq!(complexity_score(query), 8 + 3 + 3);
    }

    #[test]
    fn nested_select_counts_as_subquery() {
        let query = "SELECT name FROM users WHERE id IN (SELECT user_id FROM orders)";
        assert_eq!(complexity_score(query), 15);
    }

    #[test]
    fn keywords_match_case_insensitively() {
        assert_eq!(complexity_score("select x from a join b on a.y"), 10);
    }
}

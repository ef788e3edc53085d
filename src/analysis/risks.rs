//! Execution-plan risk flags.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_WILDCARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)WHERE\s+\w+\s+LIKE\s+['"]%"#).expect("leading wildcard pattern")
});

static FUNCTION_ON_COLUMN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(LOWER|UPPER|SUBSTRING|DATE|TRIM)\s*\(\s*(\w+)")
        .expect("function on column pattern")
});

static IMPLICIT_CAST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\w+\s*=\s*['"]\d+['"]"#).expect("implicit cast pattern")
});

/// Flags execution-plan risks visible in the query text.
///
/// A leading-wildcard LIKE reads as a full-scan risk, a scalar function
/// wrapped around an identifier reads as index-defeating (one message per
/// match, naming function and column), and a quoted numeric literal in an
/// equality reads as an implicit-conversion risk. Whether the named column
/// is actually indexed is never verified.
pub fn analyze_execution_risks(query: &str) -> Vec<String> {
    let mut risks = Vec::new();

    if LEADING_WILDCARD_RE.is_match(query) {
        risks.push("Leading wildcard LIKE pattern will cause full table scan".to_string());
    }

    for caps in FUNCTION_ON_COLUMN_RE.captures_iter(query) {
        let func = &caps[1];
        let col = &caps[2];
        risks.push(format!("Function {func}() on column {col} prevents index usage"));
    }

    if IMPLICIT_CAST_RE.is_match(query) {
        risks.push("Implicit type conversion may prevent index usage".to_string());
    }

    risks
}

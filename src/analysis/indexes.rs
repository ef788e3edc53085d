//! Missing-index detection from WHERE and ORDER BY clauses.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static WHERE_CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)WHERE\s+(.+?)(?:ORDER|GROUP|LIMIT|$)").expect("where clause pattern")
});

static EQUALITY_COLUMN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*=\s*").expect("equality column pattern"));

static ORDER_BY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)ORDER\s+BY\s+(.+?)(?:LIMIT|$)").expect("order by pattern")
});

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("token pattern"));

/// Emits one free-text hint per column that looks like an index candidate.
///
/// Equality-compared columns are pulled from each WHERE clause (everything up
/// to ORDER/GROUP/LIMIT or end of text), skipping `id`/`ID` and names with a
/// leading underscore. The first two ORDER BY tokens follow, minus bare
/// `ASC`/`DESC`. Discovery order is preserved and duplicates are kept.
///
/// The schema hint is accepted for forward compatibility and never consulted.
pub fn detect_missing_indexes(
    query: &str,
    _schema_info: Option<&HashMap<String, Value>>,
) -> Vec<String> {
    let mut hints = Vec::new();

    for caps in WHERE_CLAUSE_RE.captures_iter(query) {
        let clause = &caps[1];
        for col_caps in EQUALITY_COLUMN_RE.captures_iter(clause) {
            let col = &col_caps[1];
            if col != "id" && col != "ID" && !col.starts_with('_') {
                hints.push(format!("Consider index on column: {col}"));
            }
        }
    }

    for caps in ORDER_BY_RE.captures_iter(query) {
        let clause = &caps[1];
        for token in TOKEN_RE.find_iter(clause).take(2) {
            let col = token.as_str();
            if col != "ASC" && col != "DESC" {
                hints.push(format!("Consider index for ORDER BY: {col}"));
            }
        }
    }

    hints
}

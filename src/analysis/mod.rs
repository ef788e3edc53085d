//! Pattern-matching heuristics over raw SQL text and the report assembly
//! shared by the HTTP handlers and the one-shot CLI.
//!
//! Every scan here is a pure, bounded-time pass of compiled regular
//! expressions over the input string. No SQL is parsed and no schema or
//! statistics are consulted; the advice strings are fixed and only scale
//! with match counts.

mod complexity;
mod indexes;
mod rewrites;
mod risks;

pub use complexity::complexity_score;
pub use indexes::detect_missing_indexes;
pub use rewrites::suggest_rewrites;
pub use risks::analyze_execution_risks;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::Result;
use crate::model::{
    AnalysisRequest, AnalysisResult, IndexRecommendation, PerformanceMetrics, Priority,
};

static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)FROM\s+(\w+)|JOIN\s+(\w+)").expect("table pattern"));

static WHERE_COLUMN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)WHERE\s+(\w+)\s*=").expect("where column pattern"));

/// RFC 3339 timestamp used to stamp generated reports.
pub fn current_timestamp() -> Result<String> {
    Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}

/// Runs every heuristic against the request and assembles the full report.
///
/// `optimized_query` is always a verbatim copy of the input; the service
/// advises, it does not rewrite.
pub fn analyze(request: &AnalysisRequest) -> Result<AnalysisResult> {
    let query = &request.query;

    let complexity = complexity_score(query);
    let missing_indexes = detect_missing_indexes(query, request.schema_info.as_ref());
    let rewrite_suggestions = suggest_rewrites(query);
    let execution_risks = analyze_execution_risks(query);

    let upper = query.to_uppercase();
    let mut improvements = Vec::new();
    if upper.contains("SELECT *") {
        improvements.push("Select specific columns instead of *".to_string());
    }
    if !upper.contains("LIMIT") {
        improvements.push("Add LIMIT clause to control result set size".to_string());
    }
    improvements.extend(missing_indexes.iter().take(3).cloned());

    let estimated_improvement =
        (30 + improvements.len() * 10 + missing_indexes.len() * 5).min(95) as u8;

    Ok(AnalysisResult {
        original_query: query.clone(),
        optimized_query: query.clone(),
        complexity_score: complexity,
        improvements,
        issues: execution_risks,
        estimated_improvement,
        index_recommendations: missing_indexes.iter().take(5).cloned().collect(),
        rewrite_suggestions,
        analysis_timestamp: current_timestamp()?,
    })
}

/// Builds one B-tree recommendation per distinct table referenced by a
/// FROM or JOIN clause, fed by the equality columns found after WHERE.
///
/// Tables form an unordered set, so the output order is unspecified. No
/// recommendations are produced when no WHERE column was found.
pub fn recommend_indexes(query: &str) -> Vec<IndexRecommendation> {
    let tables: HashSet<String> = TABLE_RE
        .captures_iter(query)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect();

    let where_cols: Vec<String> = WHERE_COLUMN_RE
        .captures_iter(query)
        .map(|caps| caps[1].to_string())
        .collect();

    let mut recommendations = Vec::new();
    if where_cols.is_empty() {
        return recommendations;
    }

    let estimated_improvement = (20 + where_cols.len() * 10).min(80) as u8;
    let priority = if where_cols.len() > 1 {
        Priority::High
    } else {
        Priority::Medium
    };

    for table in tables {
        recommendations.push(IndexRecommendation {
            table_name: table,
            column_names: where_cols.iter().take(2).cloned().collect(),
            index_type: "B-tree",
            reason: "Frequently used in WHERE clauses",
            estimated_improvement,
            priority,
        });
    }

    recommendations
}

/// Derives the cost sketch for a query from the same heuristics.
pub fn estimate_performance(query: &str) -> PerformanceMetrics {
    let complexity = complexity_score(query);
    let missing_indexes = detect_missing_indexes(query, None);
    let risks = analyze_execution_risks(query);
    let suggestions = suggest_rewrites(query);

    let estimated_cost = f64::from(complexity) * 1.5 + missing_indexes.len() as f64 * 10.0;
    let full_table_scan_risk = risks
        .iter()
        .any(|risk| risk.to_lowercase().contains("full table scan"));
    let stripped = missing_indexes
        .iter()
        .map(|hint| match hint.rsplit_once(':') {
            Some((_, tail)) => tail.trim().to_string(),
            None => hint.trim().to_string(),
        })
        .collect();

    PerformanceMetrics {
        query_complexity: complexity,
        estimated_cost,
        full_table_scan_risk,
        missing_indexes: stripped,
        suggested_optimizations: suggestions,
    }
}

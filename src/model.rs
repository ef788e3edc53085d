//! Wire-level request and response types shared by the HTTP endpoints and
//! the one-shot CLI.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_database_type() -> String {
    "postgresql".to_string()
}

/// Inbound analysis request accepted by every POST endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    /// Raw SQL text to inspect.
    pub query: String,
    /// Target engine hint; recorded but not consulted by any heuristic.
    #[serde(default = "default_database_type")]
    pub database_type: String,
    /// Optional schema hint. Accepted for forward compatibility only; no
    /// heuristic consults it.
    #[serde(default)]
    pub schema_info: Option<HashMap<String, Value>>,
}

/// Full advice report returned by `POST /analyze-query`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// The query exactly as submitted.
    pub original_query: String,
    /// Always identical to the input; no rewriting is performed.
    pub optimized_query: String,
    /// Syntactic complexity on a 0-100 scale.
    pub complexity_score: u8,
    /// Combined improvement hints (projection, LIMIT, top index hints).
    pub improvements: Vec<String>,
    /// Execution-plan risk strings.
    pub issues: Vec<String>,
    /// Advisory improvement percentage, 30-95.
    pub estimated_improvement: u8,
    /// Missing-index hints, capped at five.
    pub index_recommendations: Vec<String>,
    /// Textual rewrite suggestions.
    pub rewrite_suggestions: Vec<String>,
    /// RFC 3339 generation time.
    pub analysis_timestamp: String,
}

/// Advisory priority attached to an index recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    /// More than one equality column fed the recommendation.
    High,
    /// A single equality column fed the recommendation.
    Medium,
}

/// A single recommendation returned by `POST /recommend-indexes`.
#[derive(Debug, Clone, Serialize)]
pub struct IndexRecommendation {
    /// Table the index would be created on.
    pub table_name: String,
    /// Equality-compared columns, capped at two.
    pub column_names: Vec<String>,
    /// Always "B-tree".
    pub index_type: &'static str,
    /// Fixed advisory reason.
    pub reason: &'static str,
    /// Advisory improvement percentage, capped at 80.
    pub estimated_improvement: u8,
    /// High when more than one WHERE column was found, else Medium.
    pub priority: Priority,
}

/// Cost sketch returned by `POST /estimate-performance`.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetrics {
    /// Syntactic complexity on a 0-100 scale.
    pub query_complexity: u8,
    /// `complexity * 1.5 + 10` per missing index; not tied to real statistics.
    pub estimated_cost: f64,
    /// True when any risk string mentions a full table scan.
    pub full_table_scan_risk: bool,
    /// Missing-index column names with their leading labels stripped.
    pub missing_indexes: Vec<String>,
    /// Textual rewrite suggestions.
    pub suggested_optimizations: Vec<String>,
}

//! Library-level error types.

use thiserror::Error;

/// Convenience alias for analysis results.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors produced while assembling an advice report.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Formatting the response timestamp failed.
    #[error("timestamp formatting failed: {0}")]
    Timestamp(#[from] time::error::Format),
}

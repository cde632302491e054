//! Error handling for corpus comparison.

pub mod util;

use crate::models::GroupLabel;
use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors raised while loading or analysing the two corpora
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// An input dataset could not be loaded; the run aborts
    #[error("Source unavailable: {source_name}: {reason}")]
    SourceUnavailable {
        /// Path or name of the source that failed
        source_name: String,
        /// Why it failed
        reason: String,
    },

    /// A statistic was requested for a field absent from the dataset schema.
    /// This is a caller contract violation, not a data-quality problem.
    #[error("Schema error: field '{field}' is not present in the {group} dataset")]
    SchemaError {
        /// Field that was requested
        field: String,
        /// Group whose schema lacks the field
        group: GroupLabel,
    },

    /// A numeric aggregate was requested over zero eligible rows
    #[error("Undefined statistic: {0}")]
    UndefinedStatistic(String),

    /// A statistic over an absent field was forced into a hard value
    #[error("Statistic not applicable: {0}")]
    NotApplicable(String),

    /// Invalid analysis configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem error while writing artifacts
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow error while decoding tabular input
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Parquet error while decoding tabular input
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Build a `SourceUnavailable` error for a path-like source
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Build a `SchemaError` for `field` in `group`
    pub fn missing_field(field: impl Into<String>, group: GroupLabel) -> Self {
        Self::SchemaError {
            field: field.into(),
            group,
        }
    }

    /// Whether this error signals a programming error rather than bad input
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::SchemaError { .. })
    }
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

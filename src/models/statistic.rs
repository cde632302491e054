//! Explicit markers for statistics that cannot be computed

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AnalysisError, Result};

/// A computed value, or the reason it could not be computed.
///
/// `Undefined` covers aggregates over zero eligible rows (mean of an empty
/// column, ratio with a zero denominator). `NotApplicable` covers statistics
/// over fields absent from a dataset's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Statistic<T> {
    /// Successfully computed
    Value(T),
    /// Computed over zero eligible rows
    Undefined(String),
    /// Required field absent
    NotApplicable(String),
}

impl<T> Statistic<T> {
    /// The value, if computed
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Whether a value was computed
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Whether the statistic is undefined
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined(_))
    }

    /// Whether the statistic is not applicable
    #[must_use]
    pub const fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable(_))
    }

    /// Convert into a hard result for callers that cannot proceed without a value
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Value(v) => Ok(v),
            Self::Undefined(reason) => Err(AnalysisError::UndefinedStatistic(reason)),
            Self::NotApplicable(reason) => Err(AnalysisError::NotApplicable(reason)),
        }
    }

    /// Render with `render` or the marker text
    pub fn display_with<F: FnOnce(&T) -> String>(&self, render: F) -> String {
        match self {
            Self::Value(v) => render(v),
            Self::Undefined(_) => "undefined".to_string(),
            Self::NotApplicable(_) => "N/A".to_string(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Statistic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Undefined(_) => write!(f, "undefined"),
            Self::NotApplicable(_) => write!(f, "N/A"),
        }
    }
}

/// Mean of `values`, undefined when empty
#[must_use]
pub fn mean(values: &[f64], what: &str) -> Statistic<f64> {
    if values.is_empty() {
        return Statistic::Undefined(format!("mean of {what} over zero values"));
    }
    Statistic::Value(values.iter().sum::<f64>() / values.len() as f64)
}

/// `numerator / denominator`, undefined when the denominator is zero
#[must_use]
pub fn ratio(numerator: f64, denominator: f64, what: &str) -> Statistic<f64> {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return Statistic::Undefined(format!("{what}: zero or non-finite denominator"));
    }
    Statistic::Value(numerator / denominator)
}

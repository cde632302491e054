//! Data quality profile of a raw dataset
//!
//! Counts missing values per declared column before normalization, so the
//! report can show how much of each field was repaired.

use serde::Serialize;

use crate::models::{Dataset, GroupLabel};

/// Missing-value summary of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnQuality {
    /// Column name
    pub field: String,
    /// Number of missing values
    pub missing: usize,
    /// Missing values as a percentage of all records
    pub missing_pct: f64,
}

/// Missing-value profile of one group's raw dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQuality {
    /// Group profiled
    pub group: GroupLabel,
    /// Total records in the raw dataset
    pub total_records: usize,
    /// One entry per declared column, in schema order
    pub columns: Vec<ColumnQuality>,
}

impl DataQuality {
    /// Columns with at least one missing value
    pub fn columns_with_missing(&self) -> impl Iterator<Item = &ColumnQuality> {
        self.columns.iter().filter(|c| c.missing > 0)
    }

    /// Missing count of `field`, if the column was declared
    #[must_use]
    pub fn missing(&self, field: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.missing)
    }
}

/// Profile missing values of every declared column of `dataset`
#[must_use]
pub fn profile(dataset: &Dataset) -> DataQuality {
    let total = dataset.len();
    let columns = dataset
        .fields()
        .iter()
        .map(|field| {
            let missing = dataset.column(field).filter(|v| v.is_missing()).count();
            let missing_pct = if total == 0 {
                0.0
            } else {
                missing as f64 / total as f64 * 100.0
            };
            ColumnQuality {
                field: field.clone(),
                missing,
                missing_pct,
            }
        })
        .collect();

    DataQuality {
        group: dataset.label(),
        total_records: total,
        columns,
    }
}

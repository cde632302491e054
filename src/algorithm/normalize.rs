//! Record normalization
//!
//! Repairs raw fields into the canonical representation used by the engines:
//! integer fields (the publication year) get missing values coerced to the
//! sentinel `0`, and categorical fields get missing values coerced to the
//! `"Unknown"` category. Rows are never dropped here; the year filter is a
//! separate, explicit view.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::{Dataset, Record, Value};

/// Category assigned to missing categorical values
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Value assigned to missing integer fields
pub const MISSING_INTEGER_SENTINEL: i64 = 0;

/// A normalized dataset plus how many values were coerced per field
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDataset {
    /// Normalized records, same length and order as the input
    pub dataset: Dataset,
    /// Number of missing/unparsable values coerced, per field
    pub coerced: BTreeMap<String, usize>,
}

/// Coerces declared fields of a dataset into canonical form
#[derive(Debug, Clone)]
pub struct Normalizer {
    integer_fields: Vec<String>,
    categorical_fields: Vec<String>,
}

impl Normalizer {
    /// Create a normalizer for the given integer and categorical fields
    #[must_use]
    pub const fn new(integer_fields: Vec<String>, categorical_fields: Vec<String>) -> Self {
        Self {
            integer_fields,
            categorical_fields,
        }
    }

    /// Normalizer covering the year field and every configured categorical field
    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            vec![config.year_field.clone()],
            config
                .categorical_fields
                .iter()
                .map(|f| f.name.clone())
                .collect(),
        )
    }

    /// Normalize `raw`.
    ///
    /// Fields absent from the dataset's schema are skipped entirely, so that
    /// "absent" and "present but null" stay distinguishable downstream.
    #[must_use]
    pub fn normalize(&self, raw: Dataset) -> NormalizedDataset {
        let label = raw.label();
        let integer_fields: Vec<&str> = self
            .integer_fields
            .iter()
            .filter(|f| raw.has_field(f))
            .map(String::as_str)
            .collect();
        let categorical_fields: Vec<&str> = self
            .categorical_fields
            .iter()
            .filter(|f| raw.has_field(f))
            .map(String::as_str)
            .collect();

        let mut coerced: BTreeMap<String, usize> = integer_fields
            .iter()
            .chain(categorical_fields.iter())
            .map(|f| ((*f).to_string(), 0))
            .collect();

        let dataset = raw.map_records(|mut record: Record| {
            for field in &integer_fields {
                let (value, was_coerced) = coerce_integer(record.get(field));
                if was_coerced {
                    *coerced.entry((*field).to_string()).or_insert(0) += 1;
                }
                record.set(*field, value);
            }
            for field in &categorical_fields {
                let (value, was_coerced) = coerce_category(record.get(field));
                if was_coerced {
                    *coerced.entry((*field).to_string()).or_insert(0) += 1;
                }
                record.set(*field, value);
            }
            record
        });

        for (field, count) in &coerced {
            if *count > 0 {
                debug!("{label}: coerced {count} missing values in '{field}'");
            }
        }
        info!(
            "Normalized {} {label} records ({} integer, {} categorical fields)",
            dataset.len(),
            integer_fields.len(),
            categorical_fields.len()
        );

        NormalizedDataset { dataset, coerced }
    }
}

fn coerce_integer(value: &Value) -> (Value, bool) {
    match value.as_i64() {
        Some(v) => (Value::Int(v), false),
        None => (Value::Int(MISSING_INTEGER_SENTINEL), true),
    }
}

fn coerce_category(value: &Value) -> (Value, bool) {
    match value.as_category() {
        Some(label) => (Value::Str(label), false),
        None => (Value::Str(UNKNOWN_CATEGORY.to_string()), true),
    }
}

/// Rows whose year is a positive integer.
///
/// This is the view used by year-range and trend statistics; raw record counts
/// must keep using the unfiltered dataset.
pub fn with_valid_years(dataset: &Dataset, year_field: &str) -> Result<Dataset> {
    dataset.require_field(year_field)?;
    Ok(dataset.filtered(|r| r.get(year_field).as_i64().is_some_and(|y| y > 0)))
}

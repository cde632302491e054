//! Per-group descriptive statistics
//!
//! Record counts, numeric summaries and year statistics for one dataset.
//! Fields absent from the schema are omitted from the result (and listed in
//! `absent_fields`) rather than raising.

use serde::Serialize;
use std::fmt;

use log::{debug, info};

use crate::algorithm::normalize::with_valid_years;
use crate::config::AnalysisConfig;
use crate::models::statistic::{mean, ratio};
use crate::models::{Dataset, GroupLabel, Statistic};
use crate::schema::{Requirement, check_requirement};

/// Inclusive year range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    /// Earliest year
    pub min: i64,
    /// Latest year
    pub max: i64,
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Number of publications in one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    /// Publication year
    pub year: i64,
    /// Records published that year
    pub count: usize,
}

/// Year statistics over both the unfiltered and the valid-year view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearStats {
    /// Year column name
    pub field: String,
    /// Range over every normalized record, sentinel years included
    pub observed_range: Statistic<YearRange>,
    /// Range over records with year > 0
    pub valid_range: Statistic<YearRange>,
    /// Records with year > 0
    pub valid_count: usize,
    /// Records carrying the missing-year sentinel (or a non-positive year)
    pub sentinel_count: usize,
    /// Mean publication year over valid records
    pub mean_valid_year: Statistic<f64>,
    /// Valid-year publication counts, ascending by year
    pub per_year: Vec<YearCount>,
}

/// Summary of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    /// Column name
    pub field: String,
    /// Non-missing values
    pub observed: usize,
    /// Missing or unparsable values
    pub missing: usize,
    /// Values equal to zero
    pub zero_count: usize,
    /// Non-missing values different from zero
    pub non_zero_count: usize,
    /// Mean of observed values
    pub mean: Statistic<f64>,
    /// Minimum observed value
    pub min: Statistic<f64>,
    /// Maximum observed value
    pub max: Statistic<f64>,
}

/// Descriptive statistics of one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    /// Group described
    pub group: GroupLabel,
    /// Total records in the unfiltered dataset
    pub record_count: usize,
    /// Year statistics; not applicable when the year field is absent
    pub year: Statistic<YearStats>,
    /// Summaries of configured numeric fields present in the schema
    pub numeric: Vec<NumericSummary>,
    /// Ratio of the engagement field means, when configured
    pub engagement_ratio: Option<Statistic<f64>>,
    /// Configured fields the schema lacks
    pub absent_fields: Vec<String>,
}

impl GroupStats {
    /// Summary of `field`, if it was present
    #[must_use]
    pub fn numeric(&self, field: &str) -> Option<&NumericSummary> {
        self.numeric.iter().find(|n| n.field == field)
    }

    /// Records with a valid (positive) year, when the year field is present
    #[must_use]
    pub fn valid_year_count(&self) -> Option<usize> {
        self.year.value().map(|y| y.valid_count)
    }
}

/// Computes `GroupStats` for a configured set of fields
#[derive(Debug, Clone)]
pub struct GroupDescriptor {
    year_field: String,
    numeric_fields: Vec<String>,
    engagement_ratio: Option<(String, String)>,
}

impl GroupDescriptor {
    /// Create a descriptor
    #[must_use]
    pub const fn new(
        year_field: String,
        numeric_fields: Vec<String>,
        engagement_ratio: Option<(String, String)>,
    ) -> Self {
        Self {
            year_field,
            numeric_fields,
            engagement_ratio,
        }
    }

    /// Descriptor for the fields named in `config`
    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            config.year_field.clone(),
            config.numeric_fields.clone(),
            config.engagement_ratio.clone(),
        )
    }

    /// Describe a normalized dataset
    #[must_use]
    pub fn describe(&self, dataset: &Dataset) -> GroupStats {
        let mut absent_fields = Vec::new();

        let year_requirement = Requirement::Year(self.year_field.clone());
        let year = match check_requirement(dataset, &year_requirement).reason() {
            None => Statistic::Value(self.year_stats(dataset)),
            Some(reason) => {
                absent_fields.push(self.year_field.clone());
                Statistic::NotApplicable(reason)
            }
        };

        let mut numeric = Vec::with_capacity(self.numeric_fields.len());
        for field in &self.numeric_fields {
            let requirement = Requirement::Numeric(field.clone());
            if check_requirement(dataset, &requirement).is_applicable() {
                numeric.push(numeric_summary(dataset, field));
            } else {
                absent_fields.push(field.clone());
            }
        }

        let engagement_ratio = self
            .engagement_ratio
            .as_ref()
            .map(|(num, den)| engagement_ratio(dataset, num, den));

        info!(
            "Described {} {} records ({} numeric fields, {} absent)",
            dataset.len(),
            dataset.label(),
            numeric.len(),
            absent_fields.len()
        );

        GroupStats {
            group: dataset.label(),
            record_count: dataset.len(),
            year,
            numeric,
            engagement_ratio,
            absent_fields,
        }
    }

    fn year_stats(&self, dataset: &Dataset) -> YearStats {
        let field = self.year_field.as_str();
        let observed: Vec<i64> = dataset.column(field).filter_map(|v| v.as_i64()).collect();

        // Field presence was checked by the caller.
        let valid_view = with_valid_years(dataset, field)
            .unwrap_or_else(|_| dataset.filtered(|_| false));
        let valid: Vec<i64> = valid_view.column(field).filter_map(|v| v.as_i64()).collect();

        let mut per_year: Vec<YearCount> = Vec::new();
        let mut sorted = valid.clone();
        sorted.sort_unstable();
        for year in sorted {
            match per_year.last_mut() {
                Some(last) if last.year == year => last.count += 1,
                _ => per_year.push(YearCount { year, count: 1 }),
            }
        }

        let valid_as_f64: Vec<f64> = valid.iter().map(|y| *y as f64).collect();
        debug!(
            "{}: {} of {} records have a valid '{field}'",
            dataset.label(),
            valid.len(),
            dataset.len()
        );

        YearStats {
            field: field.to_string(),
            observed_range: year_range(&observed, "year range over all records"),
            valid_range: year_range(&valid, "year range over valid years"),
            valid_count: valid.len(),
            sentinel_count: dataset.len() - valid.len(),
            mean_valid_year: mean(&valid_as_f64, "valid years"),
            per_year,
        }
    }
}

fn year_range(years: &[i64], what: &str) -> Statistic<YearRange> {
    match (years.iter().min(), years.iter().max()) {
        (Some(&min), Some(&max)) => Statistic::Value(YearRange { min, max }),
        _ => Statistic::Undefined(format!("{what}: no records")),
    }
}

/// Summarise one numeric column; unparsable values count as missing
#[must_use]
pub fn numeric_summary(dataset: &Dataset, field: &str) -> NumericSummary {
    let values: Vec<f64> = dataset.column(field).filter_map(|v| v.as_f64()).collect();
    let missing = dataset.len() - values.len();
    let zero_count = values.iter().filter(|v| **v == 0.0).count();

    let (min, max) = if values.is_empty() {
        (
            Statistic::Undefined(format!("min of {field} over zero values")),
            Statistic::Undefined(format!("max of {field} over zero values")),
        )
    } else {
        (
            Statistic::Value(values.iter().copied().fold(f64::INFINITY, f64::min)),
            Statistic::Value(values.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
        )
    };

    NumericSummary {
        field: field.to_string(),
        observed: values.len(),
        missing,
        zero_count,
        non_zero_count: values.len() - zero_count,
        mean: mean(&values, field),
        min,
        max,
    }
}

/// Ratio of the means of two numeric fields
#[must_use]
pub fn engagement_ratio(dataset: &Dataset, numerator: &str, denominator: &str) -> Statistic<f64> {
    let requirement = Requirement::Ratio {
        numerator: numerator.to_string(),
        denominator: denominator.to_string(),
    };
    if let Some(reason) = check_requirement(dataset, &requirement).reason() {
        return Statistic::NotApplicable(reason);
    }

    let num = numeric_summary(dataset, numerator).mean;
    let den = numeric_summary(dataset, denominator).mean;
    match (num, den) {
        (Statistic::Value(n), Statistic::Value(d)) => {
            ratio(n, d, &format!("{numerator}/{denominator} ratio"))
        }
        _ => Statistic::Undefined(format!(
            "{numerator}/{denominator} ratio: a mean is undefined"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::normalize::Normalizer;
    use crate::models::{Record, Value};

    fn descriptor() -> GroupDescriptor {
        GroupDescriptor::new(
            "year".into(),
            vec!["views".into(), "downloads".into()],
            Some(("views".into(), "downloads".into())),
        )
    }

    #[test]
    fn test_year_statistics_use_both_views() {
        let years = [
            Value::Int(2020),
            Value::Missing,
            Value::Int(2021),
            Value::Int(0),
            Value::Int(2019),
        ];
        let records = years
            .into_iter()
            .map(|y| Record::from_pairs([("year", y)]))
            .collect();
        let raw = Dataset::from_records(GroupLabel::GlobalSouth, records);
        let normalized = Normalizer::new(vec!["year".into()], Vec::new()).normalize(raw);

        let stats = descriptor().describe(&normalized.dataset);
        assert_eq!(stats.record_count, 5);

        let year = stats.year.value().unwrap();
        assert_eq!(year.valid_count, 3);
        assert_eq!(year.sentinel_count, 2);
        assert_eq!(year.valid_range, Statistic::Value(YearRange { min: 2019, max: 2021 }));
        assert_eq!(year.observed_range, Statistic::Value(YearRange { min: 0, max: 2021 }));
        assert_eq!(
            year.per_year,
            vec![
                YearCount { year: 2019, count: 1 },
                YearCount { year: 2020, count: 1 },
                YearCount { year: 2021, count: 1 },
            ]
        );
    }

    #[test]
    fn test_empty_numeric_column_is_undefined() {
        let records = vec![
            Record::from_pairs([("views", Value::Missing)]),
            Record::from_pairs([("views", Value::from("n/a"))]),
        ];
        let ds = Dataset::from_records(GroupLabel::GlobalNorth, records);
        let summary = numeric_summary(&ds, "views");

        assert_eq!(summary.observed, 0);
        assert_eq!(summary.missing, 2);
        assert!(summary.mean.is_undefined());
        assert!(summary.min.is_undefined());
        assert!(summary.max.is_undefined());
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let records = vec![Record::from_pairs([("views", Value::Int(10))])];
        let ds = Dataset::from_records(GroupLabel::GlobalNorth, records);
        let stats = descriptor().describe(&ds);

        assert!(stats.year.is_not_applicable());
        assert_eq!(
            stats.year,
            Statistic::NotApplicable("year absent from the Global North dataset".into())
        );
        assert!(stats.numeric("views").is_some());
        assert!(stats.numeric("downloads").is_none());
        assert_eq!(stats.absent_fields, vec!["year", "downloads"]);
        assert!(stats.engagement_ratio.unwrap().is_not_applicable());
    }

    #[test]
    fn test_engagement_ratio_and_zero_counts() {
        let records = vec![
            Record::from_pairs([("views", Value::Int(0)), ("downloads", Value::Int(2))]),
            Record::from_pairs([("views", Value::Int(30)), ("downloads", Value::Int(4))]),
        ];
        let ds = Dataset::from_records(GroupLabel::GlobalSouth, records);
        let stats = descriptor().describe(&ds);

        let views = stats.numeric("views").unwrap();
        assert_eq!(views.zero_count, 1);
        assert_eq!(views.non_zero_count, 1);
        assert_eq!(views.min, Statistic::Value(0.0));
        assert_eq!(views.max, Statistic::Value(30.0));
        assert_eq!(stats.engagement_ratio, Some(Statistic::Value(5.0)));
    }

    #[test]
    fn test_zero_denominator_ratio_is_undefined() {
        let records = vec![Record::from_pairs([
            ("views", Value::Int(3)),
            ("downloads", Value::Int(0)),
        ])];
        let ds = Dataset::from_records(GroupLabel::GlobalSouth, records);
        assert!(engagement_ratio(&ds, "views", "downloads").is_undefined());
    }
}

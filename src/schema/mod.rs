//! Field presence checks for schema-drifting corpora.
//!
//! Every statistic declares the fields it needs through a `Requirement`.
//! Engines consult `check_requirement` before computing, so an absent field
//! degrades the statistic to "not applicable" instead of failing the run.

use std::fmt;

use crate::models::{Dataset, GroupLabel};

/// A statistic and the fields it depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Year range and trend statistics
    Year(String),
    /// Mean/min/max of a numeric field
    Numeric(String),
    /// Category distribution of a categorical field
    Categorical(String),
    /// Ratio of two numeric field means
    Ratio {
        /// Numerator field
        numerator: String,
        /// Denominator field
        denominator: String,
    },
}

impl Requirement {
    /// Fields this statistic reads
    #[must_use]
    pub fn required_fields(&self) -> Vec<&str> {
        match self {
            Self::Year(f) | Self::Numeric(f) | Self::Categorical(f) => vec![f.as_str()],
            Self::Ratio {
                numerator,
                denominator,
            } => vec![numerator.as_str(), denominator.as_str()],
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(field) => write!(f, "year statistics over '{field}'"),
            Self::Numeric(field) => write!(f, "numeric summary of '{field}'"),
            Self::Categorical(field) => write!(f, "distribution of '{field}'"),
            Self::Ratio {
                numerator,
                denominator,
            } => write!(f, "ratio '{numerator}'/'{denominator}'"),
        }
    }
}

/// Outcome of a requirement check against one dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applicability {
    /// All required fields are present
    Applicable,
    /// Some required fields are absent
    NotApplicable {
        /// Group whose schema was checked
        group: GroupLabel,
        /// Fields absent from the schema
        missing: Vec<String>,
    },
}

impl Applicability {
    /// Whether the statistic can be computed
    #[must_use]
    pub const fn is_applicable(&self) -> bool {
        matches!(self, Self::Applicable)
    }

    /// Human-readable reason when not applicable
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Applicable => None,
            Self::NotApplicable { group, missing } => Some(format!(
                "{} absent from the {group} dataset",
                missing.join(", ")
            )),
        }
    }
}

/// Check whether `dataset` carries every field `requirement` needs
#[must_use]
pub fn check_requirement(dataset: &Dataset, requirement: &Requirement) -> Applicability {
    let missing: Vec<String> = requirement
        .required_fields()
        .into_iter()
        .filter(|f| !dataset.has_field(f))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Applicability::Applicable
    } else {
        log::debug!(
            "{requirement} not applicable for {}: missing {missing:?}",
            dataset.label()
        );
        Applicability::NotApplicable {
            group: dataset.label(),
            missing,
        }
    }
}

/// Fields present in one dataset but not the other, for drift logging
#[must_use]
pub fn schema_drift(a: &Dataset, b: &Dataset) -> (Vec<String>, Vec<String>) {
    let only_a = a
        .fields()
        .iter()
        .filter(|f| !b.has_field(f))
        .cloned()
        .collect();
    let only_b = b
        .fields()
        .iter()
        .filter(|f| !a.has_field(f))
        .cloned()
        .collect();
    (only_a, only_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(label: GroupLabel, fields: &[&str]) -> Dataset {
        Dataset::new(label, fields.iter().map(|f| f.to_string()).collect(), Vec::new())
    }

    #[test]
    fn test_ratio_requires_both_fields() {
        let ds = dataset(GroupLabel::GlobalNorth, &["year", "views"]);
        let req = Requirement::Ratio {
            numerator: "views".into(),
            denominator: "downloads".into(),
        };
        let result = check_requirement(&ds, &req);
        assert_eq!(
            result,
            Applicability::NotApplicable {
                group: GroupLabel::GlobalNorth,
                missing: vec!["downloads".to_string()],
            }
        );
        assert!(result.reason().unwrap().contains("downloads"));
    }

    #[test]
    fn test_present_field_is_applicable() {
        let ds = dataset(GroupLabel::GlobalSouth, &["year"]);
        let check = check_requirement(&ds, &Requirement::Year("year".into()));
        assert!(check.is_applicable());
        assert_eq!(check.reason(), None);
    }

    #[test]
    fn test_schema_drift() {
        let gs = dataset(GroupLabel::GlobalSouth, &["year", "views", "country_final"]);
        let gn = dataset(GroupLabel::GlobalNorth, &["year", "journal_quartile"]);
        let (only_gs, only_gn) = schema_drift(&gs, &gn);
        assert_eq!(only_gs, vec!["views", "country_final"]);
        assert_eq!(only_gn, vec!["journal_quartile"]);
    }
}

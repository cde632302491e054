//! Configuration for a comparison run.
//!
//! The data source is an explicit configuration value; nothing in the
//! analysis core prompts for it at runtime.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, Result};
use crate::error::util::open_source_file;

/// Seed used when no sample seed is configured
pub const DEFAULT_SAMPLE_SEED: u64 = 42;

/// Records generated per group when not configured
pub const DEFAULT_RECORDS_PER_GROUP: usize = 100;

/// Where the two corpora come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DataSource {
    /// Deterministic generated sample corpora
    Sample {
        /// Seed for the generator
        seed: u64,
        /// Number of records generated per group
        records_per_group: usize,
    },
    /// Real exports on disk (`.csv` or `.parquet`)
    Production {
        /// Global South export
        south: PathBuf,
        /// Global North export
        north: PathBuf,
    },
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Sample {
            seed: DEFAULT_SAMPLE_SEED,
            records_per_group: DEFAULT_RECORDS_PER_GROUP,
        }
    }
}

/// A categorical field to analyse and how many top categories to report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalField {
    /// Column name
    pub name: String,
    /// Number of top categories to list per group
    pub top_k: usize,
}

impl CategoricalField {
    /// Create a new categorical field entry
    pub fn new(name: impl Into<String>, top_k: usize) -> Self {
        Self {
            name: name.into(),
            top_k,
        }
    }
}

/// Configuration for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Input corpora
    pub source: DataSource,
    /// Publication year column
    pub year_field: String,
    /// Numeric columns to summarise
    pub numeric_fields: Vec<String>,
    /// Engagement ratio as (numerator, denominator) field names
    pub engagement_ratio: Option<(String, String)>,
    /// Categorical columns to distribute and compare
    pub categorical_fields: Vec<CategoricalField>,
    /// Field whose requested categories get explicit gap rows
    pub focus_field: Option<String>,
    /// Requested categories of `focus_field`
    pub focus_categories: Vec<String>,
    /// Number of shared categories to pair across groups
    pub shared_top_k: usize,
    /// Directory receiving tables, reports and chart series
    pub output_dir: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            year_field: "year".to_string(),
            numeric_fields: vec![
                "views".to_string(),
                "downloads".to_string(),
                "citations".to_string(),
            ],
            engagement_ratio: Some(("views".to_string(), "downloads".to_string())),
            categorical_fields: vec![
                CategoricalField::new("database", 20),
                CategoricalField::new("epistemic_category", 10),
                CategoricalField::new("research_domain", 8),
                CategoricalField::new("country_final", 15),
            ],
            focus_field: Some("epistemic_category".to_string()),
            focus_categories: vec![
                "Library and Information Science (LIS)".to_string(),
                "Information Science (IS)".to_string(),
                "Library Science (LS)".to_string(),
            ],
            shared_top_k: 5,
            output_dir: PathBuf::from("results"),
        }
    }
}

impl AnalysisConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file; missing keys take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = open_source_file(path, "reading analysis configuration")?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the data source
    #[must_use]
    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = source;
        self
    }

    /// Set the numeric fields to summarise
    #[must_use]
    pub fn with_numeric_fields(mut self, fields: Vec<String>) -> Self {
        self.numeric_fields = fields;
        self
    }

    /// Set the categorical fields to compare
    #[must_use]
    pub fn with_categorical_fields(mut self, fields: Vec<CategoricalField>) -> Self {
        self.categorical_fields = fields;
        self
    }

    /// Set the engagement ratio fields
    #[must_use]
    pub fn with_engagement_ratio(mut self, ratio: Option<(String, String)>) -> Self {
        self.engagement_ratio = ratio;
        self
    }

    /// Set the focus field and its requested categories
    #[must_use]
    pub fn with_focus(mut self, field: Option<String>, categories: Vec<String>) -> Self {
        self.focus_field = field;
        self.focus_categories = categories;
        self
    }

    /// Set the output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Reject configurations that cannot produce a meaningful report
    pub fn validate(&self) -> Result<()> {
        if self.year_field.trim().is_empty() {
            return Err(AnalysisError::Config("year_field must not be empty".into()));
        }
        if let Some(field) = self.categorical_fields.iter().find(|f| f.top_k == 0) {
            return Err(AnalysisError::Config(format!(
                "top_k for '{}' must be at least 1",
                field.name
            )));
        }
        if let Some(name) = self
            .categorical_fields
            .iter()
            .map(|f| f.name.as_str())
            .duplicates()
            .next()
        {
            return Err(AnalysisError::Config(format!(
                "categorical field '{name}' is listed more than once"
            )));
        }
        if let Some(focus) = &self.focus_field {
            if !self.categorical_fields.iter().any(|f| &f.name == focus) {
                return Err(AnalysisError::Config(format!(
                    "focus field '{focus}' is not one of the categorical fields"
                )));
            }
        }
        if let DataSource::Sample {
            records_per_group: 0,
            ..
        } = self.source
        {
            return Err(AnalysisError::Config(
                "sample source needs at least one record per group".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis Configuration:")?;
        match &self.source {
            DataSource::Sample {
                seed,
                records_per_group,
            } => writeln!(
                f,
                "  Source: sample (seed {seed}, {records_per_group} records per group)"
            )?,
            DataSource::Production { south, north } => {
                writeln!(f, "  Source: production")?;
                writeln!(f, "    Global South: {}", south.display())?;
                writeln!(f, "    Global North: {}", north.display())?;
            }
        }
        writeln!(f, "  Year Field: {}", self.year_field)?;
        writeln!(f, "  Numeric Fields: {}", self.numeric_fields.join(", "))?;
        if let Some((num, den)) = &self.engagement_ratio {
            writeln!(f, "  Engagement Ratio: {num}/{den}")?;
        }
        for field in &self.categorical_fields {
            writeln!(f, "  Categorical: {} (top {})", field.name, field.top_k)?;
        }
        if let Some(focus) = &self.focus_field {
            writeln!(
                f,
                "  Focus: {focus} [{}]",
                self.focus_categories.join("; ")
            )?;
        }
        writeln!(f, "  Shared Top-K: {}", self.shared_top_k)?;
        writeln!(f, "  Output Directory: {}", self.output_dir.display())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.year_field, "year");
        assert_eq!(config.shared_top_k, 5);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let json = r#"{
            "source": {"kind": "production", "south": "gs.csv", "north": "gn.csv"},
            "shared_top_k": 3
        }"#;
        let config: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.shared_top_k, 3);
        assert_eq!(config.year_field, "year");
        assert_eq!(
            config.source,
            DataSource::Production {
                south: PathBuf::from("gs.csv"),
                north: PathBuf::from("gn.csv"),
            }
        );
    }

    #[test]
    fn test_duplicate_categorical_field_rejected() {
        let config = AnalysisConfig::default().with_categorical_fields(vec![
            CategoricalField::new("database", 5),
            CategoricalField::new("epistemic_category", 10),
            CategoricalField::new("database", 10),
        ]);
        match config.validate() {
            Err(AnalysisError::Config(msg)) => assert!(msg.contains("database")),
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn test_focus_field_must_be_categorical() {
        let config = AnalysisConfig::default()
            .with_focus(Some("journal_quartile".into()), vec!["Q1".into()]);
        assert!(matches!(config.validate(), Err(AnalysisError::Config(_))));

        let config = AnalysisConfig::default().with_focus(None, Vec::new());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let config = AnalysisConfig::default()
            .with_categorical_fields(vec![CategoricalField::new("database", 0)]);
        assert!(matches!(config.validate(), Err(AnalysisError::Config(_))));
    }
}

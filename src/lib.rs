//! Comparative distribution analysis of two bibliographic corpora.
//!
//! Loads a Global South and a Global North publication corpus, normalizes
//! their loosely typed fields, computes per-group descriptive statistics and
//! categorical distributions, compares the two groups field by field, and
//! assembles an immutable `SummaryReport` for the table, narrative and chart
//! sinks.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod sample;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{AnalysisConfig, CategoricalField, DataSource};
pub use error::{AnalysisError, Result};
pub use loader::{DatasetSource, FileSource};
pub use models::{Dataset, GroupLabel, Record, Statistic, Value};
pub use pipeline::{analyze, run, run_with_source};
pub use report::{Outcome, ReportWriter, SummaryReport};
pub use sample::SampleSource;

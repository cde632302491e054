//! Report assembly and external sinks
//!
//! `ReportAssembler` packages per-group and cross-group results into an
//! immutable `SummaryReport`. It computes nothing: any result that could not
//! be produced upstream is carried as an explicit `Outcome::NotApplicable`,
//! so that sinks always iterate the same shape.
//!
//! The sinks (`tables`, `narrative`, `charts`, `writer`) consume a finished
//! report and never feed back into it.

pub mod charts;
pub mod narrative;
pub mod tables;
pub mod writer;

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::algorithm::comparison::{CategoryGap, ComparisonResult, GroupComparison};
use crate::algorithm::descriptive::{GroupStats, NumericSummary};
use crate::algorithm::distribution::FieldDistribution;
use crate::algorithm::quality::DataQuality;
use crate::config::{AnalysisConfig, CategoricalField};
use crate::models::GroupLabel;

pub use charts::{ChartSink, JsonChartSink, emit_charts};
pub use narrative::render_narrative;
pub use tables::SummaryTable;
pub use writer::ReportWriter;

/// A packaged result, or why it does not exist for this run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// Result computed upstream
    Computed(T),
    /// A required field was absent
    NotApplicable(String),
}

impl<T> Outcome<T> {
    /// The computed value, if any
    #[must_use]
    pub const fn computed(&self) -> Option<&T> {
        match self {
            Self::Computed(v) => Some(v),
            Self::NotApplicable(_) => None,
        }
    }

    /// Whether a value was computed
    #[must_use]
    pub const fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    /// Why the value is missing
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Computed(_) => None,
            Self::NotApplicable(reason) => Some(reason),
        }
    }
}

/// Everything computed for one group before the cross-group join
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAnalysis {
    /// Descriptive statistics of the normalized dataset
    pub stats: GroupStats,
    /// Missing-value profile of the raw dataset
    pub quality: DataQuality,
    /// Values coerced by the normalizer, per field
    pub coerced: BTreeMap<String, usize>,
    /// One entry per configured categorical field
    pub distributions: Vec<(String, Outcome<FieldDistribution>)>,
}

impl GroupAnalysis {
    /// Group analysed
    #[must_use]
    pub const fn group(&self) -> GroupLabel {
        self.stats.group
    }

    /// Computed distribution of `field`
    #[must_use]
    pub fn distribution(&self, field: &str) -> Option<&FieldDistribution> {
        self.distributions
            .iter()
            .find(|(f, _)| f == field)
            .and_then(|(_, outcome)| outcome.computed())
    }
}

/// Per-group scalars carried into the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    /// Descriptive statistics
    pub stats: GroupStats,
    /// Raw missing-value profile
    pub quality: DataQuality,
    /// Normalizer coercions per field
    pub coerced: BTreeMap<String, usize>,
}

/// One numeric field across both groups
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericReport {
    /// Column name
    pub field: String,
    /// Global South summary
    pub south: Outcome<NumericSummary>,
    /// Global North summary
    pub north: Outcome<NumericSummary>,
}

impl NumericReport {
    /// Summary for `group`
    #[must_use]
    pub const fn group(&self, group: GroupLabel) -> &Outcome<NumericSummary> {
        match group {
            GroupLabel::GlobalSouth => &self.south,
            GroupLabel::GlobalNorth => &self.north,
        }
    }
}

/// One categorical field across both groups
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    /// Column name
    pub field: String,
    /// Number of top categories listed per group
    pub top_k: usize,
    /// Global South distribution
    pub south: Outcome<FieldDistribution>,
    /// Global North distribution
    pub north: Outcome<FieldDistribution>,
    /// GS versus GN comparison
    pub comparison: Outcome<ComparisonResult>,
}

impl FieldReport {
    /// Distribution for `group`
    #[must_use]
    pub const fn distribution(&self, group: GroupLabel) -> &Outcome<FieldDistribution> {
        match group {
            GroupLabel::GlobalSouth => &self.south,
            GroupLabel::GlobalNorth => &self.north,
        }
    }
}

/// The terminal aggregate of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    year_field: String,
    focus_field: Option<String>,
    south: GroupSummary,
    north: GroupSummary,
    groups: GroupComparison,
    numeric: Vec<NumericReport>,
    fields: Vec<FieldReport>,
}

impl SummaryReport {
    /// Year column analysed
    #[must_use]
    pub fn year_field(&self) -> &str {
        &self.year_field
    }

    /// Per-group scalars for `group`
    #[must_use]
    pub const fn group(&self, group: GroupLabel) -> &GroupSummary {
        match group {
            GroupLabel::GlobalSouth => &self.south,
            GroupLabel::GlobalNorth => &self.north,
        }
    }

    /// Cross-group record-count comparison
    #[must_use]
    pub const fn group_comparison(&self) -> &GroupComparison {
        &self.groups
    }

    /// Numeric fields in configured order
    #[must_use]
    pub fn numeric(&self) -> &[NumericReport] {
        &self.numeric
    }

    /// Categorical fields in configured order
    #[must_use]
    pub fn fields(&self) -> &[FieldReport] {
        &self.fields
    }

    /// Report for categorical `field`
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&FieldReport> {
        self.fields.iter().find(|f| f.field == field)
    }

    /// Field whose requested categories have explicit gap rows
    #[must_use]
    pub fn focus_field(&self) -> Option<&str> {
        self.focus_field.as_deref()
    }

    /// Gaps for the requested focus categories, when the focus field was compared
    #[must_use]
    pub fn focus_gaps(&self) -> Option<&[CategoryGap]> {
        let focus = self.focus_field.as_deref()?;
        self.field(focus)?
            .comparison
            .computed()
            .map(ComparisonResult::requested_gaps)
    }
}

/// Packages analysis results into a `SummaryReport`
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    year_field: String,
    numeric_fields: Vec<String>,
    categorical_fields: Vec<CategoricalField>,
    focus_field: Option<String>,
}

impl ReportAssembler {
    /// Assembler for the fields named in `config`
    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            year_field: config.year_field.clone(),
            numeric_fields: config.numeric_fields.clone(),
            categorical_fields: config.categorical_fields.clone(),
            focus_field: config.focus_field.clone(),
        }
    }

    /// Build the report from both groups' results and the per-field comparisons
    #[must_use]
    pub fn assemble(
        &self,
        south: GroupAnalysis,
        north: GroupAnalysis,
        comparisons: Vec<(String, Outcome<ComparisonResult>)>,
        groups: GroupComparison,
    ) -> SummaryReport {
        let numeric = self
            .numeric_fields
            .iter()
            .map(|field| NumericReport {
                field: field.clone(),
                south: numeric_outcome(&south.stats, field),
                north: numeric_outcome(&north.stats, field),
            })
            .collect();

        let (south, mut south_dists) = split(south);
        let (north, mut north_dists) = split(north);
        let mut comparisons: FxHashMap<String, Outcome<ComparisonResult>> =
            comparisons.into_iter().collect();

        let fields = self
            .categorical_fields
            .iter()
            .map(|cf| {
                let name = cf.name.as_str();
                FieldReport {
                    field: cf.name.clone(),
                    top_k: cf.top_k,
                    south: take_or_missing(&mut south_dists, name, "distribution"),
                    north: take_or_missing(&mut north_dists, name, "distribution"),
                    comparison: take_or_missing(&mut comparisons, name, "comparison"),
                }
            })
            .collect();

        SummaryReport {
            year_field: self.year_field.clone(),
            focus_field: self.focus_field.clone(),
            south,
            north,
            groups,
            numeric,
            fields,
        }
    }
}

fn numeric_outcome(stats: &GroupStats, field: &str) -> Outcome<NumericSummary> {
    stats.numeric(field).map_or_else(
        || Outcome::NotApplicable(format!("{field} absent from the {} dataset", stats.group)),
        |summary| Outcome::Computed(summary.clone()),
    )
}

fn split(
    analysis: GroupAnalysis,
) -> (
    GroupSummary,
    FxHashMap<String, Outcome<FieldDistribution>>,
) {
    let summary = GroupSummary {
        stats: analysis.stats,
        quality: analysis.quality,
        coerced: analysis.coerced,
    };
    (summary, analysis.distributions.into_iter().collect())
}

fn take_or_missing<T>(
    results: &mut FxHashMap<String, Outcome<T>>,
    field: &str,
    what: &str,
) -> Outcome<T> {
    results
        .remove(field)
        .unwrap_or_else(|| Outcome::NotApplicable(format!("no {what} was produced for {field}")))
}

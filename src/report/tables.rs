//! Tabular views of a `SummaryReport`
//!
//! A summary table with one row per metric and one column per group, plus
//! per-group distribution tables and per-field gap tables. All tables render
//! to CSV text; writing them to disk is the writer's job.

use std::fmt::Write as _;

use crate::algorithm::comparison::ComparisonResult;
use crate::algorithm::descriptive::{GroupStats, NumericSummary, YearRange, YearStats};
use crate::algorithm::distribution::FieldDistribution;
use crate::models::{GroupLabel, Statistic};
use crate::report::{Outcome, SummaryReport};

/// Text used for statistics over absent fields
pub const NOT_APPLICABLE: &str = "N/A";

/// One metric across both groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// Metric label
    pub metric: String,
    /// Global South cell
    pub global_south: String,
    /// Global North cell
    pub global_north: String,
}

/// Metric by group table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Build the summary table of `report`
    #[must_use]
    pub fn from_report(report: &SummaryReport) -> Self {
        let mut table = Self::default();
        let south = &report.group(GroupLabel::GlobalSouth).stats;
        let north = &report.group(GroupLabel::GlobalNorth).stats;

        table.push(
            "Total Publications",
            south.record_count.to_string(),
            north.record_count.to_string(),
        );
        table.push(
            "Publications With Valid Year",
            valid_year_cell(south),
            valid_year_cell(north),
        );
        table.push(
            "Year Range",
            year_range_cell(south, |y| &y.valid_range),
            year_range_cell(north, |y| &y.valid_range),
        );
        table.push(
            "Year Range (All Records)",
            year_range_cell(south, |y| &y.observed_range),
            year_range_cell(north, |y| &y.observed_range),
        );

        for numeric in report.numeric() {
            table.push(
                format!("Average {}", title_case(&numeric.field)),
                mean_cell(&numeric.south),
                mean_cell(&numeric.north),
            );
        }

        if south.engagement_ratio.is_some() || north.engagement_ratio.is_some() {
            table.push(
                "Engagement Ratio",
                engagement_cell(south),
                engagement_cell(north),
            );
        }

        for field in report.fields() {
            table.push(
                format!("Distinct {} Categories", title_case(&field.field)),
                distinct_cell(&field.south),
                distinct_cell(&field.north),
            );
        }

        table
    }

    fn push(&mut self, metric: impl Into<String>, global_south: String, global_north: String) {
        self.rows.push(SummaryRow {
            metric: metric.into(),
            global_south,
            global_north,
        });
    }

    /// Rows in presentation order
    #[must_use]
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Cell for `metric` and `group`
    #[must_use]
    pub fn cell(&self, metric: &str, group: GroupLabel) -> Option<&str> {
        self.rows.iter().find(|r| r.metric == metric).map(|r| match group {
            GroupLabel::GlobalSouth => r.global_south.as_str(),
            GroupLabel::GlobalNorth => r.global_north.as_str(),
        })
    }

    /// Render as CSV with a `Metric,Global_South,Global_North` header
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = format!(
            "Metric,{},{}\n",
            GroupLabel::GlobalSouth.column_name(),
            GroupLabel::GlobalNorth.column_name()
        );
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{},{},{}",
                escape_csv(&row.metric),
                escape_csv(&row.global_south),
                escape_csv(&row.global_north)
            );
        }
        out
    }
}

/// `category,count,percentage` rows for the top `limit` categories
#[must_use]
pub fn distribution_csv(distribution: &FieldDistribution, limit: usize) -> String {
    let mut out = String::from("category,count,percentage\n");
    for entry in distribution.top_k(limit) {
        let _ = writeln!(
            out,
            "{},{},{:.2}",
            escape_csv(&entry.category),
            entry.count,
            distribution.percentage(&entry.category)
        );
    }
    out
}

/// Per-category shares and signed gaps (GS minus GN)
#[must_use]
pub fn comparison_csv(comparison: &ComparisonResult) -> String {
    let mut out = format!(
        "category,{}_pct,{}_pct,gap_pp,presence\n",
        comparison.group_a().code(),
        comparison.group_b().code()
    );
    for gap in comparison.gaps() {
        let presence = if comparison.common().contains(&gap.category) {
            "both"
        } else if comparison.only_a().contains(&gap.category) {
            comparison.group_a().code()
        } else {
            comparison.group_b().code()
        };
        let _ = writeln!(
            out,
            "{},{:.2},{:.2},{:+.2},{presence}",
            escape_csv(&gap.category),
            gap.pct_a,
            gap.pct_b,
            gap.gap
        );
    }
    out
}

fn valid_year_cell(stats: &GroupStats) -> String {
    stats
        .valid_year_count()
        .map_or_else(|| NOT_APPLICABLE.to_string(), |c| c.to_string())
}

fn year_range_cell(
    stats: &GroupStats,
    pick: impl Fn(&YearStats) -> &Statistic<YearRange>,
) -> String {
    stats
        .year
        .value()
        .map_or_else(|| NOT_APPLICABLE.to_string(), |y| pick(y).to_string())
}

fn mean_cell(summary: &Outcome<NumericSummary>) -> String {
    summary.computed().map_or_else(
        || NOT_APPLICABLE.to_string(),
        |s| s.mean.display_with(|m| format!("{m:.1}")),
    )
}

fn engagement_cell(stats: &GroupStats) -> String {
    stats.engagement_ratio.as_ref().map_or_else(
        || NOT_APPLICABLE.to_string(),
        |r| r.display_with(|v| format!("{v:.2}")),
    )
}

fn distinct_cell(distribution: &Outcome<FieldDistribution>) -> String {
    distribution
        .computed()
        .map_or_else(|| NOT_APPLICABLE.to_string(), |d| d.len().to_string())
}

fn title_case(field: &str) -> String {
    field
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape a string for CSV output
fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

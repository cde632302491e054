//! Chart-ready series
//!
//! The report is reduced to plain series that an external renderer can draw:
//! side-by-side category shares, gap bars and per-year publication trends.
//! `ChartSink` is the rendering boundary; `JsonChartSink` writes each series
//! as JSON.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use itertools::Itertools;
use serde::Serialize;

use crate::algorithm::descriptive::YearCount;
use crate::error::Result;
use crate::error::util::ensure_directory;
use crate::models::GroupLabel;
use crate::report::writer::file_stem;
use crate::report::{FieldReport, SummaryReport};

/// Category shares of both groups, for grouped bar or pie charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySeries {
    /// Field plotted
    pub field: String,
    /// Category labels: GS top categories, then GN top categories not yet listed
    pub category_labels: Vec<String>,
    /// Global South share per label, percent
    pub global_south: Vec<f64>,
    /// Global North share per label, percent
    pub global_north: Vec<f64>,
}

/// Signed GS minus GN gaps, for a diverging bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapSeries {
    /// Field plotted
    pub field: String,
    /// Category labels
    pub category_labels: Vec<String>,
    /// Gap per label, percentage points
    pub gaps: Vec<f64>,
}

/// `(year, count)` pairs of one group, for a trend line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    /// Group plotted
    pub group: GroupLabel,
    /// Valid-year publication counts, ascending by year
    pub points: Vec<YearCount>,
}

/// Destination for rendered series
pub trait ChartSink {
    /// Render a category comparison under `name`
    fn categories(&mut self, name: &str, series: &CategorySeries) -> Result<()>;

    /// Render a gap chart under `name`
    fn gaps(&mut self, name: &str, series: &GapSeries) -> Result<()>;

    /// Render both groups' trends under `name`
    fn trends(&mut self, name: &str, series: &[TrendSeries]) -> Result<()>;
}

/// Writes every series to `<dir>/<name>.json`
#[derive(Debug)]
pub struct JsonChartSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl JsonChartSink {
    /// Sink writing into `dir`, created on demand
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write<T: Serialize>(&mut self, name: &str, value: &T) -> Result<()> {
        ensure_directory(&self.dir)?;
        let path = self.dir.join(format!("{}.json", file_stem(name)));
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, value)?;
        log::debug!("Wrote chart series {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

impl ChartSink for JsonChartSink {
    fn categories(&mut self, name: &str, series: &CategorySeries) -> Result<()> {
        self.write(name, series)
    }

    fn gaps(&mut self, name: &str, series: &GapSeries) -> Result<()> {
        self.write(name, series)
    }

    fn trends(&mut self, name: &str, series: &[TrendSeries]) -> Result<()> {
        self.write(name, &series)
    }
}

/// Category shares of `field` in both groups. `None` unless both
/// distributions were computed.
#[must_use]
pub fn category_series(field: &FieldReport) -> Option<CategorySeries> {
    let south = field.south.computed()?;
    let north = field.north.computed()?;

    let category_labels: Vec<String> = south
        .top_k(field.top_k)
        .iter()
        .chain(north.top_k(field.top_k))
        .map(|e| e.category.clone())
        .unique()
        .collect();

    Some(CategorySeries {
        field: field.field.clone(),
        global_south: category_labels.iter().map(|c| south.percentage(c)).collect(),
        global_north: category_labels.iter().map(|c| north.percentage(c)).collect(),
        category_labels,
    })
}

/// Gaps of `field`; only the requested categories when `focus_only`
#[must_use]
pub fn gap_series(field: &FieldReport, focus_only: bool) -> Option<GapSeries> {
    let comparison = field.comparison.computed()?;
    let gaps = if focus_only {
        comparison.requested_gaps()
    } else {
        comparison.gaps()
    };
    Some(GapSeries {
        field: field.field.clone(),
        category_labels: gaps.iter().map(|g| g.category.clone()).collect(),
        gaps: gaps.iter().map(|g| g.gap).collect(),
    })
}

/// Valid-year trend of each group that has a year field
#[must_use]
pub fn trend_series(report: &SummaryReport) -> Vec<TrendSeries> {
    GroupLabel::ALL
        .iter()
        .filter_map(|&group| {
            report.group(group).stats.year.value().map(|y| TrendSeries {
                group,
                points: y.per_year.clone(),
            })
        })
        .collect()
}

/// Send every chart of `report` to `sink`; returns the number of charts
pub fn emit_charts(report: &SummaryReport, sink: &mut dyn ChartSink) -> Result<usize> {
    let mut emitted = 0;

    for field in report.fields() {
        if let Some(series) = category_series(field) {
            sink.categories(&format!("{}_comparison", field.field), &series)?;
            emitted += 1;
        }
        if let Some(series) = gap_series(field, false) {
            sink.gaps(&format!("{}_gaps", field.field), &series)?;
            emitted += 1;
        }
    }

    if let Some(focus) = report.focus_field().and_then(|f| report.field(f)) {
        if let Some(series) = gap_series(focus, true) {
            if !series.gaps.is_empty() {
                sink.gaps(&format!("{}_focus_gaps", focus.field), &series)?;
                emitted += 1;
            }
        }
    }

    let trends = trend_series(report);
    if !trends.is_empty() {
        sink.trends("publication_trends", &trends)?;
        emitted += 1;
    }

    log::info!("Emitted {emitted} chart series");
    Ok(emitted)
}

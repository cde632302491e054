//! Writes a finished report to the output directory
//!
//! Layout under the output root:
//! - `tables/` summary, distribution and gap CSV tables
//! - `reports/` narrative text report
//! - `graphics/` chart series (JSON)
//! - `summary.json` the full serialized report

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::error::util::ensure_directory;
use crate::models::GroupLabel;
use crate::report::charts::{JsonChartSink, emit_charts};
use crate::report::narrative::render_narrative;
use crate::report::tables::{SummaryTable, comparison_csv, distribution_csv};
use crate::report::SummaryReport;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_skipped};

/// Subdirectory for CSV tables
pub const TABLES_DIR: &str = "tables";
/// Subdirectory for text reports
pub const REPORTS_DIR: &str = "reports";
/// Subdirectory for chart series
pub const GRAPHICS_DIR: &str = "graphics";

/// File-system adapter for report artifacts
#[derive(Debug, Clone)]
pub struct ReportWriter {
    root: PathBuf,
}

impl ReportWriter {
    /// Writer rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output root and its subdirectories
    pub fn prepare(&self) -> Result<()> {
        for dir in [TABLES_DIR, REPORTS_DIR, GRAPHICS_DIR] {
            ensure_directory(&self.root.join(dir))?;
        }
        Ok(())
    }

    /// Write every artifact of `report`; returns the paths written
    pub fn write_all(
        &self,
        report: &SummaryReport,
        generated_at: NaiveDateTime,
    ) -> Result<Vec<PathBuf>> {
        let start = Instant::now();
        log_operation_start("Writing report artifacts to", &self.root);
        self.prepare()?;

        let mut written = self.write_tables(report)?;

        let narrative = self
            .root
            .join(REPORTS_DIR)
            .join("comparative_analysis_report.txt");
        fs::write(&narrative, render_narrative(report, generated_at))?;
        written.push(narrative);

        let mut sink = JsonChartSink::new(self.root.join(GRAPHICS_DIR));
        emit_charts(report, &mut sink)?;
        written.extend_from_slice(sink.written());

        let summary = self.root.join("summary.json");
        serde_json::to_writer_pretty(BufWriter::new(File::create(&summary)?), report)?;
        written.push(summary);

        log_operation_complete(
            "wrote",
            &self.root,
            written.len(),
            "artifacts",
            Some(start.elapsed()),
        );
        Ok(written)
    }

    fn write_tables(&self, report: &SummaryReport) -> Result<Vec<PathBuf>> {
        let tables = self.root.join(TABLES_DIR);
        let mut written = Vec::new();

        let summary = tables.join("summary_statistics.csv");
        fs::write(&summary, SummaryTable::from_report(report).to_csv())?;
        written.push(summary);

        for field in report.fields() {
            for group in GroupLabel::ALL {
                if let Some(dist) = field.distribution(group).computed() {
                    let path = tables.join(format!(
                        "{}_{}_distribution.csv",
                        group.code().to_lowercase(),
                        file_stem(&field.field)
                    ));
                    fs::write(&path, distribution_csv(dist, field.top_k))?;
                    written.push(path);
                }
            }
            match field.comparison.computed() {
                Some(comparison) => {
                    let path = tables.join(format!("{}_comparison.csv", file_stem(&field.field)));
                    fs::write(&path, comparison_csv(comparison))?;
                    written.push(path);
                }
                None => log_skipped(
                    "comparison table",
                    &field.field,
                    field.comparison.reason().unwrap_or("not applicable"),
                ),
            }
        }

        Ok(written)
    }
}

/// `name` with every character outside `[A-Za-z0-9_-]` replaced by `_`,
/// so field names never introduce path separators
#[must_use]
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() { "_".to_string() } else { stem }
}

//! Plain-text narrative report

use std::fmt::Write as _;

use chrono::NaiveDateTime;

use crate::models::GroupLabel;
use crate::report::SummaryReport;
use crate::report::tables::NOT_APPLICABLE;

/// Render the narrative report. `generated_at` only appears in the header,
/// so identical reports render identically for the same timestamp.
#[must_use]
pub fn render_narrative(report: &SummaryReport, generated_at: NaiveDateTime) -> String {
    let south = &report.group(GroupLabel::GlobalSouth).stats;
    let north = &report.group(GroupLabel::GlobalNorth).stats;
    let groups = report.group_comparison();

    let mut out = String::new();
    let _ = writeln!(out, "CORPUS COMPARISON REPORT");
    let _ = writeln!(out, "Generated on: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);

    let _ = writeln!(out, "DATASET OVERVIEW:");
    let _ = writeln!(out, "- Global South publications: {}", south.record_count);
    let _ = writeln!(out, "- Global North publications: {}", north.record_count);
    let _ = writeln!(out, "- Total publications analyzed: {}", groups.total_records);
    let _ = writeln!(out);

    let _ = writeln!(out, "1. PUBLICATION VOLUME:");
    let _ = writeln!(
        out,
        "   - GS/GN ratio: {}",
        groups
            .publication_ratio
            .display_with(|r| format!("{:.2}%", r * 100.0))
    );
    let _ = writeln!(
        out,
        "   - GS/GN ratio (valid years): {}",
        groups
            .valid_year_ratio
            .display_with(|r| format!("{:.2}%", r * 100.0))
    );
    let _ = writeln!(
        out,
        "   - Valid-year publication gap (GN - GS): {}",
        groups.valid_year_gap
    );
    for stats in [south, north] {
        let range = stats
            .year
            .value()
            .map_or_else(|| NOT_APPLICABLE.to_string(), |y| y.valid_range.to_string());
        let _ = writeln!(out, "   - Year range {}: {range}", stats.group.code());
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "2. ENGAGEMENT METRICS:");
    for numeric in report.numeric() {
        let cells: Vec<String> = GroupLabel::ALL
            .iter()
            .map(|&g| {
                let mean = numeric.group(g).computed().map_or_else(
                    || NOT_APPLICABLE.to_string(),
                    |s| s.mean.display_with(|m| format!("{m:.1}")),
                );
                format!("{} {mean}", g.code())
            })
            .collect();
        let _ = writeln!(out, "   - Average {}: {}", numeric.field, cells.join(" | "));
    }
    for stats in [south, north] {
        if let Some(ratio) = &stats.engagement_ratio {
            let _ = writeln!(
                out,
                "   - {} engagement ratio: {}",
                stats.group.code(),
                ratio.display_with(|r| format!("{r:.2}"))
            );
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "3. CATEGORICAL COMPARISON:");
    for field in report.fields() {
        match field.comparison.computed() {
            Some(cmp) => {
                let _ = writeln!(
                    out,
                    "   - {}: {} GS / {} GN categories, {} shared, {} GS-only, {} GN-only",
                    field.field,
                    cmp.categories_a(),
                    cmp.categories_b(),
                    cmp.common().len(),
                    cmp.only_a().len(),
                    cmp.only_b().len()
                );
                for shared in cmp.shared_top() {
                    let _ = writeln!(
                        out,
                        "       {}: GS {} ({:.1}%) vs GN {} ({:.1}%), gap {:+.1} pp",
                        shared.category,
                        shared.count_a,
                        shared.gap.pct_a,
                        shared.count_b,
                        shared.gap.pct_b,
                        shared.gap.gap
                    );
                }
            }
            None => {
                let reason = field.comparison.reason().unwrap_or(NOT_APPLICABLE);
                let _ = writeln!(out, "   - {}: not applicable ({reason})", field.field);
            }
        }
    }

    if let (Some(focus), Some(gaps)) = (report.focus_field(), report.focus_gaps()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "4. FOCUS CATEGORIES ({focus}, GS - GN):");
        for gap in gaps {
            let _ = writeln!(
                out,
                "   - {}: GS {:.1}% vs GN {:.1}% ({:+.1} pp)",
                gap.category, gap.pct_a, gap.pct_b, gap.gap
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::pipeline::analyze;
    use crate::sample::SampleSource;
    use chrono::NaiveDate;

    #[test]
    fn test_narrative_embeds_counts_and_timestamp() {
        let config = AnalysisConfig::default();
        let source = SampleSource::new(7, 40);
        let report = analyze(
            &config,
            source.generate(GroupLabel::GlobalSouth),
            source.generate(GroupLabel::GlobalNorth),
        )
        .unwrap();
        let at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap();

        let text = render_narrative(&report, at);
        assert!(text.contains("Generated on: 2024-03-01 09:30:00"));
        assert!(text.contains("- Global South publications: 40"));
        assert!(text.contains("- Total publications analyzed: 80"));
        assert!(text.contains("research_domain: not applicable"));
        assert_eq!(text, render_narrative(&report, at));
    }
}

//! End-to-end runs of the analysis pipeline

use chrono::NaiveDate;

use corpus_compare::report::SummaryTable;
use corpus_compare::{
    AnalysisConfig, AnalysisError, CategoricalField, DataSource, Dataset, GroupLabel,
    ReportWriter, SampleSource, Statistic, analyze, run,
};

use crate::utils::{categorical_dataset, minimal_config, write_file};

#[test]
fn test_same_input_same_report() {
    let config = AnalysisConfig::default().with_source(DataSource::Sample {
        seed: 5,
        records_per_group: 60,
    });
    let first = serde_json::to_string(&run(&config).unwrap()).unwrap();
    let second = serde_json::to_string(&run(&config).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_repeated_categorical_field_is_rejected() {
    let config = AnalysisConfig::default().with_categorical_fields(vec![
        CategoricalField::new("database", 5),
        CategoricalField::new("database", 10),
    ]);
    let source = SampleSource::new(2, 30);
    let result = analyze(
        &config,
        source.generate(GroupLabel::GlobalSouth),
        source.generate(GroupLabel::GlobalNorth),
    );
    assert!(matches!(result, Err(AnalysisError::Config(_))));
}

#[test]
fn test_focus_outside_categorical_fields_is_rejected() {
    let config = AnalysisConfig::default()
        .with_focus(Some("journal_quartile".into()), vec!["Q1".into()]);
    assert!(matches!(run(&config), Err(AnalysisError::Config(_))));
}

#[test]
fn test_production_csv_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let south = write_file(
        dir.path(),
        "gs.csv",
        &[
            "title,year,database,epistemic_category,views,downloads",
            "A,2020,Garuda,Library Science (LS),100,20",
            "B,,Garuda,,50,10",
            "C,2018,SINTA,Information Science (IS),30,0",
        ],
    );
    let north = write_file(
        dir.path(),
        "gn.csv",
        &[
            "title,year,database,epistemic_category,research_domain",
            "D,2021,Scopus,Information Science (IS),STEM",
            "E,0,Scopus,Information Science (IS),Humanities",
        ],
    );

    let config = AnalysisConfig::default().with_source(DataSource::Production { south, north });
    let report = run(&config).unwrap();

    let gs = report.group(GroupLabel::GlobalSouth);
    assert_eq!(gs.stats.record_count, 3);
    assert_eq!(gs.stats.valid_year_count(), Some(2));
    assert_eq!(gs.coerced.get("epistemic_category"), Some(&1));

    let gn = report.group(GroupLabel::GlobalNorth);
    assert_eq!(gn.stats.valid_year_count(), Some(1));
    assert!(gn.stats.absent_fields.contains(&"views".to_string()));

    let ratio = report.group_comparison().publication_ratio.value().unwrap();
    assert!((ratio - 1.5).abs() < 1e-9);
    assert_eq!(report.group_comparison().valid_year_gap.value(), Some(&-1));

    let epistemic = report.field("epistemic_category").unwrap();
    let comparison = epistemic.comparison.computed().unwrap();
    assert_eq!(comparison.common(), &["Information Science (IS)"]);
    assert!((comparison.gap("Information Science (IS)") - (100.0 / 3.0 - 100.0)).abs() < 1e-9);

    let focus = report.focus_gaps().unwrap();
    assert_eq!(focus.len(), 3);
    assert_eq!(focus[0].category, "Library and Information Science (LIS)");
    assert_eq!(focus[0].gap, 0.0);

    assert!(!report.field("country_final").unwrap().comparison.is_computed());
}

#[test]
fn test_missing_export_aborts_without_report() {
    let dir = tempfile::tempdir().unwrap();
    let south = write_file(dir.path(), "gs.csv", &["title,year", "A,2020"]);
    let config = AnalysisConfig::default().with_source(DataSource::Production {
        south,
        north: dir.path().join("missing.csv"),
    });

    let err = run(&config).unwrap_err();
    assert!(matches!(err, AnalysisError::SourceUnavailable { .. }));
    assert!(err.to_string().contains("missing.csv"));
}

#[test]
fn test_empty_north_group() {
    let south = categorical_dataset(GroupLabel::GlobalSouth, "cat", &["X", "X", "Y"]);
    let north = Dataset::new(GroupLabel::GlobalNorth, vec!["cat".into()], Vec::new());
    let report = analyze(&minimal_config(), south, north).unwrap();

    assert!(report.group_comparison().publication_ratio.is_undefined());
    let south_year = &report.group(GroupLabel::GlobalSouth).stats.year;
    assert!(matches!(south_year, Statistic::NotApplicable(reason) if reason.contains("year")));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["south"]["stats"]["year"]["status"], "not_applicable");

    let comparison = report.field("cat").unwrap().comparison.computed().unwrap();
    assert_eq!(comparison.only_a().len(), 2);
    assert!(comparison.only_b().is_empty());
    assert!((comparison.gap("X") - 200.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_summary_table_marks_undefined_cells() {
    let source = SampleSource::new(9, 25);
    let report = analyze(
        &AnalysisConfig::default(),
        source.generate(GroupLabel::GlobalSouth),
        source.generate(GroupLabel::GlobalNorth),
    )
    .unwrap();

    let table = SummaryTable::from_report(&report);
    let csv = table.to_csv();
    assert!(csv.contains("Total Publications,25,25"));
    assert!(csv.contains("Average Views,"));
    assert!(csv.lines().any(|l| l.starts_with("Average Views,") && l.ends_with(",N/A")));
}

#[test]
fn test_artifacts_written_outside_core() {
    let dir = tempfile::tempdir().unwrap();
    let config = AnalysisConfig::default()
        .with_source(DataSource::Sample {
            seed: 3,
            records_per_group: 20,
        })
        .with_output_dir(dir.path().join("out"));

    let report = run(&config).unwrap();
    assert!(!config.output_dir.exists());

    let at = NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap();
    let written = ReportWriter::new(&config.output_dir)
        .write_all(&report, at)
        .unwrap();

    assert!(!written.is_empty());
    let narrative = std::fs::read_to_string(
        config
            .output_dir
            .join("reports/comparative_analysis_report.txt"),
    )
    .unwrap();
    assert!(narrative.contains("Generated on: 2024-06-01 12:00:00"));
    let summary: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(config.output_dir.join("summary.json")).unwrap(),
    )
    .unwrap();
    assert!(summary.is_object());
}

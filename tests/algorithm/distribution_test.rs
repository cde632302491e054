//! Tests for categorical distributions and per-group descriptive statistics

use corpus_compare::algorithm::{distribution, with_valid_years};
use corpus_compare::pipeline::analyze_group;
use corpus_compare::{AnalysisConfig, Dataset, GroupLabel, SampleSource};

use crate::utils::{categorical_dataset, minimal_config, year_dataset};

#[test]
fn test_three_record_distribution() {
    let ds = categorical_dataset(GroupLabel::GlobalSouth, "cat", &["X", "X", "Y"]);
    let dist = distribution(&ds, "cat").unwrap();

    assert_eq!(dist.len(), 2);
    assert_eq!(dist.count("X"), 2);
    assert_eq!(dist.count("Y"), 1);
    assert!((dist.percentage("X") - 66.666).abs() < 0.01);
    assert!((dist.percentage("Y") - 33.333).abs() < 0.01);
    assert_eq!(dist.rank("X"), Some(0));
}

#[test]
fn test_counts_sum_to_record_count() {
    let config = AnalysisConfig::default();
    for seed in [1, 7, 42] {
        let raw = SampleSource::new(seed, 120).generate(GroupLabel::GlobalNorth);
        let analysis = analyze_group(&config, raw).unwrap();
        for field in ["database", "epistemic_category", "research_domain"] {
            let dist = analysis.distribution(field).unwrap();
            let total: usize = dist.entries().iter().map(|e| e.count).sum();
            assert_eq!(total, 120, "{field} with seed {seed}");
            let pct: f64 = dist.categories().map(|c| dist.percentage(c)).sum();
            assert!((pct - 100.0).abs() < 1e-9);
        }
    }
}

#[test]
fn test_empty_dataset_has_zero_percentages() {
    let ds = Dataset::new(GroupLabel::GlobalNorth, vec!["cat".into()], Vec::new());
    let dist = distribution(&ds, "cat").unwrap();
    assert!(dist.is_empty());
    assert_eq!(dist.percentage("anything"), 0.0);
}

#[test]
fn test_year_filter_keeps_raw_count() {
    let ds = year_dataset(
        GroupLabel::GlobalSouth,
        &[Some(2020), None, Some(2021), Some(0), Some(2019)],
    );
    let analysis = analyze_group(&minimal_config(), ds).unwrap();
    let stats = &analysis.stats;

    assert_eq!(stats.record_count, 5);
    let year = stats.year.value().unwrap();
    assert_eq!(year.valid_count, 3);
    assert_eq!(year.sentinel_count, 2);
    let range = year.valid_range.value().unwrap();
    assert_eq!((range.min, range.max), (2019, 2021));
    assert_eq!(year.per_year.len(), 3);
    assert_eq!(analysis.coerced.get("year"), Some(&1));
}

#[test]
fn test_valid_year_view() {
    let ds = year_dataset(GroupLabel::GlobalNorth, &[Some(2020), Some(0), Some(-3)]);
    let valid = with_valid_years(&ds, "year").unwrap();
    assert_eq!(valid.len(), 1);
    assert_eq!(ds.len(), 3);
}

//! Tests for cross-group comparison

use std::collections::BTreeSet;

use corpus_compare::algorithm::{Comparator, compare, compare_groups, distribution, top_shared};
use corpus_compare::pipeline::analyze_group;
use corpus_compare::{AnalysisConfig, Dataset, GroupLabel, SampleSource};

use crate::utils::{categorical_dataset, minimal_config};

#[test]
fn test_set_partition_and_gaps() {
    let a = categorical_dataset(GroupLabel::GlobalSouth, "cat", &["X", "X", "Y"]);
    let b = categorical_dataset(GroupLabel::GlobalNorth, "cat", &["Y", "Z"]);
    let result = compare(
        &distribution(&a, "cat").unwrap(),
        &distribution(&b, "cat").unwrap(),
    )
    .unwrap();

    assert_eq!(result.common(), &["Y"]);
    assert_eq!(result.only_a(), &["X"]);
    assert_eq!(result.only_b(), &["Z"]);
    assert!((result.gap("Y") - (100.0 / 3.0 - 50.0)).abs() < 1e-9);
    assert!((result.gap("X") - 200.0 / 3.0).abs() < 1e-9);
    assert!((result.gap("Z") + 50.0).abs() < 1e-9);
}

#[test]
fn test_set_properties_on_sample_corpora() {
    let config = AnalysisConfig::default();
    for seed in [3, 19, 2024] {
        let source = SampleSource::new(seed, 80);
        let south = analyze_group(&config, source.generate(GroupLabel::GlobalSouth)).unwrap();
        let north = analyze_group(&config, source.generate(GroupLabel::GlobalNorth)).unwrap();

        for field in ["database", "epistemic_category"] {
            let a = south.distribution(field).unwrap();
            let b = north.distribution(field).unwrap();
            let result = compare(a, b).unwrap();

            let cats_a: BTreeSet<&str> = a.categories().collect();
            let cats_b: BTreeSet<&str> = b.categories().collect();
            let common: BTreeSet<&str> = result.common().iter().map(String::as_str).collect();
            let only_a: BTreeSet<&str> = result.only_a().iter().map(String::as_str).collect();
            let only_b: BTreeSet<&str> = result.only_b().iter().map(String::as_str).collect();

            let expected_common: BTreeSet<&str> = cats_a.intersection(&cats_b).copied().collect();
            assert_eq!(common, expected_common);
            assert!(common.is_disjoint(&only_a) && common.is_disjoint(&only_b));
            let union_a: BTreeSet<&str> = common.union(&only_a).copied().collect();
            let union_b: BTreeSet<&str> = common.union(&only_b).copied().collect();
            assert_eq!(union_a, cats_a);
            assert_eq!(union_b, cats_b);

            for gap in result.gaps() {
                let expected = a.percentage(&gap.category) - b.percentage(&gap.category);
                assert!((gap.gap - expected).abs() < 1e-9);
            }
            assert_eq!(result.gaps().len(), cats_a.union(&cats_b).count());
        }
    }
}

#[test]
fn test_shared_pairs_are_keyed_by_category() {
    // Same categories, opposite popularity: a positional zip would pair
    // different labels.
    let a = categorical_dataset(GroupLabel::GlobalSouth, "cat", &["P", "P", "P", "Q", "Q", "R"]);
    let b = categorical_dataset(GroupLabel::GlobalNorth, "cat", &["R", "R", "R", "Q", "Q", "P"]);
    let a = distribution(&a, "cat").unwrap();
    let b = distribution(&b, "cat").unwrap();

    let shared = top_shared(&a, &b, 3);
    assert_eq!(shared.len(), 3);
    for pair in &shared {
        assert_eq!(pair.count_a, a.count(&pair.category));
        assert_eq!(pair.count_b, b.count(&pair.category));
        assert_eq!(Some(pair.rank_b), b.rank(&pair.category));
    }
    assert_eq!(shared[0].category, "P");
    assert_eq!((shared[0].rank_a, shared[0].rank_b), (0, 2));
}

#[test]
fn test_requested_categories_absent_everywhere() {
    let a = categorical_dataset(GroupLabel::GlobalSouth, "cat", &["X"]);
    let b = categorical_dataset(GroupLabel::GlobalNorth, "cat", &["Y"]);
    let result = Comparator::new()
        .with_requested(vec!["W".into(), "X".into(), "W".into()])
        .compare(&distribution(&a, "cat").unwrap(), &distribution(&b, "cat").unwrap())
        .unwrap();

    let requested = result.requested_gaps();
    assert_eq!(requested.len(), 2);
    assert_eq!(requested[0].category, "W");
    assert_eq!(requested[0].gap, 0.0);
    assert_eq!(requested[1].gap, 100.0);
}

#[test]
fn test_ratio_with_empty_north_is_undefined() {
    let config = minimal_config();
    let south = categorical_dataset(GroupLabel::GlobalSouth, "cat", &["X", "Y"]);
    let north = Dataset::new(GroupLabel::GlobalNorth, vec!["cat".into()], Vec::new());
    let south = analyze_group(&config, south).unwrap();
    let north = analyze_group(&config, north).unwrap();

    let groups = compare_groups(&south.stats, &north.stats);
    assert_eq!(groups.total_records, 2);
    assert!(groups.publication_ratio.is_undefined());
    assert!(groups.valid_year_ratio.is_not_applicable());
}

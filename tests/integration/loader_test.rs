//! Tests for loading exports from disk

use corpus_compare::{DatasetSource, FileSource, GroupLabel, Value};

use crate::utils::write_file;

#[test]
fn test_file_source_labels_each_group() {
    let dir = tempfile::tempdir().unwrap();
    let south = write_file(dir.path(), "gs.csv", &["title,year", "A,2020", "B,2019"]);
    let north = write_file(dir.path(), "gn.csv", &["title,research_domain", "C,STEM"]);
    let source = FileSource::new(&south, &north);

    let gs = source.load(GroupLabel::GlobalSouth).unwrap();
    let gn = source.load(GroupLabel::GlobalNorth).unwrap();
    assert_eq!(gs.label(), GroupLabel::GlobalSouth);
    assert_eq!(gs.len(), 2);
    assert_eq!(gn.fields(), &["title", "research_domain"]);
    assert!(source.describe().contains("gs.csv"));
}

#[test]
fn test_all_empty_column_is_still_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "gs.csv", &["title,database", "A,", "B,"]);
    let ds = FileSource::new(&path, &path)
        .load(GroupLabel::GlobalSouth)
        .unwrap();

    assert!(ds.has_field("database"));
    assert!(ds.column("database").all(Value::is_missing));
}

#[test]
fn test_numeric_strings_in_year_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "gn.csv",
        &["title,year", "A,2020", "B,unknown", "C,2021"],
    );
    let ds = FileSource::new(&path, &path)
        .load(GroupLabel::GlobalNorth)
        .unwrap();

    let years: Vec<Option<i64>> = ds.column("year").map(Value::as_i64).collect();
    assert_eq!(years, vec![Some(2020), None, Some(2021)]);
}

use std::io::Write;
use std::path::{Path, PathBuf};

use corpus_compare::{AnalysisConfig, CategoricalField, Dataset, GroupLabel, Record, Value};

/// Dataset with a single categorical column `field`
#[must_use]
pub fn categorical_dataset(label: GroupLabel, field: &str, values: &[&str]) -> Dataset {
    let records = values
        .iter()
        .map(|v| Record::from_pairs([(field, Value::from(*v))]))
        .collect();
    Dataset::from_records(label, records)
}

/// Dataset with a single `year` column
#[must_use]
pub fn year_dataset(label: GroupLabel, years: &[Option<i64>]) -> Dataset {
    let records = years
        .iter()
        .map(|y| Record::from_pairs([("year", y.map_or(Value::Missing, Value::Int))]))
        .collect();
    Dataset::from_records(label, records)
}

/// Configuration analysing only `cat` and `year`
#[must_use]
pub fn minimal_config() -> AnalysisConfig {
    AnalysisConfig::default()
        .with_numeric_fields(Vec::new())
        .with_engagement_ratio(None)
        .with_categorical_fields(vec![CategoricalField::new("cat", 5)])
        .with_focus(None, Vec::new())
}

/// Write `lines` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("create test file");
    for line in lines {
        writeln!(file, "{line}").expect("write test file");
    }
    path
}

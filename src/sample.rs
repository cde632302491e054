//! Seeded sample corpora
//!
//! Generates two small bibliographic corpora with the quirks real exports
//! have: the schemas drift (the Global North export has no engagement
//! columns, the Global South export has no `research_domain`), some years are
//! missing or zero, and some categorical cells are empty. The same seed always
//! yields the same records.

use rand::prelude::*;

use crate::error::Result;
use crate::loader::DatasetSource;
use crate::models::{Dataset, GroupLabel, Record, Value};

const SOUTH_FIELDS: &[&str] = &[
    "title",
    "author",
    "year",
    "database",
    "epistemic_category",
    "country_final",
    "views",
    "downloads",
    "citations",
];

const NORTH_FIELDS: &[&str] = &[
    "document_id",
    "title",
    "year",
    "database",
    "epistemic_category",
    "research_domain",
    "citations",
    "journal_quartile",
];

const SOUTH_DATABASES: &[&str] = &["Garuda", "Google Scholar", "SINTA", "DOAJ", "Scopus"];
const NORTH_DATABASES: &[&str] = &["Web of Science", "Scopus", "ProQuest", "EBSCO"];

const EPISTEMIC_CATEGORIES: &[&str] = &[
    "Library and Information Science (LIS)",
    "Information Science (IS)",
    "Library Science (LS)",
    "Archival Science",
    "Knowledge Management",
    "Digital Humanities",
];

const SOUTH_COUNTRIES: &[&str] = &[
    "Indonesia",
    "Brazil",
    "India",
    "Nigeria",
    "South Africa",
    "Mexico",
];

const AUTHORS: &[&str] = &["Smith, J", "Johnson, M", "Garcia, L", "Lee, K", "Wang, Y"];
const RESEARCH_DOMAINS: &[&str] = &["Social Sciences", "Humanities", "STEM", "Medical"];
const QUARTILES: &[&str] = &["Q1", "Q2", "Q3", "Q4"];

/// Probability that a year cell is empty
const MISSING_YEAR_RATE: f64 = 0.08;
/// Probability that a year cell holds 0
const ZERO_YEAR_RATE: f64 = 0.03;
/// Probability that a categorical cell is empty
const MISSING_CATEGORY_RATE: f64 = 0.10;

/// Deterministic generator for both corpora
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSource {
    seed: u64,
    records_per_group: usize,
}

impl SampleSource {
    /// Generator for `records_per_group` records per group
    #[must_use]
    pub const fn new(seed: u64, records_per_group: usize) -> Self {
        Self {
            seed,
            records_per_group,
        }
    }

    /// Generate the corpus of `group`
    #[must_use]
    pub fn generate(&self, group: GroupLabel) -> Dataset {
        let group_salt = match group {
            GroupLabel::GlobalSouth => 0x5eed_0001,
            GroupLabel::GlobalNorth => 0x5eed_0002,
        };
        let mut rng = StdRng::seed_from_u64(self.seed ^ group_salt);

        let records = (0..self.records_per_group)
            .map(|i| match group {
                GroupLabel::GlobalSouth => south_record(&mut rng, i),
                GroupLabel::GlobalNorth => north_record(&mut rng, i),
            })
            .collect();

        let fields = match group {
            GroupLabel::GlobalSouth => SOUTH_FIELDS,
            GroupLabel::GlobalNorth => NORTH_FIELDS,
        };
        Dataset::new(
            group,
            fields.iter().map(|f| (*f).to_string()).collect(),
            records,
        )
    }
}

impl DatasetSource for SampleSource {
    fn describe(&self) -> String {
        format!(
            "sample data (seed {}, {} records per group)",
            self.seed, self.records_per_group
        )
    }

    fn load(&self, group: GroupLabel) -> Result<Dataset> {
        Ok(self.generate(group))
    }
}

/// Pick from `options`, skewed towards the front of the list
fn skewed<'a>(rng: &mut StdRng, options: &[&'a str]) -> &'a str {
    let a = rng.random_range(0..options.len());
    let b = rng.random_range(0..options.len());
    options[a.min(b)]
}

fn year(rng: &mut StdRng) -> Value {
    if rng.random_bool(MISSING_YEAR_RATE) {
        Value::Missing
    } else if rng.random_bool(ZERO_YEAR_RATE) {
        Value::Int(0)
    } else {
        Value::Int(rng.random_range(2010..2023))
    }
}

fn category(rng: &mut StdRng, options: &[&str]) -> Value {
    if rng.random_bool(MISSING_CATEGORY_RATE) {
        Value::Missing
    } else {
        Value::from(skewed(rng, options))
    }
}

fn south_record(rng: &mut StdRng, i: usize) -> Record {
    let views = rng.random_range(0..500_i64);
    // Downloads never exceed views; about a fifth of records have none.
    let downloads = if rng.random_bool(0.2) {
        0
    } else {
        rng.random_range(0..=views / 3)
    };
    Record::from_pairs([
        ("title", Value::from(format!("Research on Coloniality Study {i}"))),
        ("author", Value::from(AUTHORS[i % AUTHORS.len()])),
        ("year", year(rng)),
        ("database", category(rng, SOUTH_DATABASES)),
        ("epistemic_category", category(rng, EPISTEMIC_CATEGORIES)),
        ("country_final", category(rng, SOUTH_COUNTRIES)),
        ("views", Value::Int(views)),
        ("downloads", Value::Int(downloads)),
        ("citations", Value::Int(rng.random_range(0..150))),
    ])
}

fn north_record(rng: &mut StdRng, i: usize) -> Record {
    Record::from_pairs([
        ("document_id", Value::from(format!("DOC_{i:04}"))),
        ("title", Value::from(format!("Global North Research {i}"))),
        ("year", year(rng)),
        ("database", category(rng, NORTH_DATABASES)),
        ("epistemic_category", category(rng, EPISTEMIC_CATEGORIES)),
        ("research_domain", category(rng, RESEARCH_DOMAINS)),
        ("citations", Value::Int(rng.random_range(0..100))),
        ("journal_quartile", Value::from(QUARTILES[i % QUARTILES.len()])),
    ])
}

//! Categorical distributions
//!
//! Counts normalized category values of one field within one dataset. The
//! canonical order is descending count with ties kept in first-encountered
//! order. Percentages always use the dataset's total record count as the
//! denominator, so shares of different fields in one report stay comparable.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Dataset, GroupLabel};

/// Occurrences of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category label
    pub category: String,
    /// Number of records in this category
    pub count: usize,
}

/// Category counts of one field within one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDistribution {
    field: String,
    group: GroupLabel,
    total_records: usize,
    entries: Vec<CategoryCount>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl FieldDistribution {
    /// Field counted
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Group the dataset belongs to
    #[must_use]
    pub const fn group(&self) -> GroupLabel {
        self.group
    }

    /// Record count of the originating dataset (percentage denominator)
    #[must_use]
    pub const fn total_records(&self) -> usize {
        self.total_records
    }

    /// All categories in canonical order
    #[must_use]
    pub fn entries(&self) -> &[CategoryCount] {
        &self.entries
    }

    /// Number of distinct categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no category was counted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `category` occurs
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.index.contains_key(category)
    }

    /// Count of `category`; 0 when absent
    #[must_use]
    pub fn count(&self, category: &str) -> usize {
        self.index
            .get(category)
            .map_or(0, |&i| self.entries[i].count)
    }

    /// Zero-based position of `category` in canonical order
    #[must_use]
    pub fn rank(&self, category: &str) -> Option<usize> {
        self.index.get(category).copied()
    }

    /// Share of records in `category`, in percent; 0 when absent
    #[must_use]
    pub fn percentage(&self, category: &str) -> f64 {
        percentage_of(self.count(category), self.total_records)
    }

    /// Sum of all category counts
    #[must_use]
    pub fn counted(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// The `k` most frequent categories; all of them when `k` exceeds the
    /// number of categories
    #[must_use]
    pub fn top_k(&self, k: usize) -> &[CategoryCount] {
        &self.entries[..k.min(self.entries.len())]
    }

    /// Category labels in canonical order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.category.as_str())
    }
}

/// `count / total * 100`, or 0 for an empty dataset
#[must_use]
pub fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Count the categories of `field` in a normalized `dataset`.
///
/// Fails with `SchemaError` if the field is absent; callers check presence
/// first. Values still missing (dataset not normalized) are not counted.
pub fn distribution(dataset: &Dataset, field: &str) -> Result<FieldDistribution> {
    dataset.require_field(field)?;

    let mut entries: Vec<CategoryCount> = Vec::new();
    let mut first_seen: FxHashMap<String, usize> = FxHashMap::default();
    let mut skipped = 0_usize;

    for value in dataset.column(field) {
        let Some(category) = value.as_category() else {
            skipped += 1;
            continue;
        };
        if let Some(&i) = first_seen.get(&category) {
            entries[i].count += 1;
        } else {
            first_seen.insert(category.clone(), entries.len());
            entries.push(CategoryCount { category, count: 1 });
        }
    }

    if skipped > 0 {
        log::warn!(
            "{}: {skipped} missing values in '{field}' were not counted; normalize first",
            dataset.label()
        );
    }

    // Stable sort keeps first-encountered order among equal counts.
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    let index = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.category.clone(), i))
        .collect();

    log::debug!(
        "{} '{field}': {} categories over {} records",
        dataset.label(),
        entries.len(),
        dataset.len()
    );

    Ok(FieldDistribution {
        field: field.to_string(),
        group: dataset.label(),
        total_records: dataset.len(),
        entries,
        index,
    })
}

//! Cross-group comparison
//!
//! Compares two distributions of the same field: shared and group-specific
//! category sets, and percentage-point gaps. Gaps are signed `A - B` where A
//! is the first distribution passed in (the Global South in the pipeline).
//! A category absent from one group has a share of 0 there.
//!
//! Shared categories are paired by category identity, never by position in
//! the two groups' independently sorted rankings.

use itertools::Itertools;
use serde::Serialize;

use crate::algorithm::descriptive::GroupStats;
use crate::algorithm::distribution::FieldDistribution;
use crate::error::{AnalysisError, Result};
use crate::models::statistic::ratio;
use crate::models::{GroupLabel, Statistic};

/// Percentage-point difference for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGap {
    /// Category label
    pub category: String,
    /// Share in group A, percent
    pub pct_a: f64,
    /// Share in group B, percent
    pub pct_b: f64,
    /// `pct_a - pct_b`
    pub gap: f64,
}

impl CategoryGap {
    fn between(a: &FieldDistribution, b: &FieldDistribution, category: &str) -> Self {
        let pct_a = a.percentage(category);
        let pct_b = b.percentage(category);
        Self {
            category: category.to_string(),
            pct_a,
            pct_b,
            gap: pct_a - pct_b,
        }
    }
}

/// A category present in both groups, joined by label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedCategory {
    /// Category label
    pub category: String,
    /// Count in group A
    pub count_a: usize,
    /// Count in group B
    pub count_b: usize,
    /// Zero-based rank in group A
    pub rank_a: usize,
    /// Zero-based rank in group B
    pub rank_b: usize,
    /// Percent-share gap for this category
    pub gap: CategoryGap,
}

/// Comparison of one field across two groups
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    field: String,
    group_a: GroupLabel,
    group_b: GroupLabel,
    categories_a: usize,
    categories_b: usize,
    common: Vec<String>,
    only_a: Vec<String>,
    only_b: Vec<String>,
    gaps: Vec<CategoryGap>,
    shared_top: Vec<SharedCategory>,
    requested_gaps: Vec<CategoryGap>,
}

impl ComparisonResult {
    /// Field compared
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// First group (gap minuend)
    #[must_use]
    pub const fn group_a(&self) -> GroupLabel {
        self.group_a
    }

    /// Second group (gap subtrahend)
    #[must_use]
    pub const fn group_b(&self) -> GroupLabel {
        self.group_b
    }

    /// Distinct categories in group A
    #[must_use]
    pub const fn categories_a(&self) -> usize {
        self.categories_a
    }

    /// Distinct categories in group B
    #[must_use]
    pub const fn categories_b(&self) -> usize {
        self.categories_b
    }

    /// Categories present in both groups, in A's canonical order
    #[must_use]
    pub fn common(&self) -> &[String] {
        &self.common
    }

    /// Categories only in A, in A's canonical order
    #[must_use]
    pub fn only_a(&self) -> &[String] {
        &self.only_a
    }

    /// Categories only in B, in B's canonical order
    #[must_use]
    pub fn only_b(&self) -> &[String] {
        &self.only_b
    }

    /// Gaps for every category seen in either group: A's order, then B-only
    #[must_use]
    pub fn gaps(&self) -> &[CategoryGap] {
        &self.gaps
    }

    /// Top shared categories, ranked by A and paired by label
    #[must_use]
    pub fn shared_top(&self) -> &[SharedCategory] {
        &self.shared_top
    }

    /// Gaps for explicitly requested categories, present or not
    #[must_use]
    pub fn requested_gaps(&self) -> &[CategoryGap] {
        &self.requested_gaps
    }

    /// Gap for `category`; 0 when it occurs in neither group
    #[must_use]
    pub fn gap(&self, category: &str) -> f64 {
        self.gaps
            .iter()
            .chain(self.requested_gaps.iter())
            .find(|g| g.category == category)
            .map_or(0.0, |g| g.gap)
    }
}

/// Compares distributions, optionally pairing top shared and requested categories
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    shared_top_k: usize,
    requested: Vec<String>,
}

impl Comparator {
    /// Create a comparator with no shared ranking and no requested categories
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair up to `k` shared categories
    #[must_use]
    pub const fn with_shared_top_k(mut self, k: usize) -> Self {
        self.shared_top_k = k;
        self
    }

    /// Report gaps for these categories even if neither group has them
    #[must_use]
    pub fn with_requested(mut self, categories: Vec<String>) -> Self {
        self.requested = categories;
        self
    }

    /// Compare two distributions of the same field
    pub fn compare(&self, a: &FieldDistribution, b: &FieldDistribution) -> Result<ComparisonResult> {
        if a.field() != b.field() {
            return Err(AnalysisError::Config(format!(
                "cannot compare distributions of different fields: '{}' vs '{}'",
                a.field(),
                b.field()
            )));
        }

        let (common, only_a): (Vec<String>, Vec<String>) = a
            .categories()
            .map(str::to_string)
            .partition(|c| b.contains(c));
        let only_b: Vec<String> = b
            .categories()
            .filter(|c| !a.contains(c))
            .map(str::to_string)
            .collect();

        let gaps = a
            .categories()
            .chain(only_b.iter().map(String::as_str))
            .map(|c| CategoryGap::between(a, b, c))
            .collect();

        let shared_top = top_shared(a, b, self.shared_top_k);

        let requested_gaps = self
            .requested
            .iter()
            .unique()
            .map(|c| CategoryGap::between(a, b, c))
            .collect();

        log::debug!(
            "'{}': {} common, {} only {}, {} only {}",
            a.field(),
            common.len(),
            only_a.len(),
            a.group(),
            only_b.len(),
            b.group()
        );

        Ok(ComparisonResult {
            field: a.field().to_string(),
            group_a: a.group(),
            group_b: b.group(),
            categories_a: a.len(),
            categories_b: b.len(),
            common,
            only_a,
            only_b,
            gaps,
            shared_top,
            requested_gaps,
        })
    }
}

/// Compare two distributions with default settings
pub fn compare(a: &FieldDistribution, b: &FieldDistribution) -> Result<ComparisonResult> {
    Comparator::new().compare(a, b)
}

/// Up to `k` categories present in both groups, in A's ranking, each joined
/// to B's entry for the same label
#[must_use]
pub fn top_shared(a: &FieldDistribution, b: &FieldDistribution, k: usize) -> Vec<SharedCategory> {
    a.entries()
        .iter()
        .enumerate()
        .filter_map(|(rank_a, entry)| {
            b.rank(&entry.category).map(|rank_b| SharedCategory {
                category: entry.category.clone(),
                count_a: entry.count,
                count_b: b.count(&entry.category),
                rank_a,
                rank_b,
                gap: CategoryGap::between(a, b, &entry.category),
            })
        })
        .take(k)
        .collect()
}

/// Group-level scalars comparing the two corpora
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComparison {
    /// Records in both groups together
    pub total_records: usize,
    /// South record count over North record count
    pub publication_ratio: Statistic<f64>,
    /// The same ratio over records with a valid year
    pub valid_year_ratio: Statistic<f64>,
    /// North minus South count of records with a valid year
    pub valid_year_gap: Statistic<i64>,
}

/// Compare the record counts of the two groups
#[must_use]
pub fn compare_groups(south: &GroupStats, north: &GroupStats) -> GroupComparison {
    let publication_ratio = ratio(
        south.record_count as f64,
        north.record_count as f64,
        "GS/GN publication ratio",
    );

    let (valid_year_ratio, valid_year_gap) =
        match (south.valid_year_count(), north.valid_year_count()) {
            (Some(s), Some(n)) => (
                ratio(s as f64, n as f64, "GS/GN valid-year publication ratio"),
                Statistic::Value(n as i64 - s as i64),
            ),
            _ => {
                let reason = "year field absent from at least one group".to_string();
                (
                    Statistic::NotApplicable(reason.clone()),
                    Statistic::NotApplicable(reason),
                )
            }
        };

    GroupComparison {
        total_records: south.record_count + north.record_count,
        publication_ratio,
        valid_year_ratio,
        valid_year_gap,
    }
}

//! Analysis algorithms
//!
//! Normalization, per-group descriptive statistics, categorical distributions
//! and cross-group comparison. Every function here is pure over its inputs.

pub mod comparison;
pub mod descriptive;
pub mod distribution;
pub mod normalize;
pub mod quality;

pub use comparison::{
    CategoryGap, Comparator, ComparisonResult, GroupComparison, SharedCategory, compare,
    compare_groups, top_shared,
};
pub use descriptive::{GroupDescriptor, GroupStats, NumericSummary, YearRange, YearStats};
pub use distribution::{CategoryCount, FieldDistribution, distribution, percentage_of};
pub use normalize::{NormalizedDataset, Normalizer, UNKNOWN_CATEGORY, with_valid_years};
pub use quality::{DataQuality, profile};

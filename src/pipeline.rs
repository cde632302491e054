//! End-to-end analysis run
//!
//! load both groups -> per group (profile, normalize, describe, distribute)
//! -> join -> compare -> assemble. Per-group work runs on both groups
//! concurrently; everything after the join reads both sides read-only.

use std::time::Instant;

use log::info;

use crate::algorithm::comparison::{Comparator, ComparisonResult, compare_groups};
use crate::algorithm::descriptive::GroupDescriptor;
use crate::algorithm::distribution::distribution;
use crate::algorithm::normalize::Normalizer;
use crate::algorithm::quality::profile;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::loader::{DatasetSource, source_for};
use crate::models::{Dataset, GroupLabel};
use crate::report::{GroupAnalysis, Outcome, ReportAssembler, SummaryReport};
use crate::schema::{Requirement, check_requirement, schema_drift};
use crate::utils::logging::{log_schema_drift, log_skipped};

/// Run the analysis on the source named by `config`
pub fn run(config: &AnalysisConfig) -> Result<SummaryReport> {
    config.validate()?;
    let source = source_for(config);
    run_with_source(config, source.as_ref())
}

/// Run the analysis on an injected source.
///
/// Both groups are loaded before any analysis starts, so a load failure
/// aborts the run without a partial report.
pub fn run_with_source(
    config: &AnalysisConfig,
    source: &dyn DatasetSource,
) -> Result<SummaryReport> {
    info!("Loading corpora from {}", source.describe());
    let south = source.load(GroupLabel::GlobalSouth)?;
    let north = source.load(GroupLabel::GlobalNorth)?;
    analyze(config, south, north)
}

/// Analyse two raw datasets
pub fn analyze(config: &AnalysisConfig, south: Dataset, north: Dataset) -> Result<SummaryReport> {
    config.validate()?;
    let start = Instant::now();

    let (only_south, only_north) = schema_drift(&south, &north);
    log_schema_drift(&only_south, &only_north);

    let (south, north) = rayon::join(
        || analyze_group(config, south),
        || analyze_group(config, north),
    );
    let (south, north) = (south?, north?);

    let comparisons = compare_fields(config, &south, &north)?;
    let groups = compare_groups(&south.stats, &north.stats);
    let report = ReportAssembler::from_config(config).assemble(south, north, comparisons, groups);

    info!("Analysis completed in {:?}", start.elapsed());
    Ok(report)
}

/// Everything that needs only one group's records
pub fn analyze_group(config: &AnalysisConfig, raw: Dataset) -> Result<GroupAnalysis> {
    let quality = profile(&raw);
    let normalized = Normalizer::from_config(config).normalize(raw);
    let dataset = &normalized.dataset;
    let stats = GroupDescriptor::from_config(config).describe(dataset);

    let mut distributions = Vec::with_capacity(config.categorical_fields.len());
    for field in &config.categorical_fields {
        let requirement = Requirement::Categorical(field.name.clone());
        let outcome = match check_requirement(dataset, &requirement).reason() {
            None => Outcome::Computed(distribution(dataset, &field.name)?),
            Some(reason) => Outcome::NotApplicable(reason),
        };
        distributions.push((field.name.clone(), outcome));
    }

    Ok(GroupAnalysis {
        stats,
        quality,
        coerced: normalized.coerced,
        distributions,
    })
}

/// Compare every configured categorical field present in both groups
pub fn compare_fields(
    config: &AnalysisConfig,
    south: &GroupAnalysis,
    north: &GroupAnalysis,
) -> Result<Vec<(String, Outcome<ComparisonResult>)>> {
    let mut comparisons = Vec::with_capacity(config.categorical_fields.len());

    for field in &config.categorical_fields {
        let name = field.name.as_str();
        let mut comparator = Comparator::new().with_shared_top_k(config.shared_top_k);
        if config.focus_field.as_deref() == Some(name) {
            comparator = comparator.with_requested(config.focus_categories.clone());
        }

        let outcome = match (south.distribution(name), north.distribution(name)) {
            (Some(a), Some(b)) => Outcome::Computed(comparator.compare(a, b)?),
            _ => {
                let absent = [south, north]
                    .iter()
                    .filter(|g| g.distribution(name).is_none())
                    .map(|g| g.group().to_string())
                    .collect::<Vec<_>>()
                    .join(" and ");
                log_skipped("comparison", name, &format!("absent from {absent}"));
                Outcome::NotApplicable(format!("{name} absent from the {absent} dataset"))
            }
        };
        comparisons.push((field.name.clone(), outcome));
    }

    Ok(comparisons)
}

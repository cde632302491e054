//! Logging utilities
//!
//! Uniform messages for file operations and for the places where the analysis
//! degrades instead of failing.

use std::path::Path;
use std::time::Duration;

use crate::models::GroupLabel;

/// Log the start of a file operation
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log the completion of a file operation
///
/// # Arguments
/// * `operation` - Past-tense verb ("loaded", "wrote")
/// * `path` - Path of the file or directory that was operated on
/// * `count` - Number of units processed
/// * `unit` - What was counted ("records", "artifacts")
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    count: usize,
    unit: &str,
    elapsed: Option<Duration>,
) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {operation} {count} {unit} at {} in {duration:?}",
            path.display()
        ),
        None => log::info!("Successfully {operation} {count} {unit} at {}", path.display()),
    }
}

/// Warn about columns present in only one of the two groups
pub fn log_schema_drift(only_south: &[String], only_north: &[String]) {
    if only_south.is_empty() && only_north.is_empty() {
        return;
    }
    log::warn!(
        "Schema drift: only in {}: [{}]; only in {}: [{}]",
        GroupLabel::GlobalSouth,
        only_south.join(", "),
        GroupLabel::GlobalNorth,
        only_north.join(", ")
    );
}

/// Warn that an output for `field` was skipped
pub fn log_skipped(what: &str, field: &str, reason: &str) {
    log::warn!("Skipping {what} of '{field}': {reason}");
}

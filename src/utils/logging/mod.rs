//! Logging utilities for output and progress tracking

pub mod log;
pub mod progress;

pub use log::{log_operation_complete, log_operation_start, log_schema_drift, log_skipped};
pub use progress::{create_spinner, finish_progress_bar};

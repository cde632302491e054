//! Utility helpers
//!
//! Arrow cell extraction for file-backed sources, and logging/progress helpers
//! shared by the pipeline and the CLI.

pub mod arrow;
pub mod logging;

//! Utility functions for error handling
//!
//! File helpers that translate filesystem failures into the analysis error
//! kinds, naming the path involved.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{AnalysisError, Result};

/// Open an input file, reporting failures as `SourceUnavailable`
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn open_source_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(AnalysisError::source_unavailable(
            path.display().to_string(),
            format!("file not found (needed for {purpose})"),
        ));
    }

    if !path.is_file() {
        return Err(AnalysisError::source_unavailable(
            path.display().to_string(),
            format!("path is not a file (expected a file for {purpose})"),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let reason = match e.kind() {
            io::ErrorKind::PermissionDenied => "permission denied - check file permissions".to_string(),
            io::ErrorKind::NotFound => "file was removed during the operation".to_string(),
            _ => format!("failed to open file for {purpose}: {e}"),
        };
        AnalysisError::source_unavailable(path.display().to_string(), reason)
    })
}

/// Ensure an output directory exists, creating it (and parents) if needed
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(AnalysisError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists and is not a directory", path.display()),
        )));
    }

    fs::create_dir_all(path)?;
    Ok(())
}

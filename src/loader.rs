//! Dataset loading
//!
//! `DatasetSource` is the `load(source) -> Dataset` boundary. `FileSource`
//! reads `.csv` (schema inferred by Arrow) and `.parquet` exports;
//! `SampleSource` (see `sample`) generates seeded corpora. Any failure to
//! produce a dataset is reported as `SourceUnavailable` naming the source.

use std::io::Seek;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::{AnalysisConfig, DataSource};
use crate::error::util::open_source_file;
use crate::error::{AnalysisError, Result};
use crate::models::{Dataset, GroupLabel};
use crate::sample::SampleSource;
use crate::utils::arrow::batch_to_records;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Rows per Arrow batch when decoding files
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Something that can produce the dataset of either group
pub trait DatasetSource: Send + Sync {
    /// Short description for logs
    fn describe(&self) -> String;

    /// Load the dataset of `group`
    fn load(&self, group: GroupLabel) -> Result<Dataset>;
}

/// Exports on disk, one file per group
#[derive(Debug, Clone)]
pub struct FileSource {
    south: PathBuf,
    north: PathBuf,
}

impl FileSource {
    /// Source reading the two given files
    pub fn new(south: impl Into<PathBuf>, north: impl Into<PathBuf>) -> Self {
        Self {
            south: south.into(),
            north: north.into(),
        }
    }

    /// File holding `group`'s records
    #[must_use]
    pub fn path(&self, group: GroupLabel) -> &Path {
        match group {
            GroupLabel::GlobalSouth => &self.south,
            GroupLabel::GlobalNorth => &self.north,
        }
    }
}

impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        format!(
            "files ({}, {})",
            self.south.display(),
            self.north.display()
        )
    }

    fn load(&self, group: GroupLabel) -> Result<Dataset> {
        read_dataset(self.path(group), group)
    }
}

/// Build the source named by `config`
#[must_use]
pub fn source_for(config: &AnalysisConfig) -> Box<dyn DatasetSource> {
    match &config.source {
        DataSource::Sample {
            seed,
            records_per_group,
        } => Box::new(SampleSource::new(*seed, *records_per_group)),
        DataSource::Production { south, north } => Box::new(FileSource::new(south, north)),
    }
}

/// Read one export into a dataset labelled `group`.
///
/// The schema is the file's column list, so a column that exists but is
/// entirely empty still counts as present.
pub fn read_dataset(path: &Path, group: GroupLabel) -> Result<Dataset> {
    let start = Instant::now();
    log_operation_start(&format!("Loading {group} records from"), path);

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let (fields, batches) = match extension.as_deref() {
        Some("csv") => read_csv(path),
        Some("parquet") => read_parquet(path),
        _ => Err(AnalysisError::source_unavailable(
            path.display().to_string(),
            "unsupported file type (expected .csv or .parquet)",
        )),
    }?;

    let mut records = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
    for batch in &batches {
        records.extend(batch_to_records(batch).map_err(|e| unavailable(path, &e))?);
    }

    log_operation_complete(
        "loaded",
        path,
        records.len(),
        "records",
        Some(start.elapsed()),
    );
    Ok(Dataset::new(group, fields, records))
}

fn unavailable(path: &Path, err: &dyn std::fmt::Display) -> AnalysisError {
    AnalysisError::source_unavailable(path.display().to_string(), err.to_string())
}

fn read_csv(path: &Path) -> Result<(Vec<String>, Vec<RecordBatch>)> {
    let mut file = open_source_file(path, "reading CSV export")?;

    let format = Format::default().with_header(true);
    let (schema, _) = format
        .infer_schema(&mut file, None)
        .map_err(|e| unavailable(path, &e))?;
    file.rewind().map_err(|e| unavailable(path, &e))?;

    let fields = schema.fields().iter().map(|f| f.name().clone()).collect();
    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_header(true)
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build(file)
        .map_err(|e| unavailable(path, &e))?;

    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| unavailable(path, &e))?;
    Ok((fields, batches))
}

fn read_parquet(path: &Path) -> Result<(Vec<String>, Vec<RecordBatch>)> {
    let file = open_source_file(path, "reading parquet export")?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| unavailable(path, &e))?
        .with_batch_size(DEFAULT_BATCH_SIZE);
    let fields = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().map_err(|e| unavailable(path, &e))?;

    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| unavailable(path, &e))?;
    Ok((fields, batches))
}

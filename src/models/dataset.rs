//! Group-labelled datasets
//!
//! A `Dataset` is an ordered sequence of records together with the set of
//! fields its source declared. The field list is the dataset's schema: a field
//! that is listed but null in a row is *present but missing*, while a field
//! that is not listed is *absent* and any statistic over it is not applicable.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AnalysisError, Result};
use crate::models::record::{Record, Value};

/// The two corpora being compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GroupLabel {
    /// Global South corpus
    GlobalSouth,
    /// Global North corpus
    GlobalNorth,
}

impl GroupLabel {
    /// Both groups in reporting order
    pub const ALL: [Self; 2] = [Self::GlobalSouth, Self::GlobalNorth];

    /// Short code used in table headers
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::GlobalSouth => "GS",
            Self::GlobalNorth => "GN",
        }
    }

    /// Column name used in tabular outputs
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::GlobalSouth => "Global_South",
            Self::GlobalNorth => "Global_North",
        }
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlobalSouth => write!(f, "Global South"),
            Self::GlobalNorth => write!(f, "Global North"),
        }
    }
}

/// Records of one group plus the fields declared by their source
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    label: GroupLabel,
    fields: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Create a dataset with an explicit schema
    #[must_use]
    pub fn new(label: GroupLabel, fields: Vec<String>, records: Vec<Record>) -> Self {
        Self {
            label,
            fields,
            records,
        }
    }

    /// Create a dataset whose schema is the union of the records' fields,
    /// in first-seen order
    #[must_use]
    pub fn from_records(label: GroupLabel, records: Vec<Record>) -> Self {
        let mut fields: Vec<String> = Vec::new();
        for record in &records {
            for name in record.field_names() {
                if !fields.iter().any(|f| f == name) {
                    fields.push(name.to_string());
                }
            }
        }
        Self::new(label, fields, records)
    }

    /// Group this dataset belongs to
    #[must_use]
    pub const fn label(&self) -> GroupLabel {
        self.label
    }

    /// Declared fields in source order
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Whether `field` is part of this dataset's schema
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Fail with `SchemaError` when `field` is absent
    pub fn require_field(&self, field: &str) -> Result<()> {
        if self.has_field(field) {
            Ok(())
        } else {
            Err(AnalysisError::missing_field(field, self.label))
        }
    }

    /// All records, in source order
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Total record count
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values of one column, in record order
    pub fn column<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.records.iter().map(move |r| r.get(field))
    }

    /// A new dataset with the same label and schema, keeping rows matching `keep`
    #[must_use]
    pub fn filtered<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Record) -> bool,
    {
        let records = self.records.iter().filter(|r| keep(*r)).cloned().collect();
        Self::new(self.label, self.fields.clone(), records)
    }

    /// Rebuild the dataset with transformed records, keeping label and schema
    #[must_use]
    pub fn map_records<F>(self, f: F) -> Self
    where
        F: FnMut(Record) -> Record,
    {
        let records = self.records.into_iter().map(f).collect();
        Self::new(self.label, self.fields, records)
    }
}

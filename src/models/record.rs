//! Record-level values
//!
//! A `Record` is one publication row: an ordered mapping from field name to a
//! loosely typed `Value`. Two corpora are not guaranteed to share the same
//! fields, so records carry their own keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    Str(String),
    /// Missing (null, empty, or absent from this record)
    Missing,
}

static MISSING: Value = Value::Missing;

impl Value {
    /// Whether this value counts as missing.
    ///
    /// NaN floats and blank strings are treated the same as an explicit null,
    /// matching how tabular readers surface empty cells.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Float(f) => f.is_nan(),
            Self::Str(s) => s.trim().is_empty(),
            Self::Int(_) => false,
        }
    }

    /// Numeric view of the value, parsing numeric strings
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) if f.is_finite() => Some(*f),
            Self::Str(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    /// Integer view of the value; fractional values are truncated
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(_) | Self::Str(_) => self.as_f64().map(|f| f.trunc() as i64),
            Self::Missing => None,
        }
    }

    /// Category label for the value, or `None` if missing
    #[must_use]
    pub fn as_category(&self) -> Option<String> {
        if self.is_missing() {
            return None;
        }
        match self {
            Self::Str(s) => Some(s.trim().to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{f:.0}")),
            Self::Float(f) => Some(f.to_string()),
            Self::Missing => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Missing => write!(f, "NA"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// One publication row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(field, value)` pairs; later duplicates win
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut record = Self::new();
        for (k, v) in pairs {
            record.set(k, v);
        }
        record
    }

    /// Value of `field`; fields the record does not carry read as missing
    #[must_use]
    pub fn get(&self, field: &str) -> &Value {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map_or(&MISSING, |(_, value)| value)
    }

    /// Whether the record carries `field` at all (even as missing)
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.values.iter().any(|(name, _)| name == field)
    }

    /// Set or replace the value of `field`
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        if let Some(slot) = self.values.iter_mut().find(|(name, _)| *name == field) {
            slot.1 = value;
        } else {
            self.values.push((field, value));
        }
    }

    /// Field names in insertion order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }
}

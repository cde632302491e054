//! Arrow data handling utilities
//!
//! Conversion of Arrow record batches into the dynamically typed records the
//! analysis works on.

pub mod extractors;

pub use extractors::{batch_to_records, column_values};

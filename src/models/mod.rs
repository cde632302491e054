//! Domain models for corpus comparison
//!
//! Records, datasets and group labels shared by every analysis stage.

pub mod dataset;
pub mod record;
pub mod statistic;

pub use dataset::{Dataset, GroupLabel};
pub use record::{Record, Value};
pub use statistic::Statistic;

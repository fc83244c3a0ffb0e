//! # Bikeshare Data
//!
//! Rental record model, CSV loading with row validation, inclusive date
//! ranges and the immutable dataset snapshot every aggregation reads from.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod dataset;
pub mod loader;
pub mod range;
pub mod record;

pub use dataset::Dataset;
pub use loader::{load_daily, load_hourly, read_records};
pub use range::DateRange;
pub use record::{RentalRecord, TableKind};

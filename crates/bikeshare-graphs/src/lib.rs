//! # Bikeshare Graphs
//!
//! Bucketizing, aggregation and chart rendering for bike sharing rental data.
//!
//! Aggregations read an immutable [`bikeshare_data::Dataset`] snapshot and
//! produce plain serializable values; renderers turn chart data sets into
//! self-contained SVG documents using plotters.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod bar;
pub mod bucketizer;
pub mod factors;
pub mod metrics;
pub mod pie;
pub mod renderer;
pub mod summary;
pub mod types;

#[cfg(test)]
mod test_support;

pub use aggregator::{CategoryTotal, MonthlyTotal, SeriesPoint, UserSplit, YearSeries};
pub use bar::BarChartRenderer;
pub use bucketizer::{bucket_index, bucket_labels, bucketize, Bucket, BUCKET_COUNT, BUCKET_EDGES};
pub use factors::{bucketize_all, bucketize_factor, EnvironmentalFactor, FactorBuckets};
pub use metrics::{HolidayMetrics, UserMetrics};
pub use pie::PieChartRenderer;
pub use renderer::{GraphRenderer, LineChartRenderer};
pub use summary::RentalSummary;
pub use types::*;

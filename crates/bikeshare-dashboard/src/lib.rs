//! # Bikeshare Dashboard
//!
//! Command-line dashboard generator: loads the daily and hourly datasets,
//! bounds them to a reporting window, aggregates them and writes a single
//! self-contained `index.html` (plus an optional `summary.json`).

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod html;
pub mod output;
pub mod sections;

pub use cli::Cli;
pub use html::{render_page, PageContent};
pub use output::{generate, generate_from, DashboardReport, INDEX_FILE, SUMMARY_FILE};
pub use sections::{Chart, Section, SectionBuilder};

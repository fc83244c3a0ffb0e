//! # Bikeshare Config
//!
//! Type-safe configuration management for the bike sharing dashboard.
//!
//! Configuration is read from TOML, overlaid with `BIKESHARE_*` environment
//! variables and validated before use.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;

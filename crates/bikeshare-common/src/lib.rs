//! # Bikeshare Common
//!
//! Shared types, utilities, and common functionality for the bike sharing
//! dashboard.
//!
//! This crate provides the error type, logging setup and categorical domain
//! types used across all other crates in the workspace.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{BikeshareError, Result};
pub use logging::{init_logging, LoggingConfig};
pub use types::*;
pub use utils::*;

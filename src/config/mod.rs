//! Client configuration and constants.
//!
//! This module provides:
//! - xkcd API constants (hosts, paths) and network limits
//! - The `ClientConfig` type and its validation
//! - The `xkcd` command-line options (`Opt`)
//! - Log level and format selection types

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use cli::Opt;
pub use types::{ClientConfig, ConfigValidationError, LogFormat, LogLevel};

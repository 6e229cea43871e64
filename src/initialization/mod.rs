//! Client and logger initialization.
//!
//! This module provides the functions that set up shared resources:
//! - The HTTP client (redirects disabled, timeouts, user agent)
//! - The process-wide logger (binaries only)

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

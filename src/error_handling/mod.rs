//! Error handling.
//!
//! This module provides:
//! - `XkcdError`, the single error type of the fetch/parse pipeline
//! - `ErrorKind`, a stable category for each error
//! - Transport error categorization (timeouts vs other network failures)
//! - The retry backoff schedule offered to callers
//!
//! Nothing in the library retries internally. Whether an error is worth
//! retrying is reported by `XkcdError::is_retriable`; acting on it is up to
//! the caller.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, get_retry_strategy};
pub use types::{ErrorKind, InitializationError, XkcdError};

//! Error categorization and retry strategy.
//!
//! This module maps transport errors onto `XkcdError` and provides the backoff
//! schedule callers use when they choose to retry.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::XkcdError;

/// Creates an exponential backoff retry strategy.
///
/// Returns a retry strategy configured with:
/// - Initial delay: `RETRY_INITIAL_DELAY_MS` milliseconds
/// - Backoff factor: `RETRY_FACTOR`
/// - Maximum delay: `RETRY_MAX_DELAY_SECS` seconds
/// - At most `retries` delays (one per retry after the initial attempt)
///
/// The library itself never retries; this is for callers such as the CLI.
pub fn get_retry_strategy(retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_INITIAL_DELAY_MS)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(retries)
}

/// Categorizes a `reqwest::Error` into an `XkcdError`.
///
/// Timeouts become `XkcdError::Timeout`; every other transport problem is a
/// `NetworkFailure` carrying the original error.
pub fn categorize_reqwest_error(error: reqwest::Error) -> XkcdError {
    if error.is_timeout() {
        log::debug!("Request timed out: {}", error);
        XkcdError::Timeout
    } else {
        XkcdError::NetworkFailure(error)
    }
}

impl From<reqwest::Error> for XkcdError {
    fn from(error: reqwest::Error) -> Self {
        categorize_reqwest_error(error)
    }
}

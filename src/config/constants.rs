//! Configuration constants.
//!
//! This module defines the wire constants of the xkcd API along with the
//! timeouts, size limits and retry parameters used throughout the crate.

// xkcd API endpoints
/// Base URL of the JSON metadata API (`https://xkcd.com/<id>/info.0.json`)
pub const API_BASE_URL: &str = "https://xkcd.com";
/// Base URL of the random-comic redirector
pub const RANDOM_BASE_URL: &str = "https://c.xkcd.com";
/// Path suffix appended to `/<id>` for the metadata document
pub const API_SUFFIX: &str = "/info.0.json";
/// Path on `RANDOM_BASE_URL` that answers with a 302 to a random comic
pub const RANDOM_PATH: &str = "/random/comic";

// Network operation timeouts
/// Total per-request timeout in seconds (connect + headers + body)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via `ClientConfig::user_agent` or the
/// `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!("xkcd_client/", env!("CARGO_PKG_VERSION"));

// Response and body size limits
/// Maximum number of bytes read off a rejected response before the
/// connection is given up instead of being returned to the pool (64KB)
pub const MAX_DRAIN_BYTES: usize = 64 * 1024;

// Retry strategy (caller side only; the library never retries on its own)
/// Initial delay in milliseconds before first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 15;
/// Default number of retries the CLI performs on retriable errors
pub const RETRY_DEFAULT_ATTEMPTS: usize = 2;

// HTTP status codes (for clarity and consistency)
/// 429 Too Many Requests; retriable like a 5xx
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

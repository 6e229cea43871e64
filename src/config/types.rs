//! Configuration types.
//!
//! This module defines the client configuration and the enums used by the
//! CLI to select log verbosity and format.

use clap::ValueEnum;
use thiserror::Error;

use crate::config::constants::{
    API_BASE_URL, DEFAULT_USER_AGENT, RANDOM_BASE_URL, REQUEST_TIMEOUT_SECS,
    TCP_CONNECT_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Client configuration.
///
/// Both base URLs can be pointed at a local server, which is how the tests
/// exercise the fetcher without touching the real API.
///
/// # Examples
///
/// ```
/// use xkcd_client::ClientConfig;
///
/// let config = ClientConfig {
///     timeout_seconds: 30,
///     ..Default::default()
/// };
/// assert_eq!(config.api_base_url, "https://xkcd.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL for `/<id>/info.0.json` requests
    pub api_base_url: String,

    /// Base URL for the `/random/comic` redirector
    pub random_base_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// TCP connect timeout in seconds
    pub connect_timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            random_base_url: RANDOM_BASE_URL.to_string(),
            timeout_seconds: REQUEST_TIMEOUT_SECS,
            connect_timeout_seconds: TCP_CONNECT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// A `ClientConfig` field holding an unusable value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field.
    pub field: &'static str,
    /// What is wrong and what is expected instead.
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl ClientConfig {
    /// Checks that the configuration can be used to build a client.
    ///
    /// # Errors
    ///
    /// Returns the first problem found:
    /// - base URLs must be absolute `http` or `https` URLs
    /// - timeouts must be greater than 0
    /// - the user agent must not be empty
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("api_base_url", &self.api_base_url),
            ("random_base_url", &self.random_base_url),
        ] {
            let url = url::Url::parse(value).map_err(|e| {
                ConfigValidationError::new(
                    field,
                    format!("{:?} is not an absolute URL ({}), e.g. https://xkcd.com", value, e),
                )
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigValidationError::new(
                    field,
                    format!("scheme must be http or https, got {:?}", url.scheme()),
                ));
            }
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::new(
                "timeout_seconds",
                "must be greater than 0",
            ));
        }
        if self.connect_timeout_seconds == 0 {
            return Err(ConfigValidationError::new(
                "connect_timeout_seconds",
                "must be greater than 0",
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "user_agent",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// Returns a config whose API and random base URLs both point at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            api_base_url: base_url.clone(),
            random_base_url: base_url,
            ..Default::default()
        }
    }
}

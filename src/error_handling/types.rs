//! Error type definitions.
//!
//! This module defines the error returned by every fetch and parse operation,
//! its stable classification, and the errors raised while setting up the
//! logger and HTTP client.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use reqwest::StatusCode;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::config::{ConfigValidationError, HTTP_STATUS_TOO_MANY_REQUESTS};

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error")]
    LoggerError(#[from] SetLoggerError),

    /// The client configuration was rejected before building the HTTP client.
    #[error("Configuration error")]
    ConfigError(#[from] ConfigValidationError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors returned by comic fetching, parsing and image download.
///
/// A call either yields a fully validated value or one of these; there is no
/// partially populated result.
#[derive(Error, Debug)]
pub enum XkcdError {
    /// The requested comic id is below 1. No request was made.
    #[error("invalid comic number ({0})")]
    InvalidArgument(i64),

    /// Transport-level failure (DNS, connect, TLS, broken body stream).
    #[error("network failure")]
    NetworkFailure(#[source] ReqwestError),

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The request was abandoned through the client's cancellation token.
    #[error("request cancelled")]
    Cancelled,

    /// The server answered with an unexpected status.
    ///
    /// Renders as `error: <code> <reason>`, e.g. `error: 404 Not Found`.
    /// Existing callers match on that exact text.
    #[error("error: {0}")]
    HttpStatus(StatusCode),

    /// The random-comic endpoint did not answer with an inspectable 302.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// The body was not a JSON object of the expected shape.
    #[error("malformed JSON")]
    MalformedJson(#[from] serde_json::Error),

    /// One of `year`, `month`, `day` is not base-10 integer text.
    #[error("invalid {field} component: {value:?}")]
    InvalidDateComponent {
        /// Wire name of the offending field.
        field: &'static str,
        /// The raw wire value.
        value: String,
    },

    /// The date components normalize to a date outside the supported range.
    #[error("date out of range: year {year}, month {month}, day {day}")]
    DateOutOfRange {
        /// Parsed year.
        year: i32,
        /// Parsed month.
        month: i32,
        /// Parsed day.
        day: i32,
    },

    /// A `~` path was given but no home directory could be determined.
    #[error("could not determine home directory")]
    HomeDirUnavailable,

    /// The HTTP client could not be built.
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// Local file system failure while writing a downloaded image.
    #[error("I/O error on {}", path.display())]
    Io {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Stable classification of an `XkcdError`.
///
/// Useful for metrics and for callers that only care about the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
#[allow(missing_docs)] // one per `XkcdError` variant, see there
pub enum ErrorKind {
    InvalidArgument,
    NetworkFailure,
    Timeout,
    Cancelled,
    HttpStatus,
    ProtocolViolation,
    MalformedJson,
    InvalidDateComponent,
    DateOutOfRange,
    Initialization,
    /// Local file system errors, including an unknown home directory
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    /// Human-readable label, stable across releases.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "Invalid argument",
            ErrorKind::NetworkFailure => "Network failure",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::HttpStatus => "HTTP status error",
            ErrorKind::ProtocolViolation => "Protocol violation",
            ErrorKind::MalformedJson => "Malformed JSON",
            ErrorKind::InvalidDateComponent => "Invalid date component",
            ErrorKind::DateOutOfRange => "Date out of range",
            ErrorKind::Initialization => "Initialization error",
            ErrorKind::Io => "I/O error",
        }
    }
}

impl XkcdError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            XkcdError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            XkcdError::NetworkFailure(_) => ErrorKind::NetworkFailure,
            XkcdError::Timeout => ErrorKind::Timeout,
            XkcdError::Cancelled => ErrorKind::Cancelled,
            XkcdError::HttpStatus(_) => ErrorKind::HttpStatus,
            XkcdError::ProtocolViolation(_) => ErrorKind::ProtocolViolation,
            XkcdError::MalformedJson(_) => ErrorKind::MalformedJson,
            XkcdError::InvalidDateComponent { .. } => ErrorKind::InvalidDateComponent,
            XkcdError::DateOutOfRange { .. } => ErrorKind::DateOutOfRange,
            XkcdError::Initialization(_) => ErrorKind::Initialization,
            XkcdError::HomeDirUnavailable | XkcdError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Returns the HTTP status for `HttpStatus` errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            XkcdError::HttpStatus(status) => Some(*status),
            _ => None,
        }
    }

    /// Determines if an error is transient and worth retrying by the caller.
    ///
    /// # Retriable Errors
    ///
    /// - Timeouts and transport failures
    /// - Server errors (5xx HTTP status codes)
    /// - Rate limiting (429 Too Many Requests)
    ///
    /// Everything else (bad ids, 404, malformed payloads, cancellation, local
    /// I/O) fails the same way on every attempt.
    pub fn is_retriable(&self) -> bool {
        match self {
            XkcdError::Timeout | XkcdError::NetworkFailure(_) => true,
            XkcdError::HttpStatus(status) => {
                status.as_u16() == HTTP_STATUS_TOO_MANY_REQUESTS || status.is_server_error()
            }
            _ => false,
        }
    }
}

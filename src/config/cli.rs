//! Command-line options for the `xkcd` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::config::constants::{
    DEFAULT_USER_AGENT, REQUEST_TIMEOUT_SECS, RETRY_DEFAULT_ATTEMPTS,
};
use crate::config::types::{ClientConfig, LogFormat, LogLevel};

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Comic 1024
/// xkcd 1024
///
/// # A random comic as JSON, saving its image
/// xkcd --random --json --download ~/comics/today.png
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "xkcd",
    version,
    about = "Fetches xkcd comics from the JSON API."
)]
pub struct Opt {
    /// Comic number; a random comic is fetched when omitted
    #[arg(allow_negative_numbers = true)]
    pub id: Option<i64>,

    /// Fetch a random comic
    #[arg(long, conflicts_with = "id")]
    pub random: bool,

    /// Print the comic as pretty JSON
    #[arg(long, conflicts_with = "dump")]
    pub json: bool,

    /// Print every field of the comic
    #[arg(long)]
    pub dump: bool,

    /// Save the comic image to this path (`~` is expanded)
    #[arg(long, value_parser)]
    pub download: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Extra attempts for timeouts, network failures, 429 and 5xx responses
    #[arg(long, default_value_t = RETRY_DEFAULT_ATTEMPTS)]
    pub retries: usize,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    /// Builds the client configuration selected by these options.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout_seconds: self.timeout,
            user_agent: self.user_agent.clone(),
            ..Default::default()
        }
    }
}

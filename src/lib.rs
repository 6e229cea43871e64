//! xkcd_client library: typed access to the xkcd JSON API
//!
//! This library fetches comic metadata from `https://xkcd.com/<id>/info.0.json`,
//! resolves random comics through the `c.xkcd.com` redirector without following
//! the redirect, validates the payload into an immutable [`Comic`], and can
//! download comic images to disk.
//!
//! # Example
//!
//! ```no_run
//! use xkcd_client::{ClientConfig, XkcdClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = XkcdClient::new(ClientConfig::default())?;
//!
//! let comic = client.fetch_comic(1024).await?;
//! println!("[{}]: \"{}\"", comic.date_label(), comic.title());
//!
//! let random = client.fetch_random_comic().await?;
//! random.download_image(&client, "~/comics/random.png").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Errors and retries
//!
//! Every operation returns [`XkcdError`]. Nothing is retried internally; use
//! [`XkcdError::is_retriable`] together with [`get_retry_strategy`] to retry
//! on the caller side.
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod comic;
pub mod config;
mod error_handling;
mod fetch;
pub mod initialization;

// Re-export public API
pub use comic::{parse_comic, Comic};
pub use config::{ClientConfig, ConfigValidationError, LogFormat, LogLevel};
pub use error_handling::{
    categorize_reqwest_error, get_retry_strategy, ErrorKind, InitializationError, XkcdError,
};
pub use fetch::{
    download_image, expand_path, fetch_comic, fetch_image_bytes, fetch_random_comic,
    fetch_random_comic_id, XkcdClient,
};
pub use tokio_util::sync::CancellationToken;

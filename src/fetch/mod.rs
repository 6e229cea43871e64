//! Comic fetching.
//!
//! This module issues the HTTP requests against the xkcd API:
//! - `/<id>/info.0.json` for one comic, parsed into a [`Comic`]
//! - `/random/comic` on the random host, whose 302 `Location` names a comic
//! - Image downloads (see [`XkcdClient::download_image`])
//!
//! Redirects are never followed. Every response body is read to the end or
//! drained before a call returns, and nothing is retried internally.

mod image;
mod redirects;
mod request;
mod response;


use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use log::{debug, warn};
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use crate::comic::{parse_comic, Comic};
use crate::config::ClientConfig;
use crate::error_handling::{InitializationError, XkcdError};
use crate::initialization::init_client;

pub use image::expand_path;

/// Client for the xkcd JSON API.
///
/// Holds one HTTP client (with its connection pool) and the base URLs. It has
/// no other state, so clones are cheap and may be used from many tasks at once.
///
/// # Example
///
/// ```no_run
/// use xkcd_client::{ClientConfig, XkcdClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = XkcdClient::new(ClientConfig::default())?;
/// let comic = client.fetch_comic(1024).await?;
/// println!("[{}]: \"{}\"\n{}", comic.date_label(), comic.title(), comic.img());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct XkcdClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    cancel: Option<CancellationToken>,
}

impl XkcdClient {
    /// Creates a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::ConfigError` if `config` does not
    /// validate, or `InitializationError::HttpClientError` if the HTTP client
    /// cannot be built (e.g. no TLS backend available).
    pub fn new(config: ClientConfig) -> Result<Self, InitializationError> {
        let http = init_client(&config)?;
        Ok(Self {
            http,
            config: Arc::new(config),
            cancel: None,
        })
    }

    /// Makes every subsequent request on this client abort with
    /// `XkcdError::Cancelled` once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches and parses comic `id`.
    ///
    /// # Errors
    ///
    /// - `XkcdError::InvalidArgument` if `id < 1` (no request is made)
    /// - `XkcdError::HttpStatus` for any status but 200; a missing comic
    ///   renders as `error: 404 Not Found`
    /// - `XkcdError::Timeout`, `XkcdError::Cancelled`, `XkcdError::NetworkFailure`
    /// - any error of [`parse_comic`]
    pub async fn fetch_comic(&self, id: i64) -> Result<Comic, XkcdError> {
        if id < 1 {
            return Err(XkcdError::InvalidArgument(id));
        }

        let url = request::comic_url(&self.config.api_base_url, id);
        let body = self
            .cancellable(async {
                let resp = self.get(&url).await?;
                response::read_body(resp, StatusCode::OK).await
            })
            .await?;

        let comic = parse_comic(&body)?;
        if i64::from(comic.id()) != id {
            warn!("Requested comic {} but {} answered with comic {}", id, url, comic.id());
        }
        Ok(comic)
    }

    /// Asks the random-comic endpoint for a comic number.
    ///
    /// The endpoint answers `302 Found` with a `Location` naming the chosen
    /// comic; the redirect is not followed.
    ///
    /// # Errors
    ///
    /// `XkcdError::ProtocolViolation` if the status is not 302 or the
    /// `Location` is missing or does not name a comic, plus transport errors.
    pub async fn fetch_random_comic_id(&self) -> Result<u32, XkcdError> {
        let url = request::random_url(&self.config.random_base_url);
        let location = self
            .cancellable(async {
                let resp = self.get(&url).await?;
                response::redirect_location(resp).await
            })
            .await?;

        let id = redirects::comic_id_from_location(&url, &location)?;
        debug!("Random comic resolved to {} via {:?}", id, location);
        Ok(id)
    }

    /// Fetches a random comic: [`fetch_random_comic_id`](Self::fetch_random_comic_id)
    /// followed by [`fetch_comic`](Self::fetch_comic). Errors of either step are
    /// returned as they are.
    pub async fn fetch_random_comic(&self) -> Result<Comic, XkcdError> {
        let id = self.fetch_random_comic_id().await?;
        self.fetch_comic(i64::from(id)).await
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, XkcdError> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        debug!("GET {} -> {}", url, resp.status());
        Ok(resp)
    }

    /// Runs `fut` unless the cancellation token fires first.
    async fn cancellable<T, F>(&self, fut: F) -> Result<T, XkcdError>
    where
        F: Future<Output = Result<T, XkcdError>>,
    {
        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(XkcdError::Cancelled),
                    result = fut => result,
                }
            }
            None => fut.await,
        }
    }
}

fn default_client() -> Result<XkcdClient, XkcdError> {
    Ok(XkcdClient::new(ClientConfig::default())?)
}

/// Fetches comic `id` with a fresh default client.
///
/// See [`XkcdClient::fetch_comic`].
pub async fn fetch_comic(id: i64) -> Result<Comic, XkcdError> {
    if id < 1 {
        return Err(XkcdError::InvalidArgument(id));
    }
    default_client()?.fetch_comic(id).await
}

/// Resolves a random comic number with a fresh default client.
pub async fn fetch_random_comic_id() -> Result<u32, XkcdError> {
    default_client()?.fetch_random_comic_id().await
}

/// Fetches a random comic with a fresh default client.
pub async fn fetch_random_comic() -> Result<Comic, XkcdError> {
    default_client()?.fetch_random_comic().await
}

/// Downloads the bytes at `url` with a fresh default client.
pub async fn fetch_image_bytes(url: &str) -> Result<Bytes, XkcdError> {
    default_client()?.fetch_image_bytes(url).await
}

/// Downloads `url` into `path` (with `~` expansion) using a fresh default client.
pub async fn download_image(url: &str, path: impl AsRef<Path>) -> Result<PathBuf, XkcdError> {
    default_client()?.download_image(url, path).await
}

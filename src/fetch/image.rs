//! Comic image download.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use log::{debug, info};
use reqwest::StatusCode;
use tokio::io::AsyncWriteExt;

use super::{response, XkcdClient};
use crate::comic::Comic;
use crate::error_handling::XkcdError;

/// Expands a leading `~` to the current user's home directory.
///
/// `~/comics/x.png` and `~comics/x.png` both land under the home directory;
/// any other path is returned unchanged.
///
/// # Errors
///
/// Returns `XkcdError::HomeDirUnavailable` if the path starts with `~` and no
/// home directory is known.
pub fn expand_path(path: &Path) -> Result<PathBuf, XkcdError> {
    let Some(rest) = path.to_str().and_then(|p| p.strip_prefix('~')) else {
        return Ok(path.to_path_buf());
    };
    let home = home::home_dir().ok_or(XkcdError::HomeDirUnavailable)?;
    Ok(home.join(rest.trim_start_matches(['/', '\\'])))
}

fn absolute(path: PathBuf) -> Result<PathBuf, XkcdError> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().map_err(|source| XkcdError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(cwd.join(path))
}

impl XkcdClient {
    /// Downloads an image and returns its bytes.
    ///
    /// # Errors
    ///
    /// `XkcdError::HttpStatus` for anything but 200, plus the usual transport
    /// errors.
    pub async fn fetch_image_bytes(&self, url: &str) -> Result<Bytes, XkcdError> {
        self.cancellable(async {
            let resp = self.get(url).await?;
            response::read_body(resp, StatusCode::OK).await
        })
        .await
    }

    /// Downloads an image into a local file and returns the absolute path written.
    ///
    /// A leading `~` in `path` is expanded to the home directory. The file is
    /// only created once the server has answered 200; if the body transfer
    /// fails or is cancelled afterwards the partial file is removed.
    pub async fn download_image(
        &self,
        url: &str,
        path: impl AsRef<Path>,
    ) -> Result<PathBuf, XkcdError> {
        let path = absolute(expand_path(path.as_ref())?)?;

        let resp = self
            .cancellable(async {
                let resp = self.get(url).await?;
                response::ensure_status(resp, StatusCode::OK).await
            })
            .await?;
        let written = self.write_body(resp, &path).await?;

        info!("Saved {} ({} bytes) to {}", url, written, path.display());
        Ok(path)
    }

    /// Streams `resp` into a new file at `path`, removing it again on any failure.
    async fn write_body(&self, resp: reqwest::Response, path: &Path) -> Result<u64, XkcdError> {
        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|source| XkcdError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        // cancellation drops only the copy, so the cleanup below still runs
        let result = self.cancellable(copy_chunks(resp, &mut file, path)).await;
        if result.is_err() {
            drop(file);
            if tokio::fs::remove_file(path).await.is_ok() {
                debug!("Removed partial download {}", path.display());
            }
        }
        result
    }
}

async fn copy_chunks(
    mut resp: reqwest::Response,
    file: &mut tokio::fs::File,
    path: &Path,
) -> Result<u64, XkcdError> {
    let io_err = |source: std::io::Error| XkcdError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut written = 0u64;
    while let Some(chunk) = resp.chunk().await? {
        file.write_all(&chunk).await.map_err(io_err)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(io_err)?;
    Ok(written)
}

impl Comic {
    /// Downloads this comic's image to `path`; see [`XkcdClient::download_image`].
    pub async fn download_image(
        &self,
        client: &XkcdClient,
        path: impl AsRef<Path>,
    ) -> Result<PathBuf, XkcdError> {
        client.download_image(self.img(), path).await
    }
}

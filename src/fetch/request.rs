//! Request URL construction.
//!
//! The xkcd API has exactly two request shapes: the metadata document of one
//! comic, and the random-comic redirector.

use crate::config::{API_SUFFIX, RANDOM_PATH};

/// Builds `{base}/{id}/info.0.json`.
pub(crate) fn comic_url(api_base_url: &str, id: i64) -> String {
    format!("{}/{}{}", api_base_url.trim_end_matches('/'), id, API_SUFFIX)
}

/// Builds `{base}/random/comic`.
pub(crate) fn random_url(random_base_url: &str) -> String {
    format!("{}{}", random_base_url.trim_end_matches('/'), RANDOM_PATH)
}

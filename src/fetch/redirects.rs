//! Redirect inspection for the random-comic endpoint.
//!
//! `c.xkcd.com/random/comic` answers with `302 Found` and a `Location` such as
//! `https://xkcd.com/1234/`. The redirect is never followed; the comic number
//! is read straight out of the header.

use url::Url;

use crate::error_handling::XkcdError;

/// Extracts the comic id from a `Location` header value.
///
/// The location may be absolute or relative; it is resolved against the URL
/// of the request that produced it, and the first non-empty path segment must
/// be a decimal id of at least 1.
///
/// # Errors
///
/// Returns `XkcdError::ProtocolViolation` if the location cannot be resolved
/// or does not start with a positive decimal id.
pub(crate) fn comic_id_from_location(request_url: &str, location: &str) -> Result<u32, XkcdError> {
    let target = Url::parse(request_url)
        .and_then(|base| base.join(location))
        .map_err(|e| {
            XkcdError::ProtocolViolation(format!("unusable Location {:?}: {}", location, e))
        })?;

    let segment = target
        .path_segments()
        .and_then(|mut segments| segments.find(|segment| !segment.is_empty()))
        .ok_or_else(|| {
            XkcdError::ProtocolViolation(format!("Location {:?} has no comic number", location))
        })?;

    match segment.parse::<u32>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(XkcdError::ProtocolViolation(format!(
            "Location {:?} does not name a comic number",
            location
        ))),
    }
}

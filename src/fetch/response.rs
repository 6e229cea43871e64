//! Response consumption.
//!
//! Every function here takes the `reqwest::Response` by value and either reads
//! its body to the end or drains it before returning, so the connection is
//! released (back to the pool, or closed) on every path out of a fetch.

use bytes::Bytes;
use log::{debug, warn};
use reqwest::{Response, StatusCode};

use crate::config::MAX_DRAIN_BYTES;
use crate::error_handling::XkcdError;

/// Reads and discards the rest of a response body.
///
/// Stops after `MAX_DRAIN_BYTES`; the response is then dropped and the
/// connection closed rather than reused. Read errors are logged and swallowed
/// since the caller is already on a failure path.
pub(crate) async fn drain(mut response: Response) {
    let url = response.url().to_string();
    let mut drained = 0usize;
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                drained += chunk.len();
                if drained > MAX_DRAIN_BYTES {
                    debug!(
                        "Gave up draining {} after {} bytes; connection will be closed",
                        url, drained
                    );
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to drain response body from {}: {}", url, e);
                break;
            }
        }
    }
}

/// Returns the response if its status is `expected`.
///
/// Otherwise the body is drained and `XkcdError::HttpStatus` is returned.
pub(crate) async fn ensure_status(
    response: Response,
    expected: StatusCode,
) -> Result<Response, XkcdError> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }
    debug!("Unexpected status {} from {}", status, response.url());
    drain(response).await;
    Err(XkcdError::HttpStatus(status))
}

/// Reads the whole body of a response whose status must be `expected`.
pub(crate) async fn read_body(response: Response, expected: StatusCode) -> Result<Bytes, XkcdError> {
    let response = ensure_status(response, expected).await?;
    Ok(response.bytes().await?)
}

/// Returns the `Location` header of a `302 Found` response.
///
/// The body is drained whatever the outcome.
///
/// # Errors
///
/// `XkcdError::ProtocolViolation` if the status is not exactly 302, or the
/// header is missing or not visible ASCII.
pub(crate) async fn redirect_location(response: Response) -> Result<String, XkcdError> {
    let status = response.status();
    let url = response.url().to_string();
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .map(|value| value.to_str().map(str::to_string));
    drain(response).await;

    if status != StatusCode::FOUND {
        return Err(XkcdError::ProtocolViolation(format!(
            "expected 302 Found from {}, got {}",
            url, status
        )));
    }
    match location {
        Some(Ok(location)) => Ok(location),
        Some(Err(_)) => Err(XkcdError::ProtocolViolation(format!(
            "unreadable Location header from {}",
            url
        ))),
        None => Err(XkcdError::ProtocolViolation(format!(
            "302 Found from {} without a Location header",
            url
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    async fn get(server: &Server, path: &str) -> Response {
        crate::initialization::init_client(&Default::default())
            .unwrap()
            .get(server.url(path).to_string())
            .send()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_read_body_ok() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ok"))
                .respond_with(status_code(200).body("payload")),
        );

        let body = read_body(get(&server, "/ok").await, StatusCode::OK)
            .await
            .unwrap();
        assert_eq!(&body[..], b"payload");
    }

    #[tokio::test]
    async fn test_read_body_wrong_status() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/missing"))
                .respond_with(status_code(404).body("<html>not here</html>")),
        );

        let err = read_body(get(&server, "/missing").await, StatusCode::OK)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "error: 404 Not Found");
    }

    #[tokio::test]
    async fn test_redirect_location_found() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/random/comic"))
                .respond_with(status_code(302).insert_header("Location", "/1234/")),
        );

        let location = redirect_location(get(&server, "/random/comic").await)
            .await
            .unwrap();
        assert_eq!(location, "/1234/");
    }

    #[tokio::test]
    async fn test_redirect_location_wrong_status() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/random/comic")).respond_with(
                status_code(301).insert_header("Location", "/1234/"),
            ),
        );

        match redirect_location(get(&server, "/random/comic").await).await {
            Err(XkcdError::ProtocolViolation(msg)) => {
                assert!(msg.contains("301"), "got: {}", msg)
            }
            other => panic!("expected ProtocolViolation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_redirect_location_missing_header() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/random/comic"))
                .respond_with(status_code(302)),
        );

        match redirect_location(get(&server, "/random/comic").await).await {
            Err(XkcdError::ProtocolViolation(msg)) => {
                assert!(msg.contains("without a Location"), "got: {}", msg)
            }
            other => panic!("expected ProtocolViolation, got {:?}", other),
        }
    }
}

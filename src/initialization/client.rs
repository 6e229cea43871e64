//! HTTP client initialization.
//!
//! Every request the crate makes goes through a client built here, with
//! redirect following disabled so that `Location` headers can be inspected
//! and redirect chains are never followed blindly.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::ClientConfig;
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used for all xkcd requests.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Total request timeout and TCP connect timeout from the config
/// - Redirect following disabled
///
/// # Errors
///
/// Returns `InitializationError::ConfigError` if the config does not validate,
/// or `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &ClientConfig) -> Result<reqwest::Client, InitializationError> {
    config.validate()?;
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    #[test]
    fn test_init_client_default_config() {
        assert!(init_client(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_init_client_rejects_invalid_config() {
        let config = ClientConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        match init_client(&config) {
            Err(InitializationError::ConfigError(err)) => {
                assert_eq!(err.field, "timeout_seconds")
            }
            other => panic!("expected ConfigError, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_init_client_does_not_follow_redirects() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/start")).respond_with(
                status_code(302).insert_header("Location", "/elsewhere"),
            ),
        );

        let client = init_client(&ClientConfig::default()).unwrap();
        let response = client
            .get(server.url("/start").to_string())
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 302);
        assert_eq!(
            response.headers().get(reqwest::header::LOCATION).unwrap(),
            "/elsewhere"
        );
    }

    #[tokio::test]
    async fn test_init_client_sends_user_agent() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::headers(contains((
                "user-agent",
                "xkcd-test/1.0",
            ))))
            .respond_with(status_code(200)),
        );

        let config = ClientConfig {
            user_agent: "xkcd-test/1.0".to_string(),
            ..Default::default()
        };
        let client = init_client(&config).unwrap();
        let response = client
            .get(server.url("/ua").to_string())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }
}

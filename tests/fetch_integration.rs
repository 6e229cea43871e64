//! End-to-end tests of the public client API against a local mock server.
//!
//! Every test points both base URLs of `ClientConfig` at an `httptest` server,
//! so no request leaves the machine.

use std::time::Duration;

use httptest::{matchers::*, responders::*, Expectation, Server};
use xkcd_client::{
    get_retry_strategy, parse_comic, CancellationToken, ClientConfig, ErrorKind, XkcdClient,
    XkcdError,
};

const ERROR_CODE_JSON: &[u8] = include_bytes!("fixtures/error_code.json");

//-----------------------------------------------------------------------------
// Test Helpers
//-----------------------------------------------------------------------------

fn client_for(server: &Server) -> XkcdClient {
    XkcdClient::new(ClientConfig::with_base_url(server.url_str("")))
        .expect("Failed to build test client")
}

//-----------------------------------------------------------------------------
// Comic retrieval
//-----------------------------------------------------------------------------

#[tokio::test]
async fn fetched_comic_matches_parsed_fixture() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/1024/info.0.json"))
            .respond_with(status_code(200).body(ERROR_CODE_JSON)),
    );

    let fetched = client_for(&server).fetch_comic(1024).await.unwrap();
    let parsed = parse_comic(ERROR_CODE_JSON).unwrap();
    assert_eq!(fetched, parsed);
    assert_eq!(fetched.published_at().to_rfc3339(), "2012-03-02T00:00:00+00:00");
}

#[tokio::test]
async fn missing_comic_reports_status_line() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/404/info.0.json"))
            .respond_with(status_code(404)),
    );

    let err = client_for(&server).fetch_comic(404).await.unwrap_err();
    assert_eq!(format!("{}", err), "error: 404 Not Found");
}

#[tokio::test]
async fn invalid_ids_never_reach_the_network() {
    let server = Server::run();
    server.expect(Expectation::matching(any()).times(0).respond_with(status_code(200)));

    let client = client_for(&server);
    for id in [0, -1, -5] {
        let err = client.fetch_comic(id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.to_string(), format!("invalid comic number ({})", id));
    }
}

#[tokio::test]
async fn clones_share_configuration_and_work_concurrently() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/1024/info.0.json"))
            .times(8)
            .respond_with(status_code(200).body(ERROR_CODE_JSON)),
    );

    let client = client_for(&server);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.fetch_comic(1024).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().id(), 1024);
    }
}

//-----------------------------------------------------------------------------
// Random comics
//-----------------------------------------------------------------------------

#[tokio::test]
async fn random_comic_follows_location_manually() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/random/comic"))
            .respond_with(status_code(302).insert_header("Location", "/1024/")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/1024/"))
            .times(0)
            .respond_with(status_code(200).body("<html>comic page</html>")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/1024/info.0.json"))
            .respond_with(status_code(200).body(ERROR_CODE_JSON)),
    );

    let comic = client_for(&server).fetch_random_comic().await.unwrap();
    assert_eq!(comic.id(), 1024);
}

#[tokio::test]
async fn random_without_redirect_is_a_protocol_violation() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/random/comic"))
            .respond_with(status_code(200).body("{}")),
    );

    match client_for(&server).fetch_random_comic_id().await {
        Err(XkcdError::ProtocolViolation(_)) => {}
        other => panic!("expected ProtocolViolation, got {:?}", other),
    }
}

//-----------------------------------------------------------------------------
// Caller-side retry and cancellation
//-----------------------------------------------------------------------------

#[tokio::test]
async fn caller_retry_recovers_from_server_error() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/1024/info.0.json"))
            .times(2)
            .respond_with(httptest::cycle![
                status_code(503).body("busy"),
                status_code(200).body(ERROR_CODE_JSON),
            ]),
    );

    let client = client_for(&server);
    let strategy = get_retry_strategy(2).map(|_| Duration::from_millis(10));
    let comic = tokio_retry::RetryIf::spawn(
        strategy,
        || client.fetch_comic(1024),
        |e: &XkcdError| e.is_retriable(),
    )
    .await
    .unwrap();
    assert_eq!(comic.title(), "Error Code");
}

#[tokio::test]
async fn caller_retry_gives_up_on_not_found() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/9/info.0.json"))
            .times(1)
            .respond_with(status_code(404)),
    );

    let client = client_for(&server);
    let strategy = get_retry_strategy(3).map(|_| Duration::from_millis(10));
    let err = tokio_retry::RetryIf::spawn(
        strategy,
        || client.fetch_comic(9),
        |e: &XkcdError| e.is_retriable(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HttpStatus);
}

#[tokio::test]
async fn cancellation_token_aborts_slow_request() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/1024/info.0.json"))
            .times(0..=1)
            .respond_with(delay_and_then(
                Duration::from_secs(5),
                status_code(200).body(ERROR_CODE_JSON),
            )),
    );

    let token = CancellationToken::new();
    let client = client_for(&server).with_cancellation(token.clone());
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let err = client.fetch_comic(1024).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert!(!err.is_retriable());
}

//-----------------------------------------------------------------------------
// Image download
//-----------------------------------------------------------------------------

#[tokio::test]
async fn comic_image_download_round_trip() {
    let server = Server::run();
    let img_url = server.url_str("/comics/error_code.png");
    let mut payload: serde_json::Value = serde_json::from_slice(ERROR_CODE_JSON).unwrap();
    payload["img"] = serde_json::Value::String(img_url);
    let image: Vec<u8> = (0..=255u8).cycle().take(100_000).collect();

    server.expect(
        Expectation::matching(request::method_path("GET", "/1024/info.0.json"))
            .respond_with(status_code(200).body(payload.to_string())),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/comics/error_code.png"))
            .times(2)
            .respond_with(status_code(200).body(image.clone())),
    );

    let client = client_for(&server);
    let comic = client.fetch_comic(1024).await.unwrap();

    let bytes = client.fetch_image_bytes(comic.img()).await.unwrap();
    assert_eq!(bytes.len(), image.len());

    let dir = tempfile::tempdir().unwrap();
    let path = comic
        .download_image(&client, dir.path().join("error_code.png"))
        .await
        .unwrap();
    assert!(path.is_absolute());
    assert_eq!(std::fs::read(&path).unwrap(), image);
}

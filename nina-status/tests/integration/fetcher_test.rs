//! HttpFetcher integration tests against a mock device

use std::time::Duration;

use nina_status::HttpFetcher;
use nina_status_common::Operation;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::{nina_response, unreachable_base_url};

async fn device() -> (MockServer, HttpFetcher) {
    let server = MockServer::start().await;
    let fetcher = HttpFetcher::new(format!("{}/v2/api", server.uri()));
    (server, fetcher)
}

#[tokio::test]
async fn fetch_success_records_status_and_body() {
    let (server, fetcher) = device().await;
    Mock::given(method("GET"))
        .and(path("/v2/api/equipment/camera/info"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(nina_response(json!({"Connected": true}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = fetcher
        .fetch(&Operation::new("/equipment/camera/info"))
        .await;

    assert!(outcome.is_success());
    assert_eq!(outcome.status_code(), Some(200));
    assert!(outcome.error_message().is_none());
    assert_eq!(
        outcome.url(),
        format!("{}/v2/api/equipment/camera/info", server.uri())
    );
    assert_eq!(outcome.data().unwrap()["Response"]["Connected"], true);
}

#[tokio::test]
async fn fetch_accepts_json_array_and_null_bodies() {
    let (server, fetcher) = device().await;
    Mock::given(method("GET"))
        .and(path("/v2/api/event-history"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[1, 2]"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/api/version"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let array = fetcher.fetch(&Operation::new("/event-history")).await;
    assert_eq!(array.data(), Some(&json!([1, 2])));

    let null = fetcher.fetch(&Operation::new("/version")).await;
    assert!(null.is_success());
    assert_eq!(null.data(), Some(&serde_json::Value::Null));
}

#[tokio::test]
async fn fetch_non_2xx_is_failure_without_status_code() {
    let (server, fetcher) = device().await;
    Mock::given(method("GET"))
        .and(path("/v2/api/sequence/state"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"Success": false})))
        .mount(&server)
        .await;

    let outcome = fetcher.fetch(&Operation::new("/sequence/state")).await;

    assert!(!outcome.is_success());
    assert!(outcome.status_code().is_none());
    assert!(outcome.data().is_none());
    assert_eq!(
        outcome.error_message().unwrap(),
        format!("HTTP 500 for url: {}/v2/api/sequence/state", server.uri())
    );
}

#[tokio::test]
async fn fetch_unmatched_route_is_404_failure() {
    let (_server, fetcher) = device().await;

    let outcome = fetcher.fetch(&Operation::new("/flats/status")).await;

    assert!(!outcome.is_success());
    assert!(outcome.error_message().unwrap().starts_with("HTTP 404"));
}

#[tokio::test]
async fn fetch_invalid_json_is_failure() {
    let (server, fetcher) = device().await;
    Mock::given(method("GET"))
        .and(path("/v2/api/version"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let outcome = fetcher.fetch(&Operation::new("/version")).await;

    assert!(!outcome.is_success());
    assert!(outcome.data().is_none());
    assert!(outcome
        .error_message()
        .unwrap()
        .starts_with("Invalid JSON response from"));
}

#[tokio::test]
async fn fetch_empty_body_is_failure() {
    let (server, fetcher) = device().await;
    Mock::given(method("GET"))
        .and(path("/v2/api/version"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let outcome = fetcher.fetch(&Operation::new("/version")).await;
    assert!(!outcome.is_success());
}

#[tokio::test]
async fn fetch_timeout_is_failure() {
    let (server, fetcher) = device().await;
    let fetcher = fetcher.with_timeout(Duration::from_millis(100));
    Mock::given(method("GET"))
        .and(path("/v2/api/sequence/state"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let outcome = fetcher.fetch(&Operation::new("/sequence/state")).await;

    assert!(!outcome.is_success());
    let message = outcome.error_message().unwrap();
    assert!(message.contains("timed out after 100ms"), "{message}");
}

#[tokio::test]
async fn fetch_connection_refused_is_failure() {
    let fetcher = HttpFetcher::new(unreachable_base_url());

    let outcome = fetcher.fetch(&Operation::new("/version")).await;

    assert!(!outcome.is_success());
    assert!(outcome.status_code().is_none());
    assert!(outcome
        .error_message()
        .unwrap()
        .starts_with("Connection to http://127.0.0.1:"));
}

#[tokio::test]
async fn fetch_sends_exactly_one_request() {
    let (server, fetcher) = device().await;
    Mock::given(method("GET"))
        .and(path("/v2/api/sequence/state"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = fetcher.fetch(&Operation::new("/sequence/state")).await;
    assert!(!outcome.is_success());
    // 失敗してもリトライしない（expect(1) は MockServer の drop 時に検証される）
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

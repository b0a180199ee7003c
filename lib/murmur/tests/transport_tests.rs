//! Integration tests for `HyperClient` using wiremock.

use std::time::Duration;

use murmur::{Error, HttpClient, HttpClientExt, HyperClient, Method, Request};
use serde::{Deserialize, Serialize};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Message {
    id: u64,
    body: String,
}

fn url(server: &MockServer, path: &str) -> url::Url {
    url::Url::parse(&format!("{}{path}", server.uri())).expect("url")
}

#[tokio::test]
async fn test_get_request() {
    let mock_server = MockServer::start().await;

    let message = Message {
        id: 1,
        body: "Hello team".to_string(),
    };

    Mock::given(method("GET"))
        .and(path("/api/v1/messages/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&message))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let response = client
        .get(url(&mock_server, "/api/v1/messages/1.json"))
        .await
        .expect("response");

    assert!(response.is_success());
    assert_eq!(response.json::<Message>().expect("json"), message);
}

#[tokio::test]
async fn test_post_request_with_json_body() {
    let mock_server = MockServer::start().await;

    let input = serde_json::json!({"body": "Hello team", "group_id": 7});
    let output = Message {
        id: 42,
        body: "Hello team".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/api/v1/messages.json"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&input))
        .respond_with(ResponseTemplate::new(201).set_body_json(&output))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let response = client
        .post_json(url(&mock_server, "/api/v1/messages.json"), &input)
        .await
        .expect("response");

    assert_eq!(response.status(), 201);
    assert_eq!(response.json::<Message>().expect("json"), output);
}

#[tokio::test]
async fn test_error_status_is_returned_untouched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/messages/9"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>Oops</html>"))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let response = client
        .delete(url(&mock_server, "/api/v1/messages/9"))
        .await
        .expect("transport succeeded");

    assert_eq!(response.status(), 500);
    assert_eq!(response.text(), "<html>Oops</html>");
}

#[tokio::test]
async fn test_default_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", murmur::DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let response = client
        .get(url(&mock_server, "/api/v1/users/current.json"))
        .await
        .expect("response");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
async fn test_custom_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups.json"))
        .and(header("Authorization", "Bearer token123"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let request = Request::builder(Method::Get, url(&mock_server, "/api/v1/groups.json"))
        .header("Authorization", "Bearer token123")
        .build();

    let response = client.execute(request).await.expect("response");
    assert!(response.is_success());
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .timeout(Duration::from_millis(50))
        .build();

    let err = client
        .get(url(&mock_server, "/api/v1/topics/1.json"))
        .await
        .expect_err("should time out");
    assert!(matches!(err, Error::Timeout));
}

#[tokio::test]
async fn test_logging_middleware() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .with_logging()
        .with_debug_logging()
        .build();

    let response = client
        .get(url(&mock_server, "/api/v1/messages.json"))
        .await
        .expect("response");

    assert_eq!(response.status(), 429);
}

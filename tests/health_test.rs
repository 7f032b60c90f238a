//! Health probe integration tests.

mod common;

use common::{publish_video, register_user, TestServer};
use serde_json::Value;

#[tokio::test]
async fn test_liveness() {
    let server = TestServer::start().await;

    let response = server
        .client()
        .get(server.url("/health/live"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let json: Value = response.json().await.unwrap();
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_readiness_reports_record_counts() {
    let server = TestServer::start().await;

    let response = server
        .client()
        .get(server.url("/health/ready"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let json: Value = response.json().await.unwrap();
    assert_eq!(json["status"], "ready");
    assert_eq!(json["database"], "connected");
    assert_eq!(json["users"], 0);
    assert_eq!(json["videos"], 0);

    let user = register_user(&server, "annlee", "ann@x.com").await;
    publish_video(&server, user["id"].as_str().unwrap(), "First video").await;

    let response = server
        .client()
        .get(server.url("/health/ready"))
        .send()
        .await
        .unwrap();

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["users"], 1);
    assert_eq!(json["videos"], 1);
}

//! Common test utilities and helpers.
//!
//! Boots the API server on a random port together with a stub media host
//! implementing the upload collaborator contract, so integration tests
//! exercise the full proxy path without a real hosting provider.

use axum::extract::Multipart;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::TcpListener;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener as TokioTcpListener;
use uuid::Uuid;
use video_share_server::{
    config::{Config, LoggingConfig, MediaHostConfig, ServerConfig, StorageConfig, UploadConfig},
    create_router, AppState,
};

/// Test server instance
pub struct TestServer {
    pub api_url: String,
    pub data_dir: TempDir,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Start the API server plus a stub media host, both on random ports
    pub async fn start() -> Self {
        let media_host_port = get_available_port();
        let api_port = get_available_port();
        let data_dir = TempDir::new().expect("Failed to create temp dir");

        let media_host_url = format!("http://127.0.0.1:{}", media_host_port);
        let api_url = format!("http://127.0.0.1:{}", api_port);

        let config = create_test_config(&data_dir, api_port, &media_host_url);

        let state = AppState::new(config).expect("Failed to create app state");
        let app = create_router(state);
        let stub = stub_media_host();

        let api_addr: std::net::SocketAddr =
            format!("127.0.0.1:{}", api_port).parse().unwrap();
        let media_addr: std::net::SocketAddr =
            format!("127.0.0.1:{}", media_host_port).parse().unwrap();

        let api_listener = TokioTcpListener::bind(api_addr)
            .await
            .expect("Failed to bind API listener");
        let media_listener = TokioTcpListener::bind(media_addr)
            .await
            .expect("Failed to bind media host listener");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        // Start servers in background
        tokio::spawn(async move {
            tokio::select! {
                _ = axum::serve(api_listener, app) => {}
                _ = axum::serve(media_listener, stub) => {}
                _ = shutdown_rx => {}
            }
        });

        // Give servers time to start
        tokio::time::sleep(Duration::from_millis(50)).await;

        Self {
            api_url,
            data_dir,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get HTTP client
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap()
    }

    /// Get API URL
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Create test configuration
fn create_test_config(data_dir: &TempDir, api_port: u16, media_host_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: api_port,
            request_timeout: 2,
        },
        storage: StorageConfig {
            data_dir: data_dir.path().to_path_buf(),
        },
        upload: UploadConfig {
            max_upload_size: 10 * 1024 * 1024,
        },
        media_host: MediaHostConfig {
            endpoint: media_host_url.to_string(),
            api_key: None,
            timeout_seconds: 30,
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        },
    }
}

/// Stub media host implementing the upload collaborator contract:
/// `POST /upload` multipart `file` -> `{ "url": ..., "duration": ... }`.
/// Duration is only reported for video content types. Files named `slow*`
/// stall longer than the API's request timeout, for timeout tests.
fn stub_media_host() -> Router {
    async fn upload(mut multipart: Multipart) -> Json<Value> {
        let mut content_type = String::new();
        let mut stall = false;

        while let Some(field) = multipart.next_field().await.unwrap() {
            if field.name() == Some("file") {
                stall = field
                    .file_name()
                    .map(|name| name.starts_with("slow"))
                    .unwrap_or(false);
                content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let _ = field.bytes().await.unwrap();
            }
        }

        if stall {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }

        let url = format!("http://media.test/{}", Uuid::new_v4());
        let duration = content_type.starts_with("video/").then_some(42.5);

        Json(json!({ "url": url, "duration": duration }))
    }

    Router::new().route("/upload", post(upload))
}

/// Find an available TCP port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to random port")
        .local_addr()
        .expect("Failed to get local address")
        .port()
}

/// Build a registration form for the given account, with an avatar attached
pub fn registration_form(
    full_name: &str,
    email: &str,
    username: &str,
    password: &str,
) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("fullName", full_name.to_string())
        .text("email", email.to_string())
        .text("username", username.to_string())
        .text("password", password.to_string())
        .part(
            "avatar",
            reqwest::multipart::Part::bytes(b"fake png bytes".to_vec())
                .file_name("avatar.png")
                .mime_str("image/png")
                .unwrap(),
        )
}

/// Register a user and return the sanitized record from the envelope
pub async fn register_user(server: &TestServer, username: &str, email: &str) -> Value {
    let response = server
        .client()
        .post(server.url("/api/users/register"))
        .multipart(registration_form("Test User", email, username, "secret1"))
        .send()
        .await
        .expect("Failed to send registration");

    assert_eq!(response.status(), 201, "registration should succeed");

    let body: Value = response.json().await.expect("Failed to parse JSON");
    body["data"].clone()
}

/// Publish a video owned by `user_id` and return the record from the envelope
pub async fn publish_video(server: &TestServer, user_id: &str, title: &str) -> Value {
    let form = reqwest::multipart::Form::new()
        .text("title", title.to_string())
        .text("description", "a test video".to_string())
        .part(
            "video",
            reqwest::multipart::Part::bytes(b"fake mp4 bytes".to_vec())
                .file_name("clip.mp4")
                .mime_str("video/mp4")
                .unwrap(),
        );

    let response = server
        .client()
        .post(server.url("/api/videos"))
        .header("X-User-Id", user_id)
        .multipart(form)
        .send()
        .await
        .expect("Failed to send publish");

    assert_eq!(response.status(), 201, "publish should succeed");

    let body: Value = response.json().await.expect("Failed to parse JSON");
    body["data"].clone()
}

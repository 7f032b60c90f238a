//! # Video Share Server
//!
//! A REST backend for a video-sharing application written in Rust.
//!
//! ## Features
//!
//! - **User registration**: Multipart signup with avatar/cover uploads
//! - **Video lifecycle**: Publish, fetch, update, delete, toggle-publish
//! - **Proxied uploads**: Files are forwarded to an external media host
//! - **Document store**: RocksDB with JSON records, no external database
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  HTTP Server                     │
//! │  ┌─────────────┐ ┌─────────────┐ ┌───────────┐ │
//! │  │  Users API  │ │ Videos API  │ │  Health   │ │
//! │  └─────────────┘ └─────────────┘ └───────────┘ │
//! ├─────────────────────────────────────────────────┤
//! │                   Services                       │
//! │  ┌─────────────┐ ┌──────────────┐ ┌──────────┐ │
//! │  │  Database   │ │  Media Host  │ │ Password │ │
//! │  │  Service    │ │   Client     │ │ Hashing  │ │
//! │  └─────────────┘ └──────────────┘ └──────────┘ │
//! ├─────────────────────────────────────────────────┤
//! │           RocksDB / External Media Host          │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Every handler follows the same control-flow contract: validate input,
//! query or mutate the store, optionally forward a file to the media host,
//! and return either the [`models::ApiResponse`] envelope or an
//! [`error::AppError`] that the centralized responder turns into a JSON
//! error body.
//!
//! ## Usage
//!
//! ```bash
//! # Start the server
//! cargo run --release
//!
//! # Register a user
//! curl -X POST http://localhost:5000/api/users/register \
//!   -F "fullName=Ann Lee" -F "email=ann@x.com" \
//!   -F "username=annlee" -F "password=secret1" -F "avatar=@avatar.png"
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;

use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{BoxError, Json, Router};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Run the video-share server with the given configuration.
pub async fn run(config: Config) -> anyhow::Result<()> {
    // Create application state
    let state = AppState::new(config.clone())?;

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!(address = %addr, "API server starting");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Body size limit (from config, plus multipart framing overhead).
    // DefaultBodyLimit must be raised as well or the multipart extractor
    // caps requests at axum's built-in 2MB.
    let max_body = state.config.upload.max_upload_size as usize + 64 * 1024;
    let body_limit = RequestBodyLimitLayer::new(max_body);

    // Requests exceeding server.request_timeout are cut off with a 408 in
    // the standard error envelope. TimeoutLayer is fallible, so it needs a
    // HandleErrorLayer in front to turn the error into a response.
    let timeout = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.server.request_timeout,
        )));

    Router::new()
        .nest("/api/users", handlers::user_routes())
        .nest("/api/videos", handlers::video_routes())
        .nest("/health", handlers::health_routes())
        .layer(cors)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(body_limit)
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        let body = error::ErrorResponse::new(StatusCode::REQUEST_TIMEOUT, "Request timed out");
        (StatusCode::REQUEST_TIMEOUT, Json(body)).into_response()
    } else {
        AppError::internal(format!("Middleware failure: {}", err)).into_response()
    }
}

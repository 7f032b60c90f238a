//! HTTP request handlers for the video-share server.
//!
//! This module contains all endpoint handlers organized by functionality:
//! - `users`: User registration
//! - `videos`: Video lifecycle (publish, fetch, update, delete, toggle)
//! - `health`: Health check endpoints
//! - `form`: Shared multipart form collection

pub mod form;
pub mod health;
pub mod users;
pub mod videos;

pub use health::health_routes;
pub use users::user_routes;
pub use videos::video_routes;

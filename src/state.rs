//! Application state management.
//!
//! This module defines the shared application state that is accessible
//! from all request handlers via Axum's State extractor. The store client
//! and the media host client are constructed exactly once here and
//! injected into handlers; nothing is process-global.
//!
//! # Usage
//!
//! ```rust,ignore
//! async fn handler(State(state): State<AppState>) -> impl IntoResponse {
//!     let video = state.db.get_video(id)?;
//!     // ...
//! }
//! ```

use crate::config::Config;
use crate::error::Result;
use crate::services::{DatabaseService, MediaHostClient};
use std::sync::Arc;

/// Shared application state
///
/// This struct holds all shared resources that handlers need access to.
/// It's wrapped in `Arc` and cloned into each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,

    /// Database service for document operations
    pub db: Arc<DatabaseService>,

    /// Client for the external media host
    pub uploader: Arc<MediaHostClient>,
}

impl AppState {
    /// Create a new application state
    ///
    /// # Errors
    /// Returns error if services cannot be initialized
    pub fn new(config: Config) -> Result<Self> {
        let db = DatabaseService::new(&config.storage)?;
        let uploader = MediaHostClient::new(&config.media_host)?;

        Ok(Self {
            config: Arc::new(config),
            db: Arc::new(db),
            uploader: Arc::new(uploader),
        })
    }

    /// Get the maximum accepted upload size
    pub fn max_upload_size(&self) -> u64 {
        self.config.upload.max_upload_size
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &"<Config>")
            .field("db", &"<DatabaseService>")
            .field("uploader", &"<MediaHostClient>")
            .finish()
    }
}

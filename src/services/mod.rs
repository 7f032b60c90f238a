//! Service layer for the video-share server.
//!
//! This module contains business logic services that handle:
//! - Database operations (RocksDB document store)
//! - Forwarding uploads to the external media host
//! - Password hashing

pub mod database;
pub mod password;
pub mod uploader;

pub use database::DatabaseService;
pub use uploader::{HostedFile, MediaHostClient};

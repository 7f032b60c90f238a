//! Data models for the video-share server.
//!
//! This module contains all domain models and data transfer objects (DTOs)
//! used throughout the application.

mod response;
mod user;
mod video;

pub use response::*;
pub use user::*;
pub use video::*;

//! Video entity model and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Video entity representing a published piece of content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Title shown in listings
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Hosted video file URL
    pub video_file: String,

    /// Hosted thumbnail URL, if one was uploaded
    pub thumbnail: Option<String>,

    /// Duration in seconds, as reported by the media host
    pub duration: f64,

    /// Owning user's ID
    pub owner: Uuid,

    /// Publication flag; new videos start unpublished
    pub is_published: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Video {
    /// Create a new Video instance owned by `owner`
    pub fn new(
        title: String,
        description: String,
        video_file: String,
        thumbnail: Option<String>,
        duration: f64,
        owner: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            video_file,
            thumbnail,
            duration,
            owner,
            is_published: false,
            created_at: Utc::now(),
        }
    }

    /// Check whether `user_id` owns this video
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner == user_id
    }
}

/// Video DTO returned to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    /// Unique video ID
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Description
    pub description: String,

    /// Hosted video file URL
    pub video_file: String,

    /// Hosted thumbnail URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Duration in seconds
    pub duration: f64,

    /// Owning user's ID
    pub owner: Uuid,

    /// Publication flag
    pub is_published: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl VideoResponse {
    /// Create a response DTO from a Video entity
    pub fn from_video(video: &Video) -> Self {
        Self {
            id: video.id,
            title: video.title.clone(),
            description: video.description.clone(),
            video_file: video.video_file.clone(),
            thumbnail: video.thumbnail.clone(),
            duration: video.duration,
            owner: video.owner,
            is_published: video.is_published,
            created_at: video.created_at,
        }
    }
}

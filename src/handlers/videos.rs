//! Video lifecycle handlers.
//!
//! ## Endpoints
//!
//! - `GET /api/videos/user/{username}` - List a user's videos
//! - `POST /api/videos` - Publish a new video (multipart)
//! - `GET /api/videos/{videoId}` - Fetch a video
//! - `PATCH /api/videos/{videoId}` - Update title/description/thumbnail (owner only)
//! - `DELETE /api/videos/{videoId}` - Delete a video (owner only)
//! - `PATCH /api/videos/{videoId}/toggle-publish` - Flip the publication flag (owner only)
//!
//! Mutating endpoints resolve the acting identity via [`CurrentUser`] and
//! require it to equal the video's owner; there is no administrative
//! override.
//!
//! # Example: Publish
//!
//! ```bash
//! curl -X POST http://localhost:5000/api/videos \
//!   -H "X-User-Id: ${USER_ID}" \
//!   -F "title=My first video" -F "description=hello" \
//!   -F "video=@clip.mp4" -F "thumbnail=@thumb.png"
//! ```

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::extract::CurrentUser;
use crate::handlers::form::FormData;
use crate::models::{ApiResponse, Video, VideoResponse};
use crate::state::AppState;

/// List all videos owned by a user
///
/// GET /api/videos/user/{username}
async fn list_videos_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Response> {
    let user = state
        .db
        .find_user_by_username(&username.to_lowercase())?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let videos = state.db.list_videos_by_owner(user.id)?;
    let data: Vec<VideoResponse> = videos.iter().map(VideoResponse::from_video).collect();

    Ok(ApiResponse::ok(data, "Videos fetched successfully").into_response())
}

/// Publish a new video
///
/// POST /api/videos
///
/// Multipart form: `title` and `description` text fields, a required `video`
/// file and an optional `thumbnail` file. Both files are forwarded to the
/// media host; the video's duration comes from the host's reply.
async fn publish_video(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    multipart: Multipart,
) -> Result<Response> {
    let form = FormData::read(multipart, state.max_upload_size()).await?;

    let title = form.trimmed("title").unwrap_or_default().to_string();
    let description = form.trimmed("description").unwrap_or_default().to_string();

    let video_file = form
        .file("video")
        .ok_or_else(|| AppError::validation("Video file is required"))?;

    let hosted_video = state
        .uploader
        .upload(
            &video_file.filename,
            &video_file.content_type,
            video_file.data.clone(),
        )
        .await
        .map_err(|e| AppError::upload(format!("Error uploading files: {}", e)))?;

    let thumbnail = match form.file("thumbnail") {
        Some(file) => Some(
            state
                .uploader
                .upload(&file.filename, &file.content_type, file.data.clone())
                .await
                .map_err(|e| AppError::upload(format!("Error uploading files: {}", e)))?
                .url,
        ),
        None => None,
    };

    let video = Video::new(
        title,
        description,
        hosted_video.url,
        thumbnail,
        hosted_video.duration.unwrap_or(0.0),
        user_id,
    );
    state.db.insert_video(&video)?;

    info!(id = %video.id, owner = %user_id, "Published video");

    Ok(ApiResponse::created(
        VideoResponse::from_video(&video),
        "Video published successfully",
    )
    .into_response())
}

/// Fetch a video by ID
///
/// GET /api/videos/{videoId}
async fn get_video_by_id(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Response> {
    let id = parse_video_id(&video_id)?;
    let video = fetch_video(&state, id)?;

    Ok(ApiResponse::ok(
        VideoResponse::from_video(&video),
        "Video fetched successfully",
    )
    .into_response())
}

/// Update a video's title, description and optionally its thumbnail
///
/// PATCH /api/videos/{videoId}
async fn update_video(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(video_id): Path<String>,
    multipart: Multipart,
) -> Result<Response> {
    let id = parse_video_id(&video_id)?;
    let mut video = fetch_video(&state, id)?;
    require_owner(&video, user_id, "You are not authorized to update this video")?;

    let form = FormData::read(multipart, state.max_upload_size()).await?;

    if let Some(title) = form.trimmed("title") {
        video.title = title.to_string();
    }
    if let Some(description) = form.trimmed("description") {
        video.description = description.to_string();
    }

    if let Some(file) = form.file("thumbnail") {
        let hosted = state
            .uploader
            .upload(&file.filename, &file.content_type, file.data.clone())
            .await?;
        video.thumbnail = Some(hosted.url);
    }

    state.db.update_video(&video)?;

    info!(id = %video.id, "Updated video");

    Ok(ApiResponse::ok(
        VideoResponse::from_video(&video),
        "Video updated successfully",
    )
    .into_response())
}

/// Delete a video
///
/// DELETE /api/videos/{videoId}
async fn delete_video(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(video_id): Path<String>,
) -> Result<Response> {
    let id = parse_video_id(&video_id)?;
    let video = fetch_video(&state, id)?;
    require_owner(&video, user_id, "You are not authorized to delete this video")?;

    state.db.delete_video(id)?;

    info!(id = %id, "Deleted video");

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Flip a video's publication flag
///
/// PATCH /api/videos/{videoId}/toggle-publish
async fn toggle_publish_status(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(video_id): Path<String>,
) -> Result<Response> {
    let id = parse_video_id(&video_id)?;
    let mut video = fetch_video(&state, id)?;
    require_owner(&video, user_id, "You are not authorized to update this video")?;

    video.is_published = !video.is_published;
    state.db.update_video(&video)?;

    info!(id = %id, is_published = video.is_published, "Toggled publish status");

    Ok(ApiResponse::ok(
        VideoResponse::from_video(&video),
        "Publish status toggled successfully",
    )
    .into_response())
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a video id from the path.
///
/// A syntactically invalid id is indistinguishable from a missing record to
/// the caller, so both map to 404.
fn parse_video_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found("Video not found"))
}

/// Fetch a video or 404
fn fetch_video(state: &AppState, id: Uuid) -> Result<Video> {
    state
        .db
        .get_video(id)?
        .ok_or_else(|| AppError::not_found("Video not found"))
}

/// Require the acting identity to own the video
fn require_owner(video: &Video, user_id: Uuid, message: &str) -> Result<()> {
    if !video.is_owned_by(user_id) {
        return Err(AppError::forbidden(message));
    }
    Ok(())
}

/// Create video routes
pub fn video_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(publish_video))
        .route("/user/{username}", get(list_videos_by_username))
        .route(
            "/{videoId}",
            get(get_video_by_id).patch(update_video).delete(delete_video),
        )
        .route("/{videoId}/toggle-publish", patch(toggle_publish_status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_video_id_malformed_is_not_found() {
        let err = parse_video_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let id = Uuid::new_v4();
        assert_eq!(parse_video_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_require_owner() {
        let owner = Uuid::new_v4();
        let video = Video::new(
            "t".to_string(),
            "d".to_string(),
            "http://media.test/v".to_string(),
            None,
            0.0,
            owner,
        );

        assert!(require_owner(&video, owner, "nope").is_ok());

        let err = require_owner(&video, Uuid::new_v4(), "nope").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }
}

//! User registration handler.
//!
//! ## Endpoints
//!
//! - `POST /api/users/register` - Register a new account
//!
//! Registration is a multipart form: text fields `fullName`, `email`,
//! `username`, `password` plus a required `avatar` file and an optional
//! `coverImage` file. Both files are forwarded to the media host and the
//! returned URLs are stored on the user record.
//!
//! # Example
//!
//! ```bash
//! curl -X POST http://localhost:5000/api/users/register \
//!   -F "fullName=Ann Lee" -F "email=ann@x.com" \
//!   -F "username=annlee" -F "password=secret1" \
//!   -F "avatar=@avatar.png"
//! ```

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tracing::info;

use crate::error::{AppError, Result};
use crate::handlers::form::FormData;
use crate::models::{ApiResponse, User, UserResponse};
use crate::services::password::hash_password;
use crate::state::AppState;

/// Register a new user
///
/// POST /api/users/register
///
/// Validates the form, rejects duplicate accounts, uploads the profile
/// media, then stores the user and responds with the sanitized record.
async fn register_user(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response> {
    let form = FormData::read(multipart, state.max_upload_size()).await?;

    // All four fields are required and must be non-blank after trimming
    let (full_name, email, username, password) = match (
        form.trimmed("fullName"),
        form.trimmed("email"),
        form.trimmed("username"),
        form.trimmed("password"),
    ) {
        (Some(f), Some(e), Some(u), Some(p)) => (f, e, u, p),
        _ => return Err(AppError::validation("All fields are required")),
    };

    let username = username.to_lowercase();

    // Uniqueness on both username and email
    let exists = state.db.find_user_by_username(&username)?.is_some()
        || state.db.find_user_by_email(email)?.is_some();
    if exists {
        return Err(AppError::conflict(
            "User with email or username already exists",
        ));
    }

    let avatar_file = form
        .file("avatar")
        .ok_or_else(|| AppError::validation("Avatar file is required"))?;

    let avatar = state
        .uploader
        .upload(
            &avatar_file.filename,
            &avatar_file.content_type,
            avatar_file.data.clone(),
        )
        .await?;

    let cover_image = match form.file("coverImage") {
        Some(file) => Some(
            state
                .uploader
                .upload(&file.filename, &file.content_type, file.data.clone())
                .await?
                .url,
        ),
        None => None,
    };

    let password_hash = hash_password(password)?;

    let user = User::new(
        full_name.to_string(),
        email.to_string(),
        username,
        password_hash,
        avatar.url,
        cover_image,
    );
    state.db.insert_user(&user)?;

    // Re-fetch the stored record; a miss here means the write was lost
    let created = state.db.get_user(user.id)?.ok_or_else(|| {
        AppError::internal("Something went wrong while registering the user")
    })?;

    info!(id = %created.id, username = %created.username, "Registered user");

    Ok(ApiResponse::created(
        UserResponse::from_user(&created),
        "User registered successfully",
    )
    .into_response())
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/register", post(register_user))
}

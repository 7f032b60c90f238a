//! User entity model and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Login name, stored lowercase, unique
    pub username: String,

    /// Email address, unique
    pub email: String,

    /// Display name
    pub full_name: String,

    /// Argon2id password hash (PHC string format), never serialized to clients
    pub password_hash: String,

    /// Hosted avatar URL
    pub avatar: String,

    /// Hosted cover image URL, if one was uploaded
    pub cover_image: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User instance
    ///
    /// The username is lowercased here so the uniqueness index is
    /// case-insensitive by construction.
    pub fn new(
        full_name: String,
        email: String,
        username: String,
        password_hash: String,
        avatar: String,
        cover_image: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_lowercase(),
            email,
            full_name,
            password_hash,
            avatar,
            cover_image,
            created_at: Utc::now(),
        }
    }
}

/// Sanitized user DTO returned to clients.
///
/// The credential fields do not exist on this type, so a response built from
/// it can never leak them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user ID
    pub id: Uuid,

    /// Login name
    pub username: String,

    /// Email address
    pub email: String,

    /// Display name
    pub full_name: String,

    /// Hosted avatar URL
    pub avatar: String,

    /// Hosted cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    /// Create the sanitized projection of a User entity
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
            cover_image: user.cover_image.clone(),
            created_at: user.created_at,
        }
    }
}

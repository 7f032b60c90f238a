//! Request extractors.
//!
//! Session mechanics are out of scope for this server; the acting identity
//! arrives as an `X-User-Id` header carrying the user's UUID, put there by
//! whatever sits in front of us. [`CurrentUser`] is the single seam where a
//! real authentication layer would plug in.

use crate::error::AppError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

/// Header carrying the requester's user ID
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated requester, resolved from the `X-User-Id` header.
///
/// Rejects with 401 when the header is missing or not a valid UUID. Handlers
/// that mutate owned resources take this extractor; read-only handlers don't.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        let value = header
            .to_str()
            .map_err(|_| AppError::unauthorized("Invalid user identity"))?;

        let id = Uuid::parse_str(value)
            .map_err(|_| AppError::unauthorized("Invalid user identity"))?;

        Ok(CurrentUser(id))
    }
}

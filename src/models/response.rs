//! Uniform success envelope.
//!
//! Every success path responds with the same wrapper:
//!
//! ```json
//! { "statusCode": 200, "data": ..., "message": "...", "success": true }
//! ```
//!
//! Error paths use [`crate::error::ErrorResponse`], the matching shape with
//! `success: false` and no data.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Success response envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    /// HTTP status code, duplicated in the body
    pub status_code: u16,

    /// Payload
    pub data: T,

    /// Human-readable message
    pub message: String,

    /// Always true on the success path
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create an envelope with an explicit status code
    pub fn new(data: T, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
            message: message.into(),
            success: true,
        }
    }

    /// 200 OK envelope
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(data, StatusCode::OK, message)
    }

    /// 201 Created envelope
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(data, StatusCode::CREATED, message)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let envelope = ApiResponse::created(vec![1, 2, 3], "Created");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["statusCode"], 201);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["message"], "Created");
        assert_eq!(json["success"], true);
    }

    #[test]
    fn test_ok_envelope() {
        let envelope = ApiResponse::ok("payload", "Fetched");
        assert_eq!(envelope.status_code, 200);
        assert!(envelope.success);
    }
}

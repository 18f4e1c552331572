//! API failure type and its JSON envelope rendering.
//!
//! Handlers pick the variant (and therefore the status code) the same way
//! the per-route catch blocks of the service this replaces did: the update
//! path maps store failures to 400, the read/delete paths to 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The id resolved to nothing. 404 with a bare message envelope.
    #[error("Trip not found")]
    NotFound,
    /// Validation failed or a write was rejected. 400.
    #[error("{message}")]
    BadRequest { message: String, detail: String },
    /// The store misbehaved on a read or delete. 500.
    #[error("{message}")]
    Internal { message: String, detail: String },
}

impl ApiError {
    // ---
    pub fn bad_request(message: impl Into<String>, detail: impl Display) -> Self {
        // ---
        ApiError::BadRequest {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>, detail: impl Display) -> Self {
        // ---
        ApiError::Internal {
            message: message.into(),
            detail: detail.to_string(),
        }
    }
}

/// Failure envelope: `success` is always false, `message` names the failed
/// operation, and `error` carries the underlying detail verbatim when there
/// is one. 404 responses carry the message alone.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Trip not found".to_owned(), None),
            ApiError::BadRequest { message, detail } => {
                tracing::warn!(%detail, "{message}");
                (StatusCode::BAD_REQUEST, message, Some(detail))
            }
            ApiError::Internal { message, detail } => {
                tracing::error!(%detail, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(detail))
            }
        };

        let body = ErrorBody {
            success: false,
            message,
            error,
        };
        (status, Json(body)).into_response()
    }
}

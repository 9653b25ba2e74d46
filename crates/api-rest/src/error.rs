//! HTTP boundary error mapping.
//!
//! The taxonomy is small: invalid input is rejected before any backend call,
//! missing targets map to 404, and everything the backend reports is logged
//! with detail but surfaced to the caller only as a generic description.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use woundiq_core::StoreError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(&'static str),
    Internal(&'static str),
}

impl ApiError {
    /// Map a store failure to its boundary shape.
    ///
    /// Database detail goes to the log; the caller only ever sees the given
    /// generic description.
    pub fn from_store(err: StoreError, context: &'static str) -> Self {
        match err {
            StoreError::NotFound(what) => ApiError::NotFound(what),
            StoreError::Database(err) => {
                tracing::error!("{context}: {err}");
                ApiError::Internal(context)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("{what} not found"))
            }
            ApiError::Internal(context) => {
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

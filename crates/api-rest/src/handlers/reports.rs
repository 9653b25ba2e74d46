//! Report endpoints.
//!
//! Both endpoints forward a backend-built JSON document verbatim. A missing
//! result maps to 404; a present-but-empty result maps to a success with an
//! explicit empty-data marker.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use woundiq_core::ReportPayload;

use crate::error::ApiError;
use crate::handlers::ErrorResponse;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/v1/assessments/{id}/full",
    params(("id" = i64, Path, description = "Assessment identifier")),
    responses(
        (status = 200, description = "Backend-built assessment report, passed through verbatim"),
        (status = 404, description = "No such assessment", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// GET /v1/assessments/{id}/full
#[axum::debug_handler]
pub async fn assessment_full(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let payload = state
        .reports
        .assessment_full(id)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to fetch full assessment"))?;
    forward(payload, "assessment")
}

#[utoipa::path(
    get,
    path = "/v1/patients/{id}/history",
    params(("id" = i64, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Backend-built wound history, passed through verbatim"),
        (status = 404, description = "No history for this patient", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// GET /v1/patients/{id}/history
#[axum::debug_handler]
pub async fn patient_history(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let payload = state
        .reports
        .patient_wound_history(id)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to fetch history"))?;
    forward(payload, "history")
}

fn forward(payload: ReportPayload, what: &'static str) -> Result<Response, ApiError> {
    match payload {
        ReportPayload::Missing => Err(ApiError::NotFound(what)),
        ReportPayload::Empty => Ok(Json(json!({ "data": null })).into_response()),
        ReportPayload::Document(body) => {
            Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_is_a_success_with_null_data() {
        let res = forward(ReportPayload::Empty, "assessment").unwrap();
        assert_eq!(res.status(), axum::http::StatusCode::OK);
    }

    #[test]
    fn missing_payload_is_not_found() {
        assert!(matches!(
            forward(ReportPayload::Missing, "assessment"),
            Err(ApiError::NotFound("assessment"))
        ));
    }

    #[test]
    fn document_is_forwarded_as_json() {
        let res = forward(
            ReportPayload::Document(r#"{"data":[1,2]}"#.into()),
            "history",
        )
        .unwrap();
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}

//! Wound-assessment endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use woundiq_core::{
    Assessment, AssessmentChanges, AssessmentFilter, NewAssessment, Pagination,
};

use crate::error::ApiError;
use crate::handlers::{double_option, CreatedResponse, ErrorResponse, ListResponse};
use crate::AppState;

/// List filters plus pagination, all accepted leniently as raw strings.
///
/// Values that are absent, empty or unparseable are dropped from the filter
/// set rather than rejecting the request.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssessmentListParams {
    pub patient_id: Option<String>,
    pub clinician_id: Option<String>,
    /// RFC3339 lower bound on `created_at`.
    pub date_from: Option<String>,
    /// RFC3339 upper bound on `created_at`.
    pub date_to: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAssessmentReq {
    pub patient_id: i64,
    pub clinician_id: i64,
    pub wound_id: Option<i64>,
    pub notes: Option<String>,
}

/// Partial update. Fields are tri-state: absent and JSON-null both retain
/// the stored value; only a supplied value overwrites it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAssessmentReq {
    #[serde(default, deserialize_with = "double_option")]
    pub patient_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub clinician_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub wound_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

#[utoipa::path(
    get,
    path = "/v1/assessments",
    params(AssessmentListParams),
    responses(
        (status = 200, description = "Page of assessments matching the filters"),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// GET /v1/assessments
#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<AssessmentListParams>,
) -> Result<Json<ListResponse<Assessment>>, ApiError> {
    let filter = AssessmentFilter::from_params(
        params.patient_id.as_deref(),
        params.clinician_id.as_deref(),
        params.date_from.as_deref(),
        params.date_to.as_deref(),
    );
    let page = Pagination::from_params(params.page.as_deref(), params.page_size.as_deref());
    let assessments = state
        .assessments
        .list(&filter, &page)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to fetch assessments"))?;
    Ok(Json(ListResponse {
        data: assessments,
        page: page.page,
        page_size: page.page_size,
    }))
}

#[utoipa::path(
    get,
    path = "/v1/assessments/{id}",
    params(("id" = i64, Path, description = "Assessment identifier")),
    responses(
        (status = 200, description = "The assessment", body = Assessment),
        (status = 404, description = "No such assessment", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// GET /v1/assessments/{id}
#[axum::debug_handler]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Assessment>, ApiError> {
    let assessment = state
        .assessments
        .get(id)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to get assessment"))?;
    Ok(Json(assessment))
}

#[utoipa::path(
    post,
    path = "/v1/assessments",
    request_body = CreateAssessmentReq,
    responses(
        (status = 201, description = "Assessment created", body = CreatedResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// POST /v1/assessments
///
/// `patient_id` and `clinician_id` are required; whether they reference
/// existing rows is enforced by backend constraints.
#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateAssessmentReq>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = state
        .assessments
        .create(NewAssessment {
            patient_id: req.patient_id,
            clinician_id: req.clinician_id,
            wound_id: req.wound_id,
            notes: req.notes,
        })
        .await
        .map_err(|e| ApiError::from_store(e, "failed to create assessment"))?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[utoipa::path(
    put,
    path = "/v1/assessments/{id}",
    params(("id" = i64, Path, description = "Assessment identifier")),
    request_body = UpdateAssessmentReq,
    responses(
        (status = 204, description = "Assessment updated"),
        (status = 404, description = "No such assessment", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// PUT /v1/assessments/{id}
#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateAssessmentReq>,
) -> Result<StatusCode, ApiError> {
    let changes = AssessmentChanges {
        patient_id: req.patient_id.flatten(),
        clinician_id: req.clinician_id.flatten(),
        wound_id: req.wound_id.flatten(),
        notes: req.notes.flatten(),
    };
    state
        .assessments
        .update(id, changes)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to update assessment"))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/v1/assessments/{id}",
    params(("id" = i64, Path, description = "Assessment identifier")),
    responses(
        (status = 204, description = "Assessment deleted"),
        (status = 404, description = "No such assessment", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// DELETE /v1/assessments/{id}
#[axum::debug_handler]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .assessments
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to delete assessment"))?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_req_distinguishes_absent_from_null() {
        let absent: UpdateAssessmentReq = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.wound_id, None);

        let null: UpdateAssessmentReq =
            serde_json::from_str(r#"{"wound_id":null}"#).unwrap();
        assert_eq!(null.wound_id, Some(None));

        let value: UpdateAssessmentReq =
            serde_json::from_str(r#"{"wound_id":12}"#).unwrap();
        assert_eq!(value.wound_id, Some(Some(12)));
    }

    #[test]
    fn create_req_requires_references() {
        let missing: Result<CreateAssessmentReq, _> =
            serde_json::from_str(r#"{"notes":"ok"}"#);
        assert!(missing.is_err());

        let ok: CreateAssessmentReq =
            serde_json::from_str(r#"{"patient_id":1,"clinician_id":2,"notes":"ok"}"#).unwrap();
        assert_eq!(ok.patient_id, 1);
        assert_eq!(ok.wound_id, None);
    }
}

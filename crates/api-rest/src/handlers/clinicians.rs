//! Clinician endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use woundiq_core::{Clinician, ClinicianChanges, NewClinician};

use crate::error::ApiError;
use crate::handlers::{double_option, CreatedResponse, ErrorResponse, ListParams, ListResponse};
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateClinicianReq {
    pub full_name: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Partial update. Fields are tri-state: absent and JSON-null both retain
/// the stored value; only a supplied value overwrites it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateClinicianReq {
    #[serde(default, deserialize_with = "double_option")]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub role: Option<Option<String>>,
}

#[utoipa::path(
    get,
    path = "/v1/clinicians",
    params(ListParams),
    responses(
        (status = 200, description = "Page of clinicians"),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// GET /v1/clinicians
#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<Clinician>>, ApiError> {
    let page = params.pagination();
    let clinicians = state
        .clinicians
        .list(&page)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to fetch clinicians"))?;
    Ok(Json(ListResponse {
        data: clinicians,
        page: page.page,
        page_size: page.page_size,
    }))
}

#[utoipa::path(
    get,
    path = "/v1/clinicians/{id}",
    params(("id" = i64, Path, description = "Clinician identifier")),
    responses(
        (status = 200, description = "The clinician", body = Clinician),
        (status = 404, description = "No such clinician", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// GET /v1/clinicians/{id}
#[axum::debug_handler]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Clinician>, ApiError> {
    let clinician = state
        .clinicians
        .get(id)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to get clinician"))?;
    Ok(Json(clinician))
}

#[utoipa::path(
    post,
    path = "/v1/clinicians",
    request_body = CreateClinicianReq,
    responses(
        (status = 201, description = "Clinician created", body = CreatedResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// POST /v1/clinicians
#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateClinicianReq>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    if req.full_name.is_empty() {
        return Err(ApiError::BadRequest("full_name is required".into()));
    }

    let id = state
        .clinicians
        .create(NewClinician {
            full_name: req.full_name,
            email: req.email,
            role: req.role,
        })
        .await
        .map_err(|e| ApiError::from_store(e, "failed to create clinician"))?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[utoipa::path(
    put,
    path = "/v1/clinicians/{id}",
    params(("id" = i64, Path, description = "Clinician identifier")),
    request_body = UpdateClinicianReq,
    responses(
        (status = 204, description = "Clinician updated"),
        (status = 404, description = "No such clinician", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// PUT /v1/clinicians/{id}
#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateClinicianReq>,
) -> Result<StatusCode, ApiError> {
    let changes = ClinicianChanges {
        full_name: req.full_name.flatten(),
        email: req.email.flatten(),
        role: req.role.flatten(),
    };
    state
        .clinicians
        .update(id, changes)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to update clinician"))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/v1/clinicians/{id}",
    params(("id" = i64, Path, description = "Clinician identifier")),
    responses(
        (status = 204, description = "Clinician deleted"),
        (status = 404, description = "No such clinician", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// DELETE /v1/clinicians/{id}
#[axum::debug_handler]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .clinicians
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to delete clinician"))?;
    Ok(StatusCode::NO_CONTENT)
}

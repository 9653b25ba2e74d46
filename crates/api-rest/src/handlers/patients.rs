//! Patient endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use woundiq_core::sql::parse_timestamp;
use woundiq_core::{NewPatient, Patient, PatientChanges};

use crate::error::ApiError;
use crate::handlers::{double_option, CreatedResponse, ErrorResponse, ListParams, ListResponse};
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    pub full_name: String,
    /// ISO-8601 (RFC3339); an empty string is treated as absent.
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub medical_record_number: Option<String>,
}

/// Partial update. Fields are tri-state: absent and JSON-null both retain
/// the stored value; only a supplied value overwrites it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePatientReq {
    #[serde(default, deserialize_with = "double_option")]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub date_of_birth: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub medical_record_number: Option<Option<String>>,
}

#[utoipa::path(
    get,
    path = "/v1/patients",
    params(ListParams),
    responses(
        (status = 200, description = "Page of patients"),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// GET /v1/patients
#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<Patient>>, ApiError> {
    let page = params.pagination();
    let patients = state
        .patients
        .list(&page)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to fetch patients"))?;
    Ok(Json(ListResponse {
        data: patients,
        page: page.page,
        page_size: page.page_size,
    }))
}

#[utoipa::path(
    get,
    path = "/v1/patients/{id}",
    params(("id" = i64, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "The patient", body = Patient),
        (status = 404, description = "No such patient", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// GET /v1/patients/{id}
#[axum::debug_handler]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state
        .patients
        .get(id)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to get patient"))?;
    Ok(Json(patient))
}

#[utoipa::path(
    post,
    path = "/v1/patients",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = CreatedResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// POST /v1/patients
///
/// Invalid input is rejected before any backend call.
#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePatientReq>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    if req.full_name.is_empty() {
        return Err(ApiError::BadRequest("full_name is required".into()));
    }
    let date_of_birth = match req.date_of_birth.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(parse_timestamp(raw).ok_or_else(|| {
            ApiError::BadRequest("date_of_birth must be ISO-8601 (RFC3339)".into())
        })?),
    };

    let id = state
        .patients
        .create(NewPatient {
            full_name: req.full_name,
            date_of_birth,
            gender: req.gender,
            medical_record_number: req.medical_record_number,
        })
        .await
        .map_err(|e| ApiError::from_store(e, "failed to create patient"))?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[utoipa::path(
    put,
    path = "/v1/patients/{id}",
    params(("id" = i64, Path, description = "Patient identifier")),
    request_body = UpdatePatientReq,
    responses(
        (status = 204, description = "Patient updated"),
        (status = 404, description = "No such patient", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// PUT /v1/patients/{id}
///
/// Omitted fields keep their stored values; `updated_at` is always
/// refreshed. A date supplied empty or unparseable is treated as omitted.
#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePatientReq>,
) -> Result<StatusCode, ApiError> {
    let changes = PatientChanges {
        full_name: req.full_name.flatten(),
        date_of_birth: req
            .date_of_birth
            .flatten()
            .as_deref()
            .and_then(parse_timestamp),
        gender: req.gender.flatten(),
        medical_record_number: req.medical_record_number.flatten(),
    };
    state
        .patients
        .update(id, changes)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to update patient"))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/v1/patients/{id}",
    params(("id" = i64, Path, description = "Patient identifier")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 404, description = "No such patient", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
/// DELETE /v1/patients/{id}
#[axum::debug_handler]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .patients
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to delete patient"))?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_req_distinguishes_absent_from_null() {
        let absent: UpdatePatientReq = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.gender, None);

        let null: UpdatePatientReq = serde_json::from_str(r#"{"gender":null}"#).unwrap();
        assert_eq!(null.gender, Some(None));

        let value: UpdatePatientReq = serde_json::from_str(r#"{"gender":"female"}"#).unwrap();
        assert_eq!(value.gender, Some(Some("female".to_string())));
    }

    #[test]
    fn absent_and_null_updates_both_retain() {
        // Both shapes flatten to "no change" for the update builder.
        let absent: UpdatePatientReq = serde_json::from_str("{}").unwrap();
        let null: UpdatePatientReq =
            serde_json::from_str(r#"{"full_name":null}"#).unwrap();
        assert_eq!(absent.full_name.flatten(), None);
        assert_eq!(null.full_name.flatten(), None);
    }

    #[test]
    fn empty_or_garbage_update_dates_fall_back_to_retain() {
        let req: UpdatePatientReq =
            serde_json::from_str(r#"{"date_of_birth":""}"#).unwrap();
        assert_eq!(req.date_of_birth.flatten().as_deref().and_then(parse_timestamp), None);

        let req: UpdatePatientReq =
            serde_json::from_str(r#"{"date_of_birth":"yesterday"}"#).unwrap();
        assert_eq!(req.date_of_birth.flatten().as_deref().and_then(parse_timestamp), None);
    }
}

//! Request handlers, one module per resource.
//!
//! Shared pieces live here: the list envelope, the create/error response
//! shapes, lenient pagination parameters, and the tri-state deserializer
//! used by the partial-update request types.

pub mod assessments;
pub mod clinicians;
pub mod patients;
pub mod reports;

use axum::response::Json;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use woundiq_core::Pagination;

/// Standard list envelope: one page of records plus the pagination actually
/// applied (after defaulting and clamping).
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub page: i64,
    pub page_size: i64,
}

/// Response for successful creates.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i64,
}

/// JSON error body, `{"error": "<message>"}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Pagination query parameters.
///
/// Kept as raw strings: values that fail to parse fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListParams {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_params(self.page.as_deref(), self.page_size.as_deref())
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint.
///
/// Used for monitoring and load balancer health checks.
pub async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "WoundIQ API is alive".into(),
    })
}

/// Deserialize a field into `Some(value)` so that, combined with
/// `#[serde(default)]`, an absent field (`None`) stays distinguishable from
/// a field sent as JSON null (`Some(None)`).
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_fall_back_on_garbage() {
        let params = ListParams {
            page: Some("abc".into()),
            page_size: Some("-1".into()),
        };
        let page = params.pagination();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 20);
    }
}

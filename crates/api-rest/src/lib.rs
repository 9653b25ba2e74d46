//! # API REST
//!
//! REST API implementation for WoundIQ.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, status mapping, CORS)
//!
//! Uses `woundiq-core` for the data layer; nothing here touches SQL.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use woundiq_core::db::PgPool;
use woundiq_core::{
    AssessmentRepository, ClinicianRepository, PatientRepository, ReportRepository,
};

/// Application state shared across REST API handlers.
///
/// One repository per resource; all of them clone the same underlying
/// connection pool.
#[derive(Clone)]
pub struct AppState {
    pub patients: PatientRepository,
    pub clinicians: ClinicianRepository,
    pub assessments: AssessmentRepository,
    pub reports: ReportRepository,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            patients: PatientRepository::new(pool.clone()),
            clinicians: ClinicianRepository::new(pool.clone()),
            assessments: AssessmentRepository::new(pool.clone()),
            reports: ReportRepository::new(pool),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::patients::list,
        handlers::patients::get,
        handlers::patients::create,
        handlers::patients::update,
        handlers::patients::remove,
        handlers::clinicians::list,
        handlers::clinicians::get,
        handlers::clinicians::create,
        handlers::clinicians::update,
        handlers::clinicians::remove,
        handlers::assessments::list,
        handlers::assessments::get,
        handlers::assessments::create,
        handlers::assessments::update,
        handlers::assessments::remove,
        handlers::reports::assessment_full,
        handlers::reports::patient_history,
    ),
    components(schemas(
        woundiq_core::Patient,
        woundiq_core::Clinician,
        woundiq_core::Assessment,
        handlers::patients::CreatePatientReq,
        handlers::patients::UpdatePatientReq,
        handlers::clinicians::CreateClinicianReq,
        handlers::clinicians::UpdateClinicianReq,
        handlers::assessments::CreateAssessmentReq,
        handlers::assessments::UpdateAssessmentReq,
        handlers::CreatedResponse,
        handlers::ErrorResponse,
        handlers::HealthRes,
    ))
)]
struct ApiDoc;

/// Assemble the full application router.
///
/// Resource routes live under `/v1`; `/health` and the Swagger UI sit at
/// the root. CORS is permissive: any origin may call the listed methods.
pub fn router(state: AppState) -> Router {
    let v1 = Router::new()
        .route(
            "/patients",
            get(handlers::patients::list).post(handlers::patients::create),
        )
        .route(
            "/patients/:id",
            get(handlers::patients::get)
                .put(handlers::patients::update)
                .delete(handlers::patients::remove),
        )
        .route("/patients/:id/history", get(handlers::reports::patient_history))
        .route(
            "/clinicians",
            get(handlers::clinicians::list).post(handlers::clinicians::create),
        )
        .route(
            "/clinicians/:id",
            get(handlers::clinicians::get)
                .put(handlers::clinicians::update)
                .delete(handlers::clinicians::remove),
        )
        .route(
            "/assessments",
            get(handlers::assessments::list).post(handlers::assessments::create),
        )
        .route(
            "/assessments/:id",
            get(handlers::assessments::get)
                .put(handlers::assessments::update)
                .delete(handlers::assessments::remove),
        )
        .route(
            "/assessments/:id/full",
            get(handlers::reports::assessment_full),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/v1", v1)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    // A lazily-connecting pool never opens a socket for requests that are
    // rejected before any statement executes, which is exactly the set of
    // paths exercised here.
    fn test_app() -> Router {
        let pool = woundiq_core::db::connect_lazy("postgres://localhost:5432/woundiq_test")
            .expect("lazy pool");
        router(AppState::new(pool))
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_alive() {
        let res = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_patient_rejects_bad_date_before_any_backend_call() {
        let res = test_app()
            .oneshot(json_post(
                "/v1/patients",
                r#"{"full_name":"Ada Quill","date_of_birth":"not-a-date"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body = res.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "date_of_birth must be ISO-8601 (RFC3339)");
    }

    #[tokio::test]
    async fn create_patient_requires_full_name() {
        // Field absent entirely: rejected during deserialization.
        let res = test_app()
            .oneshot(json_post("/v1/patients", "{}"))
            .await
            .unwrap();
        assert!(res.status().is_client_error());

        // Field present but empty: rejected by the handler.
        let res = test_app()
            .oneshot(json_post("/v1/patients", r#"{"full_name":""}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_assessment_requires_references() {
        let res = test_app()
            .oneshot(json_post("/v1/assessments", r#"{"notes":"ok"}"#))
            .await
            .unwrap();
        assert!(res.status().is_client_error());
    }

    #[tokio::test]
    async fn malformed_json_is_a_client_error() {
        let res = test_app()
            .oneshot(json_post("/v1/clinicians", "{"))
            .await
            .unwrap();
        assert!(res.status().is_client_error());
    }

    #[tokio::test]
    async fn non_numeric_path_id_is_a_client_error() {
        let res = test_app()
            .oneshot(Request::get("/v1/patients/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(res.status().is_client_error());
    }
}

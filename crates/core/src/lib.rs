//! # WoundIQ Core
//!
//! Core data layer for the WoundIQ wound-assessment record system.
//!
//! This crate contains everything below the HTTP boundary:
//! - Domain records for patients, clinicians and assessments
//! - SQL assembly: filtered, paginated SELECTs and COALESCE partial updates
//! - Repositories executing those statements against PostgreSQL
//! - Startup configuration and connection-pool construction
//!
//! **No API concerns**: routing, request DTOs and status-code mapping belong
//! in `api-rest`.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod sql;

pub use config::{Config, ConfigError};
pub use error::{StoreError, StoreResult};
pub use models::{Assessment, Clinician, Patient};
pub use repositories::assessments::{
    AssessmentChanges, AssessmentFilter, AssessmentRepository, NewAssessment,
};
pub use repositories::clinicians::{ClinicianChanges, ClinicianRepository, NewClinician};
pub use repositories::patients::{NewPatient, PatientChanges, PatientRepository};
pub use repositories::reports::{ReportPayload, ReportRepository};
pub use sql::{Bind, Pagination};

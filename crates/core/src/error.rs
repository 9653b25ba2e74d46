//! Error types for the data layer.

/// Failures surfaced by the repositories.
///
/// `NotFound` covers every identifier-targeted operation whose target row
/// does not exist; `Database` wraps anything the backend reports (connection
/// loss, constraint violations, statement errors). Cross-field validation is
/// delegated to backend constraints, so a dangling `patient_id` on an
/// assessment insert surfaces here as `Database`, not as invalid input.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

//! Report gateway.
//!
//! The two report endpoints delegate aggregation to database functions that
//! return a fully-built JSON document. The payload is owned by the backend:
//! it is forwarded verbatim, never re-parsed or re-validated here. The
//! `::text` cast keeps the wire value opaque regardless of whether the
//! function returns `json` or `jsonb`.

use sqlx::PgPool;

use crate::error::StoreResult;

/// Outcome of a report call.
///
/// `Missing` (the function produced no row) and `Empty` (it produced a row
/// with no content) are distinct: the former maps to not-found at the
/// boundary, the latter to a success with an explicit empty-data marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportPayload {
    Missing,
    Empty,
    Document(String),
}

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Full assessment report, built by `get_assessment_full`.
    pub async fn assessment_full(&self, id: i64) -> StoreResult<ReportPayload> {
        self.call("SELECT get_assessment_full($1)::text", id).await
    }

    /// Wound history for a patient, built by `get_patient_wound_history`.
    pub async fn patient_wound_history(&self, id: i64) -> StoreResult<ReportPayload> {
        self.call("SELECT get_patient_wound_history($1)::text", id)
            .await
    }

    async fn call(&self, sql: &str, id: i64) -> StoreResult<ReportPayload> {
        let row = sqlx::query_scalar::<_, Option<String>>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(classify(row))
    }
}

fn classify(row: Option<Option<String>>) -> ReportPayload {
    match row {
        None => ReportPayload::Missing,
        Some(None) => ReportPayload::Empty,
        Some(Some(body)) if body.is_empty() => ReportPayload::Empty,
        Some(Some(body)) => ReportPayload::Document(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_row_is_missing() {
        assert_eq!(classify(None), ReportPayload::Missing);
    }

    #[test]
    fn null_and_empty_results_are_empty() {
        assert_eq!(classify(Some(None)), ReportPayload::Empty);
        assert_eq!(classify(Some(Some(String::new()))), ReportPayload::Empty);
    }

    #[test]
    fn content_is_forwarded_untouched() {
        let body = r#"{"assessment":{"id":4}}"#.to_string();
        assert_eq!(
            classify(Some(Some(body.clone()))),
            ReportPayload::Document(body)
        );
    }
}

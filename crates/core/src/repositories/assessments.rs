//! Wound-assessment record storage.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::models::Assessment;
use crate::sql::{
    bind_all, bind_all_as, parse_timestamp, Bind, Pagination, SelectBuilder, UpdateBuilder,
};

const COLUMNS: &str =
    "id, patient_id, clinician_id, wound_id, notes, created_at, updated_at";

/// Recognised list filters, parsed leniently from raw query parameters.
///
/// Absent, empty or unparseable values are dropped from the filter set,
/// never treated as "match empty". Date filters accept RFC3339 only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentFilter {
    pub patient_id: Option<i64>,
    pub clinician_id: Option<i64>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl AssessmentFilter {
    pub fn from_params(
        patient_id: Option<&str>,
        clinician_id: Option<&str>,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> Self {
        Self {
            patient_id: parse_id(patient_id),
            clinician_id: parse_id(clinician_id),
            date_from: date_from.and_then(parse_timestamp),
            date_to: date_to.and_then(parse_timestamp),
        }
    }
}

fn parse_id(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|r| r.parse::<i64>().ok())
}

/// Fields accepted when creating an assessment.
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub patient_id: i64,
    pub clinician_id: i64,
    pub wound_id: Option<i64>,
    pub notes: Option<String>,
}

/// Partial-update change-set. A `None` field retains the stored value.
#[derive(Debug, Clone, Default)]
pub struct AssessmentChanges {
    pub patient_id: Option<i64>,
    pub clinician_id: Option<i64>,
    pub wound_id: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct AssessmentRepository {
    pool: PgPool,
}

impl AssessmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filter: &AssessmentFilter,
        page: &Pagination,
    ) -> StoreResult<Vec<Assessment>> {
        let (sql, binds) = SelectBuilder::new("assessments", COLUMNS)
            .maybe_filter("patient_id", "=", filter.patient_id.map(Bind::int))
            .maybe_filter("clinician_id", "=", filter.clinician_id.map(Bind::int))
            .maybe_filter("created_at", ">=", filter.date_from.map(Bind::timestamp))
            .maybe_filter("created_at", "<=", filter.date_to.map(Bind::timestamp))
            .build(page);
        let assessments = bind_all_as(sqlx::query_as::<_, Assessment>(&sql), binds)
            .fetch_all(&self.pool)
            .await?;
        Ok(assessments)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Assessment> {
        let sql = format!("SELECT {COLUMNS} FROM assessments WHERE id = $1");
        sqlx::query_as::<_, Assessment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound("assessment"))
    }

    /// Referential integrity of `patient_id`/`clinician_id` is enforced by
    /// backend constraints; a dangling reference surfaces as a database
    /// error, not as invalid input.
    pub async fn create(&self, new: NewAssessment) -> StoreResult<i64> {
        tracing::debug!(patient_id = new.patient_id, "creating assessment");
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO assessments (patient_id, clinician_id, wound_id, notes, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, now(), now()) RETURNING id",
        )
        .bind(new.patient_id)
        .bind(new.clinician_id)
        .bind(new.wound_id)
        .bind(new.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn update(&self, id: i64, changes: AssessmentChanges) -> StoreResult<()> {
        let (sql, binds) = UpdateBuilder::new("assessments", id)
            .coalesce("patient_id", Bind::Int(changes.patient_id))
            .coalesce("clinician_id", Bind::Int(changes.clinician_id))
            .coalesce("wound_id", Bind::Int(changes.wound_id))
            .coalesce("notes", Bind::Text(changes.notes))
            .build();
        let result = bind_all(sqlx::query(&sql), binds)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("assessment"));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM assessments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("assessment"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parses_valid_values() {
        let filter = AssessmentFilter::from_params(
            Some("12"),
            Some("3"),
            Some("2024-01-01T00:00:00Z"),
            Some("2024-02-01T00:00:00Z"),
        );

        assert_eq!(filter.patient_id, Some(12));
        assert_eq!(filter.clinician_id, Some(3));
        assert!(filter.date_from.is_some());
        assert!(filter.date_to.is_some());
    }

    #[test]
    fn filter_drops_absent_and_empty_values() {
        let filter = AssessmentFilter::from_params(None, Some(""), None, Some(""));
        assert_eq!(filter, AssessmentFilter::default());
    }

    #[test]
    fn filter_silently_drops_unparseable_values() {
        let filter = AssessmentFilter::from_params(
            Some("twelve"),
            Some("3"),
            Some("2024-13-45"),
            Some("not-a-date"),
        );

        assert_eq!(filter.patient_id, None);
        assert_eq!(filter.clinician_id, Some(3));
        assert_eq!(filter.date_from, None);
        assert_eq!(filter.date_to, None);
    }
}

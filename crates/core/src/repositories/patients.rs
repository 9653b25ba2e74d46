//! Patient record storage.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::models::Patient;
use crate::sql::{bind_all, bind_all_as, Bind, Pagination, SelectBuilder, UpdateBuilder};

const COLUMNS: &str =
    "id, full_name, date_of_birth, gender, medical_record_number, created_at, updated_at";

/// Fields accepted when creating a patient.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub full_name: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub gender: Option<String>,
    pub medical_record_number: Option<String>,
}

/// Partial-update change-set. A `None` field retains the stored value.
#[derive(Debug, Clone, Default)]
pub struct PatientChanges {
    pub full_name: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub gender: Option<String>,
    pub medical_record_number: Option<String>,
}

#[derive(Clone)]
pub struct PatientRepository {
    pool: PgPool,
}

impl PatientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, page: &Pagination) -> StoreResult<Vec<Patient>> {
        let (sql, binds) = SelectBuilder::new("patients", COLUMNS).build(page);
        let patients = bind_all_as(sqlx::query_as::<_, Patient>(&sql), binds)
            .fetch_all(&self.pool)
            .await?;
        Ok(patients)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Patient> {
        let sql = format!("SELECT {COLUMNS} FROM patients WHERE id = $1");
        sqlx::query_as::<_, Patient>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound("patient"))
    }

    /// Create a patient via the backend's `add_patient` function.
    ///
    /// The identifier is produced by the database, never computed here.
    pub async fn create(&self, new: NewPatient) -> StoreResult<i64> {
        tracing::debug!(full_name = %new.full_name, "creating patient");
        let id = sqlx::query_scalar::<_, i64>("SELECT add_patient($1, $2, $3, $4)")
            .bind(new.full_name)
            .bind(new.date_of_birth)
            .bind(new.gender)
            .bind(new.medical_record_number)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    pub async fn update(&self, id: i64, changes: PatientChanges) -> StoreResult<()> {
        let (sql, binds) = UpdateBuilder::new("patients", id)
            .coalesce("full_name", Bind::Text(changes.full_name))
            .coalesce("date_of_birth", Bind::Timestamp(changes.date_of_birth))
            .coalesce("gender", Bind::Text(changes.gender))
            .coalesce(
                "medical_record_number",
                Bind::Text(changes.medical_record_number),
            )
            .build();
        let result = bind_all(sqlx::query(&sql), binds)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("patient"));
        }
        Ok(())
    }

    /// Unconditional, irreversible delete.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("patient"));
        }
        Ok(())
    }
}

//! Clinician record storage.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::models::Clinician;
use crate::sql::{bind_all, bind_all_as, Bind, Pagination, SelectBuilder, UpdateBuilder};

const COLUMNS: &str = "id, full_name, email, role, created_at, updated_at";

/// Fields accepted when creating a clinician.
#[derive(Debug, Clone)]
pub struct NewClinician {
    pub full_name: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Partial-update change-set. A `None` field retains the stored value.
#[derive(Debug, Clone, Default)]
pub struct ClinicianChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Clone)]
pub struct ClinicianRepository {
    pool: PgPool,
}

impl ClinicianRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, page: &Pagination) -> StoreResult<Vec<Clinician>> {
        let (sql, binds) = SelectBuilder::new("clinicians", COLUMNS).build(page);
        let clinicians = bind_all_as(sqlx::query_as::<_, Clinician>(&sql), binds)
            .fetch_all(&self.pool)
            .await?;
        Ok(clinicians)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Clinician> {
        let sql = format!("SELECT {COLUMNS} FROM clinicians WHERE id = $1");
        sqlx::query_as::<_, Clinician>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound("clinician"))
    }

    pub async fn create(&self, new: NewClinician) -> StoreResult<i64> {
        tracing::debug!(full_name = %new.full_name, "creating clinician");
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO clinicians (full_name, email, role, created_at, updated_at) \
             VALUES ($1, $2, $3, now(), now()) RETURNING id",
        )
        .bind(new.full_name)
        .bind(new.email)
        .bind(new.role)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn update(&self, id: i64, changes: ClinicianChanges) -> StoreResult<()> {
        let (sql, binds) = UpdateBuilder::new("clinicians", id)
            .coalesce("full_name", Bind::Text(changes.full_name))
            .coalesce("email", Bind::Text(changes.email))
            .coalesce("role", Bind::Text(changes.role))
            .build();
        let result = bind_all(sqlx::query(&sql), binds)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("clinician"));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM clinicians WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("clinician"));
        }
        Ok(())
    }
}

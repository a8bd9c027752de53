//! Repository for veterinarians.

use sqlx::PgPool;

use rifugio_core::types::DbId;

use crate::models::vet::{CreateVet, UpdateVet, Vet};
use crate::{clamp_limit, clamp_offset};

const COLUMNS: &str =
    "id, name, clinic, fiscal_code, phone, email, deleted_at, created_at, updated_at";

pub struct VetRepo;

impl VetRepo {
    pub async fn create(pool: &PgPool, input: &CreateVet) -> Result<Vet, sqlx::Error> {
        let query = format!(
            "INSERT INTO vets (name, clinic, fiscal_code, phone, email)
             VALUES ($1, $2, UPPER($3), $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vet>(&query)
            .bind(&input.name)
            .bind(&input.clinic)
            .bind(&input.fiscal_code)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vets WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Vet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Vet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vets
             WHERE deleted_at IS NULL
             ORDER BY name
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Vet>(&query)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVet,
    ) -> Result<Option<Vet>, sqlx::Error> {
        let query = format!(
            "UPDATE vets SET
                name = COALESCE($2, name),
                clinic = COALESCE($3, clinic),
                phone = COALESCE($4, phone),
                email = COALESCE($5, email)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vet>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.clinic)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE vets SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

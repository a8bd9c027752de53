//! Repository for adopters.

use sqlx::PgPool;

use rifugio_core::types::DbId;

use crate::models::adopter::{Adopter, CreateAdopter, UpdateAdopter};
use crate::{clamp_limit, clamp_offset};

const COLUMNS: &str = "\
    id, fiscal_code, first_name, last_name, address, city_id, phone, email, \
    deleted_at, created_at, updated_at";

pub struct AdopterRepo;

impl AdopterRepo {
    /// Register a new adopter. The fiscal code is stored uppercase; a
    /// duplicate surfaces as a unique violation on `uq_adopters_fiscal_code`.
    pub async fn create(pool: &PgPool, input: &CreateAdopter) -> Result<Adopter, sqlx::Error> {
        let query = format!(
            "INSERT INTO adopters (fiscal_code, first_name, last_name, address, city_id, phone, email)
             VALUES (UPPER($1), $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Adopter>(&query)
            .bind(&input.fiscal_code)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.address)
            .bind(input.city_id)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Adopter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM adopters WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Adopter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_fiscal_code(
        pool: &PgPool,
        fiscal_code: &str,
    ) -> Result<Option<Adopter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM adopters
             WHERE fiscal_code = UPPER($1) AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Adopter>(&query)
            .bind(fiscal_code)
            .fetch_optional(pool)
            .await
    }

    /// Paginated listing, optionally filtered by a case-insensitive match
    /// on either name.
    pub async fn list(
        pool: &PgPool,
        name: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Adopter>, sqlx::Error> {
        match name {
            Some(name) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM adopters
                     WHERE deleted_at IS NULL
                       AND (first_name ILIKE $1 OR last_name ILIKE $1)
                     ORDER BY last_name, first_name
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, Adopter>(&query)
                    .bind(format!("%{name}%"))
                    .bind(clamp_limit(limit))
                    .bind(clamp_offset(offset))
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM adopters
                     WHERE deleted_at IS NULL
                     ORDER BY last_name, first_name
                     LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, Adopter>(&query)
                    .bind(clamp_limit(limit))
                    .bind(clamp_offset(offset))
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Partial update. The fiscal code is immutable and not touched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdopter,
    ) -> Result<Option<Adopter>, sqlx::Error> {
        let query = format!(
            "UPDATE adopters SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                address = COALESCE($4, address),
                city_id = COALESCE($5, city_id),
                phone = COALESCE($6, phone),
                email = COALESCE($7, email)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Adopter>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.address)
            .bind(input.city_id)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_optional(pool)
            .await
    }

    /// Soft delete. Adoption history keeps pointing at the row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE adopters SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

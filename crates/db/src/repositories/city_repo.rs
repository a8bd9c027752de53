//! Repository for city reference data.
//!
//! Cities are seeded by migration and treated as read-only at runtime.

use sqlx::PgPool;

use rifugio_core::types::DbId;

use crate::models::city::City;

const COLUMNS: &str = "id, code, name, province";

pub struct CityRepo;

impl CityRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<City>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cities WHERE id = $1");
        sqlx::query_as::<_, City>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<City>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cities WHERE code = UPPER($1)");
        sqlx::query_as::<_, City>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// All cities, optionally filtered by a case-insensitive name match.
    pub async fn list(pool: &PgPool, name: Option<&str>) -> Result<Vec<City>, sqlx::Error> {
        match name {
            Some(name) => {
                let query =
                    format!("SELECT {COLUMNS} FROM cities WHERE name ILIKE $1 ORDER BY name");
                sqlx::query_as::<_, City>(&query)
                    .bind(format!("%{name}%"))
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM cities ORDER BY name");
                sqlx::query_as::<_, City>(&query).fetch_all(pool).await
            }
        }
    }
}

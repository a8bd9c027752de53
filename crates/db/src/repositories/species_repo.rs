//! Repository for species and breed reference data.

use sqlx::PgPool;

use rifugio_core::types::DbId;

use crate::models::species::{Breed, CreateBreed, Species};

const SPECIES_COLUMNS: &str = "id, code, name";
const BREED_COLUMNS: &str = "id, species_id, name";

pub struct SpeciesRepo;

impl SpeciesRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Species>, sqlx::Error> {
        let query = format!("SELECT {SPECIES_COLUMNS} FROM species WHERE id = $1");
        sqlx::query_as::<_, Species>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Species>, sqlx::Error> {
        let query = format!("SELECT {SPECIES_COLUMNS} FROM species ORDER BY name");
        sqlx::query_as::<_, Species>(&query).fetch_all(pool).await
    }

    /// Breeds for one species, alphabetical.
    pub async fn list_breeds(pool: &PgPool, species_id: DbId) -> Result<Vec<Breed>, sqlx::Error> {
        let query =
            format!("SELECT {BREED_COLUMNS} FROM breeds WHERE species_id = $1 ORDER BY name");
        sqlx::query_as::<_, Breed>(&query)
            .bind(species_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create_breed(pool: &PgPool, input: &CreateBreed) -> Result<Breed, sqlx::Error> {
        let query = format!(
            "INSERT INTO breeds (species_id, name)
             VALUES ($1, $2)
             RETURNING {BREED_COLUMNS}"
        );
        sqlx::query_as::<_, Breed>(&query)
            .bind(input.species_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }
}

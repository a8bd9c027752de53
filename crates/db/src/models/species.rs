//! Species and breed reference data models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use rifugio_core::types::DbId;

/// A species row (dog, cat, ...). The single-letter `code` is the first
/// component of generated animal codes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Species {
    pub id: DbId,
    pub code: String,
    pub name: String,
}

/// A breed row, scoped to a species.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Breed {
    pub id: DbId,
    pub species_id: DbId,
    pub name: String,
}

/// DTO for adding a breed to a species.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBreed {
    pub species_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

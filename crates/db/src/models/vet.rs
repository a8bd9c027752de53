//! Veterinarian entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use rifugio_core::types::{DbId, Timestamp};

/// A vet row from the `vets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vet {
    pub id: DbId,
    pub name: String,
    pub clinic: Option<String>,
    pub fiscal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new vet.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVet {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub clinic: Option<String>,
    #[validate(length(equal = 16))]
    pub fiscal_code: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// DTO for updating an existing vet. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateVet {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub clinic: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

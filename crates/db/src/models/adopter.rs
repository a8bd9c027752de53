//! Adopter entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use rifugio_core::types::{DbId, Timestamp};

/// An adopter row from the `adopters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Adopter {
    pub id: DbId,
    pub fiscal_code: String,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub city_id: Option<DbId>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new adopter.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAdopter {
    /// Italian fiscal codes are 16 characters; stored uppercase.
    #[validate(length(equal = 16))]
    pub fiscal_code: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub address: Option<String>,
    pub city_id: Option<DbId>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// DTO for updating an existing adopter. The fiscal code is immutable.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAdopter {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city_id: Option<DbId>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

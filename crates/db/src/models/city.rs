//! City reference data model.

use serde::Serialize;
use sqlx::FromRow;

use rifugio_core::types::DbId;

/// A city row from the `cities` table. Reference data, seeded and loaded
/// in bulk; no update DTO.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct City {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub province: String,
}

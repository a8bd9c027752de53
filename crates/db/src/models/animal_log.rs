//! Animal event log models.
//!
//! Log rows are append-only snapshots of lifecycle events; they have no
//! update DTO and no `updated_at` on purpose.

use serde::Serialize;
use sqlx::FromRow;

use rifugio_core::types::{DbId, Timestamp};

/// A single animal log entry. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnimalLog {
    pub id: DbId,
    pub animal_id: DbId,
    pub event: String,
    pub payload: Option<serde_json::Value>,
    pub operator: Option<String>,
    pub created_at: Timestamp,
}

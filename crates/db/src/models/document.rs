//! Document metadata models.
//!
//! Document bytes live in the storage backend under `storage_key`; these
//! rows carry only metadata and the animal association.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rifugio_core::types::{DbId, Timestamp};

/// A stored document's metadata, from the `documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub filename: String,
    pub mime_type: String,
    pub storage_key: String,
    pub size_bytes: i64,
    /// True for user uploads, false for system-rendered documents.
    pub uploaded: bool,
    pub created_at: Timestamp,
}

/// DTO for persisting document metadata after the bytes have been written
/// to storage.
#[derive(Debug, Clone)]
pub struct CreateDocument {
    pub filename: String,
    pub mime_type: String,
    pub storage_key: String,
    pub size_bytes: i64,
    pub uploaded: bool,
}

/// A typed document kind (entry communication, adoption certificate, ...).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DocumentKind {
    pub id: DbId,
    pub code: String,
    pub title: String,
}

/// DTO for associating a stored document with an animal.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachDocument {
    pub document_id: DbId,
    pub kind_code: String,
    pub title: String,
}

/// A document attached to an animal, joined to its metadata and kind.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnimalDocument {
    pub id: DbId,
    pub animal_id: DbId,
    pub document_id: DbId,
    pub kind_code: String,
    pub kind_title: String,
    pub title: String,
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub uploaded: bool,
    pub created_at: Timestamp,
}

//! Repository for document metadata and document kinds.
//!
//! Bytes live in the storage backend; the rows here only describe them.

use sqlx::PgPool;

use rifugio_core::types::DbId;

use crate::models::document::{CreateDocument, Document, DocumentKind};

const COLUMNS: &str = "id, filename, mime_type, storage_key, size_bytes, uploaded, created_at";

pub struct DocumentRepo;

impl DocumentRepo {
    /// Persist metadata for a document whose bytes are already in storage.
    pub async fn create(pool: &PgPool, input: &CreateDocument) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents (filename, mime_type, storage_key, size_bytes, uploaded)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(&input.filename)
            .bind(&input.mime_type)
            .bind(&input.storage_key)
            .bind(input.size_bytes)
            .bind(input.uploaded)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a document's metadata row. The caller removes the stored
    /// bytes afterwards; orphaned storage keys are harmless, orphaned rows
    /// are not.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All document kinds, for the startup kind table.
    pub async fn list_kinds(pool: &PgPool) -> Result<Vec<DocumentKind>, sqlx::Error> {
        sqlx::query_as::<_, DocumentKind>("SELECT id, code, title FROM document_kinds ORDER BY id")
            .fetch_all(pool)
            .await
    }
}

//! Handlers for the `/documents` resource.
//!
//! Document bytes go to the storage backend; metadata rows go to the
//! database. Upload is a multipart form with a required `file` field.

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use rifugio_core::error::CoreError;
use rifugio_core::types::DbId;
use rifugio_db::models::document::{CreateDocument, Document, DocumentKind};
use rifugio_db::repositories::DocumentRepo;
use rifugio_storage::StorageError;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/documents
///
/// Accepts a multipart form with a required `file` field. Stores the bytes
/// under a fresh uuid-based key, then persists the metadata row.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Document>)> {
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("document.bin").to_string();
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file = Some((filename, mime_type, data.to_vec()));
        }
    }

    let (filename, mime_type, data) =
        file.ok_or_else(|| AppError::BadRequest("missing 'file' field".to_string()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("uploaded file is empty".to_string()));
    }

    let storage_key = format!("documents/{}/{filename}", uuid::Uuid::new_v4());
    state.storage.put(&storage_key, &data).await?;

    let input = CreateDocument {
        filename,
        mime_type,
        storage_key,
        size_bytes: data.len() as i64,
        uploaded: true,
    };
    let document = DocumentRepo::create(&state.pool, &input).await?;
    tracing::debug!(document_id = document.id, key = %document.storage_key, "Document stored");
    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/v1/documents/kinds
pub async fn list_kinds(State(state): State<AppState>) -> Json<Vec<DocumentKind>> {
    Json(state.document_kinds.all().to_vec())
}

/// GET /api/v1/documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Document>> {
    let document = find_document(&state, id).await?;
    Ok(Json(document))
}

/// GET /api/v1/documents/{id}/content
///
/// Streams the stored bytes back with the recorded content type.
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let document = find_document(&state, id).await?;
    let bytes = state.storage.get(&document.storage_key).await?;

    let headers = [
        (header::CONTENT_TYPE, document.mime_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.filename),
        ),
    ];
    Ok((headers, bytes).into_response())
}

/// DELETE /api/v1/documents/{id}
///
/// Removes the metadata row first, then the stored bytes. A missing
/// object in storage is tolerated.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let document = find_document(&state, id).await?;
    DocumentRepo::delete(&state.pool, id).await?;

    match state.storage.delete(&document.storage_key).await {
        Ok(()) | Err(StorageError::NotFound { .. }) => {}
        Err(err) => return Err(err.into()),
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn find_document(state: &AppState, id: DbId) -> AppResult<Document> {
    DocumentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))
}

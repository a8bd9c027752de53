//! Handlers for the `/animals` resource: registry CRUD plus the entry,
//! exit, and re-entry lifecycle operations.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use validator::Validate;

use rifugio_core::error::CoreError;
use rifugio_core::types::DbId;
use rifugio_db::models::animal::{
    Adoption, Animal, AnimalEntry, AnimalPage, AnimalSearchQuery, CompleteEntry, CreateAnimal,
    ExitAnimal, NewEntry, UpdateAnimal,
};
use rifugio_db::models::animal_log::AnimalLog;
use rifugio_db::models::document::{AnimalDocument, AttachDocument};
use rifugio_db::repositories::AnimalRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::operator;
use crate::state::AppState;

/// POST /api/v1/animals
///
/// Registers a new animal: generates its code and opens the initial entry.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateAnimal>,
) -> AppResult<(StatusCode, Json<Animal>)> {
    input.validate()?;
    let animal = AnimalRepo::create(&state.pool, &input, operator(&headers).as_deref()).await?;
    Ok((StatusCode::CREATED, Json(animal)))
}

/// GET /api/v1/animals
///
/// Filtered, paginated listing of currently present animals.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<AnimalSearchQuery>,
) -> AppResult<Json<AnimalPage>> {
    let page = AnimalRepo::search(&state.pool, &params).await?;
    Ok(Json(page))
}

/// GET /api/v1/animals/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Animal>> {
    let animal = AnimalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Animal",
            id,
        }))?;
    Ok(Json(animal))
}

/// PATCH /api/v1/animals/{id}
///
/// Partial update of mutable fields. The chip code is write-once.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(input): Json<UpdateAnimal>,
) -> AppResult<Json<Animal>> {
    input.validate()?;
    let animal =
        AnimalRepo::update(&state.pool, id, &input, operator(&headers).as_deref()).await?;
    Ok(Json(animal))
}

/// POST /api/v1/animals/{id}/complete-entry
///
/// Records the entry date on the current entry.
pub async fn complete_entry(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(input): Json<CompleteEntry>,
) -> AppResult<Json<AnimalEntry>> {
    let entry =
        AnimalRepo::complete_entry(&state.pool, id, &input, operator(&headers).as_deref()).await?;
    Ok(Json(entry))
}

/// POST /api/v1/animals/{id}/entries
///
/// Opens a new entry for an animal that previously exited (re-entry).
pub async fn add_entry(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(input): Json<NewEntry>,
) -> AppResult<(StatusCode, Json<AnimalEntry>)> {
    let entry =
        AnimalRepo::add_entry(&state.pool, id, &input, operator(&headers).as_deref()).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST /api/v1/animals/{id}/exit
///
/// Records an exit on the current entry. Adoption exits also create the
/// adoption row.
pub async fn exit(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(input): Json<ExitAnimal>,
) -> AppResult<Json<AnimalEntry>> {
    let entry = AnimalRepo::exit(&state.pool, id, &input, operator(&headers).as_deref()).await?;
    Ok(Json(entry))
}

/// GET /api/v1/animals/{id}/entries
///
/// Full stay history, oldest first.
pub async fn list_entries(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<AnimalEntry>>> {
    ensure_exists(&state, id).await?;
    let entries = AnimalRepo::find_entries(&state.pool, id).await?;
    Ok(Json(entries))
}

/// GET /api/v1/animals/{id}/adoptions
pub async fn list_adoptions(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Adoption>>> {
    ensure_exists(&state, id).await?;
    let adoptions = AnimalRepo::find_adoptions(&state.pool, id).await?;
    Ok(Json(adoptions))
}

/// GET /api/v1/animals/{id}/logs
///
/// The append-only event log, oldest first.
pub async fn list_logs(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<AnimalLog>>> {
    ensure_exists(&state, id).await?;
    let logs = AnimalRepo::find_logs(&state.pool, id).await?;
    Ok(Json(logs))
}

/// POST /api/v1/animals/{id}/documents
///
/// Associates an already-stored document with the animal under a typed
/// kind.
pub async fn attach_document(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AttachDocument>,
) -> AppResult<(StatusCode, Json<AnimalDocument>)> {
    let kind = state
        .document_kinds
        .by_code(&input.kind_code)
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "unknown document kind: {}",
                input.kind_code
            )))
        })?;
    let row =
        AnimalRepo::attach_document(&state.pool, id, input.document_id, kind.id, &input.title)
            .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/animals/{id}/documents
pub async fn list_documents(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<AnimalDocument>>> {
    ensure_exists(&state, id).await?;
    let documents = AnimalRepo::list_documents(&state.pool, id).await?;
    Ok(Json(documents))
}

/// 404 for sub-resource listings of a missing animal, instead of an
/// empty list.
async fn ensure_exists(state: &AppState, id: DbId) -> AppResult<()> {
    AnimalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Animal",
            id,
        }))?;
    Ok(())
}

//! Handlers for the `/vets` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use rifugio_core::error::CoreError;
use rifugio_core::types::DbId;
use rifugio_db::models::vet::{CreateVet, UpdateVet, Vet};
use rifugio_db::repositories::VetRepo;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::state::AppState;

/// POST /api/v1/vets
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateVet>,
) -> AppResult<(StatusCode, Json<Vet>)> {
    input.validate()?;
    let vet = VetRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(vet)))
}

/// GET /api/v1/vets
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Vet>>> {
    let vets = VetRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(vets))
}

/// GET /api/v1/vets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vet>> {
    let vet = VetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Vet", id }))?;
    Ok(Json(vet))
}

/// PUT /api/v1/vets/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVet>,
) -> AppResult<Json<Vet>> {
    input.validate()?;
    let vet = VetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Vet", id }))?;
    Ok(Json(vet))
}

/// DELETE /api/v1/vets/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = VetRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Vet", id }))
    }
}

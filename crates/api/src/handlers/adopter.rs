//! Handlers for the `/adopters` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use rifugio_core::error::CoreError;
use rifugio_core::types::DbId;
use rifugio_db::models::adopter::{Adopter, CreateAdopter, UpdateAdopter};
use rifugio_db::repositories::AdopterRepo;

use crate::error::{AppError, AppResult};
use crate::query::NameFilterParams;
use crate::state::AppState;

/// POST /api/v1/adopters
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAdopter>,
) -> AppResult<(StatusCode, Json<Adopter>)> {
    input.validate()?;
    let adopter = AdopterRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(adopter)))
}

/// GET /api/v1/adopters
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<NameFilterParams>,
) -> AppResult<Json<Vec<Adopter>>> {
    let adopters = AdopterRepo::list(
        &state.pool,
        params.name.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(adopters))
}

/// GET /api/v1/adopters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Adopter>> {
    let adopter = AdopterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Adopter",
            id,
        }))?;
    Ok(Json(adopter))
}

/// PUT /api/v1/adopters/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAdopter>,
) -> AppResult<Json<Adopter>> {
    input.validate()?;
    let adopter = AdopterRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Adopter",
            id,
        }))?;
    Ok(Json(adopter))
}

/// DELETE /api/v1/adopters/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = AdopterRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Adopter",
            id,
        }))
    }
}

//! Handlers for the `/species` reference data and nested breeds.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use rifugio_core::error::CoreError;
use rifugio_core::types::DbId;
use rifugio_db::models::species::{Breed, CreateBreed, Species};
use rifugio_db::repositories::SpeciesRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for adding a breed; the species comes from the path.
#[derive(Debug, Deserialize)]
pub struct CreateBreedBody {
    pub name: String,
}

/// GET /api/v1/species
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Species>>> {
    let species = SpeciesRepo::list(&state.pool).await?;
    Ok(Json(species))
}

/// GET /api/v1/species/{id}/breeds
pub async fn list_breeds(
    State(state): State<AppState>,
    Path(species_id): Path<DbId>,
) -> AppResult<Json<Vec<Breed>>> {
    ensure_exists(&state, species_id).await?;
    let breeds = SpeciesRepo::list_breeds(&state.pool, species_id).await?;
    Ok(Json(breeds))
}

/// POST /api/v1/species/{id}/breeds
pub async fn create_breed(
    State(state): State<AppState>,
    Path(species_id): Path<DbId>,
    Json(body): Json<CreateBreedBody>,
) -> AppResult<(StatusCode, Json<Breed>)> {
    ensure_exists(&state, species_id).await?;
    let input = CreateBreed {
        species_id,
        name: body.name,
    };
    input.validate()?;
    let breed = SpeciesRepo::create_breed(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(breed)))
}

async fn ensure_exists(state: &AppState, id: DbId) -> AppResult<()> {
    SpeciesRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Species",
            id,
        }))?;
    Ok(())
}

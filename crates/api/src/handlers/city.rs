//! Handlers for the `/cities` reference data.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use rifugio_core::error::CoreError;
use rifugio_core::types::DbId;
use rifugio_db::models::city::City;
use rifugio_db::repositories::CityRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CityListParams {
    pub name: Option<String>,
}

/// GET /api/v1/cities
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CityListParams>,
) -> AppResult<Json<Vec<City>>> {
    let cities = CityRepo::list(&state.pool, params.name.as_deref()).await?;
    Ok(Json(cities))
}

/// GET /api/v1/cities/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<City>> {
    let city = CityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "City", id }))?;
    Ok(Json(city))
}

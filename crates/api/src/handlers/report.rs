//! Handlers for the `/reports` resource.

use axum::extract::{Query, State};
use axum::Json;

use rifugio_core::error::CoreError;
use rifugio_db::models::report::{
    AnimalDaysQuery, AnimalDaysReport, AnimalEntriesQuery, AnimalEntryRow,
};
use rifugio_db::repositories::AnimalRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reports/animal-days?from=&to=&city_id=
///
/// Custody days per animal, summed over entries from one city within the
/// date range, plus the grand total.
pub async fn animal_days(
    State(state): State<AppState>,
    Query(params): Query<AnimalDaysQuery>,
) -> AppResult<Json<DataResponse<AnimalDaysReport>>> {
    validate_range(params.from, params.to)?;
    let report = AnimalRepo::count_animal_days(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/reports/animal-entries?from=&to=&entry_type=
///
/// Animals whose entry date falls within the range, optionally filtered
/// by entry type.
pub async fn animal_entries(
    State(state): State<AppState>,
    Query(params): Query<AnimalEntriesQuery>,
) -> AppResult<Json<DataResponse<Vec<AnimalEntryRow>>>> {
    validate_range(params.from, params.to)?;
    let rows = AnimalRepo::count_animal_entries(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: rows }))
}

fn validate_range(from: rifugio_core::types::Date, to: rifugio_core::types::Date) -> AppResult<()> {
    if from > to {
        return Err(AppError::Core(CoreError::Validation(format!(
            "invalid report range: {from} is after {to}"
        ))));
    }
    Ok(())
}

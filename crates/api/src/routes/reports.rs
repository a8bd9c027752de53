//! Route definitions for the `/reports` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET /animal-days       -> animal_days (?from=&to=&city_id=)
/// GET /animal-entries    -> animal_entries (?from=&to=&entry_type=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/animal-days", get(report::animal_days))
        .route("/animal-entries", get(report::animal_entries))
}

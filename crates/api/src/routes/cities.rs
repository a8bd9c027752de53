//! Route definitions for the `/cities` reference data.

use axum::routing::get;
use axum::Router;

use crate::handlers::city;
use crate::state::AppState;

/// Routes mounted at `/cities`.
///
/// ```text
/// GET /        -> list (optional ?name= filter)
/// GET /{id}    -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(city::list))
        .route("/{id}", get(city::get_by_id))
}

//! Route definitions for the `/species` reference data.

use axum::routing::get;
use axum::Router;

use crate::handlers::species;
use crate::state::AppState;

/// Routes mounted at `/species`.
///
/// ```text
/// GET  /               -> list
/// GET  /{id}/breeds    -> list_breeds
/// POST /{id}/breeds    -> create_breed
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(species::list))
        .route(
            "/{id}/breeds",
            get(species::list_breeds).post(species::create_breed),
        )
}

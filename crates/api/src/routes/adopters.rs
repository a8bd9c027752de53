//! Route definitions for the `/adopters` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::adopter;
use crate::state::AppState;

/// Routes mounted at `/adopters`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(adopter::list).post(adopter::create))
        .route(
            "/{id}",
            get(adopter::get_by_id)
                .put(adopter::update)
                .delete(adopter::delete),
        )
}

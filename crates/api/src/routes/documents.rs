//! Route definitions for the `/documents` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::document;
use crate::state::AppState;

/// Routes mounted at `/documents`.
///
/// ```text
/// POST   /                -> upload (multipart)
/// GET    /kinds           -> list_kinds
/// GET    /{id}            -> get_by_id (metadata)
/// DELETE /{id}            -> delete
/// GET    /{id}/content    -> download
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(document::upload))
        .route("/kinds", get(document::list_kinds))
        .route(
            "/{id}",
            get(document::get_by_id).delete(document::delete),
        )
        .route("/{id}/content", get(document::download))
}

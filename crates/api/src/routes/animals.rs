//! Route definitions for the `/animals` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::animal;
use crate::state::AppState;

/// Routes mounted at `/animals`.
///
/// ```text
/// GET    /                       -> search
/// POST   /                       -> create
/// GET    /{id}                   -> get_by_id
/// PATCH  /{id}                   -> update
/// POST   /{id}/complete-entry    -> complete_entry
/// GET    /{id}/entries           -> list_entries
/// POST   /{id}/entries           -> add_entry (re-entry)
/// POST   /{id}/exit              -> exit
/// GET    /{id}/adoptions         -> list_adoptions
/// GET    /{id}/logs              -> list_logs
/// GET    /{id}/documents         -> list_documents
/// POST   /{id}/documents         -> attach_document
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(animal::search).post(animal::create))
        .route("/{id}", get(animal::get_by_id).patch(animal::update))
        .route("/{id}/complete-entry", post(animal::complete_entry))
        .route(
            "/{id}/entries",
            get(animal::list_entries).post(animal::add_entry),
        )
        .route("/{id}/exit", post(animal::exit))
        .route("/{id}/adoptions", get(animal::list_adoptions))
        .route("/{id}/logs", get(animal::list_logs))
        .route(
            "/{id}/documents",
            get(animal::list_documents).post(animal::attach_document),
        )
}

pub mod adopters;
pub mod animals;
pub mod cities;
pub mod documents;
pub mod health;
pub mod reports;
pub mod species;
pub mod vets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /animals                               search, create
/// /animals/{id}                          get, patch
/// /animals/{id}/complete-entry           record entry date (POST)
/// /animals/{id}/entries                  stay history (GET), re-entry (POST)
/// /animals/{id}/exit                     record exit (POST)
/// /animals/{id}/adoptions                adoption history (GET)
/// /animals/{id}/logs                     event log (GET)
/// /animals/{id}/documents                list (GET), attach (POST)
///
/// /adopters                              list, create
/// /adopters/{id}                         get, update, delete
///
/// /vets                                  list, create
/// /vets/{id}                             get, update, delete
///
/// /cities                                list
/// /cities/{id}                           get
///
/// /species                               list
/// /species/{id}/breeds                   list, create
///
/// /documents                             upload (POST)
/// /documents/kinds                       list kinds
/// /documents/{id}                        get metadata, delete
/// /documents/{id}/content                download bytes
///
/// /reports/animal-days                   custody-days report
/// /reports/animal-entries                entries report
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/animals", animals::router())
        .nest("/adopters", adopters::router())
        .nest("/vets", vets::router())
        .nest("/cities", cities::router())
        .nest("/species", species::router())
        .nest("/documents", documents::router())
        .nest("/reports", reports::router())
}

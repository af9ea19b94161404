pub mod depositions;
pub mod health;
pub mod records;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /deposit/depositions                          list, create
/// /deposit/depositions/{id}                     get, update metadata, delete
/// /deposit/depositions/{id}/files               upload file (multipart)
/// /deposit/depositions/{id}/actions/publish     publish (POST)
///
/// /records/{concept_id}/versions                published versions of a concept
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/deposit/depositions", depositions::router())
        .nest("/records", records::router())
}

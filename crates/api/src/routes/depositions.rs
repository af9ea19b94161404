//! Route definitions for the `/deposit/depositions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::depositions;
use crate::state::AppState;

/// Routes mounted at `/deposit/depositions`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update_metadata
/// DELETE /{id}                      -> delete
/// POST   /{id}/files                -> upload_file
/// POST   /{id}/actions/publish      -> publish
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(depositions::list).post(depositions::create))
        .route(
            "/{id}",
            get(depositions::get_by_id)
                .put(depositions::update_metadata)
                .delete(depositions::delete),
        )
        .route("/{id}/files", post(depositions::upload_file))
        .route("/{id}/actions/publish", post(depositions::publish))
}

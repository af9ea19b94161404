//! Route definitions for the `/records` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::records;
use crate::state::AppState;

/// Routes mounted at `/records`.
///
/// ```text
/// GET /{concept_id}/versions    -> list_versions
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{concept_id}/versions", get(records::list_versions))
}

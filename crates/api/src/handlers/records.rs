//! Handlers for the `/records` resource.

use axum::extract::State;
use axum::Json;
use fakenodo_core::deposition::VersionHit;
use fakenodo_core::types::ConceptId;

use crate::middleware::id_path::IdPath;
use crate::response::SearchResponse;
use crate::state::AppState;

/// GET /api/records/{concept_id}/versions
///
/// List the published versions of a concept. Unknown or unpublished
/// concepts yield an empty hit list rather than 404.
pub async fn list_versions(
    State(state): State<AppState>,
    IdPath(concept_id): IdPath<ConceptId>,
) -> Json<SearchResponse<VersionHit>> {
    let hits = state.registry.list_versions(concept_id).await;
    Json(SearchResponse::new(hits))
}

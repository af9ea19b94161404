//! Integer path-id extractor with archive-style rejection.
//!
//! Ids in URLs such as `/deposit/depositions/{id}` only match integers. A
//! segment that does not parse (e.g. `abc`) names no resource, so it is
//! reported as a JSON 404 instead of axum's plain-text 400.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Path parameter extractor for numeric ids.
///
/// ```ignore
/// async fn get_by_id(IdPath(id): IdPath<DepositionId>) -> AppResult<Json<Deposition>> { .. }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T>(pub T);

impl<S, T> FromRequestParts<S> for IdPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(IdPath(value)),
            Err(rejection) => {
                tracing::debug!(
                    path = %parts.uri.path(),
                    %rejection,
                    "Path id did not parse, reporting not found"
                );
                Err(AppError::NotFound("Not found".into()))
            }
        }
    }
}

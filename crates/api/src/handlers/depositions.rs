//! Handlers for the `/deposit/depositions` resource.
//!
//! Request bodies for create and update are read leniently: a missing or
//! malformed JSON body is treated as "no metadata supplied", not rejected.

use std::path::PathBuf;

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use fakenodo_core::deposition::Deposition;
use fakenodo_core::error::CoreError;
use fakenodo_core::registry::StoredFile;
use fakenodo_core::types::{DepositionId, Metadata};
use fakenodo_core::upload::{UploadSource, NO_FILE_MESSAGE};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::id_path::IdPath;
use crate::state::AppState;

/// JSON body accepted by create and update.
#[derive(Debug, Default, Deserialize)]
pub struct DepositionPayload {
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl DepositionPayload {
    /// Parse a body, falling back to an empty payload when it is not a JSON object.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// The metadata mapping, if one was supplied as a JSON object.
    pub fn metadata_object(self) -> Option<Metadata> {
        match self.metadata {
            Some(serde_json::Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

/// GET /api/deposit/depositions
pub async fn list(State(state): State<AppState>) -> Json<Vec<Deposition>> {
    Json(state.registry.list().await)
}

/// POST /api/deposit/depositions
///
/// Create a draft deposition. Metadata defaults to `{}`.
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<Deposition>) {
    let metadata = DepositionPayload::from_body(&body)
        .metadata_object()
        .unwrap_or_default();
    let deposition = state.registry.create(metadata).await;
    (StatusCode::CREATED, Json(deposition))
}

/// GET /api/deposit/depositions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath<DepositionId>,
) -> AppResult<Json<Deposition>> {
    let deposition = state.registry.get(id).await?;
    Ok(Json(deposition))
}

/// PUT /api/deposit/depositions/{id}
///
/// Replace the metadata wholesale. Never touches files or versions, so it
/// cannot cause a new DOI. A body without an object `metadata` field leaves
/// the deposition unchanged.
pub async fn update_metadata(
    State(state): State<AppState>,
    IdPath(id): IdPath<DepositionId>,
    body: Bytes,
) -> AppResult<Json<Deposition>> {
    let deposition = match DepositionPayload::from_body(&body).metadata_object() {
        Some(metadata) => state.registry.update_metadata(id, metadata).await?,
        None => state.registry.get(id).await?,
    };
    Ok(Json(deposition))
}

/// DELETE /api/deposit/depositions/{id}
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath<DepositionId>,
) -> AppResult<StatusCode> {
    state.registry.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/deposit/depositions/{id}/actions/publish
///
/// Publish the draft. A new version and DOI are minted only when the file
/// set changed since the last published version.
pub async fn publish(
    State(state): State<AppState>,
    IdPath(id): IdPath<DepositionId>,
) -> AppResult<(StatusCode, Json<Deposition>)> {
    let deposition = state.registry.publish(id).await?;
    Ok((StatusCode::ACCEPTED, Json(deposition)))
}

// ---------------------------------------------------------------------------
// File upload
// ---------------------------------------------------------------------------

/// Fields collected from an upload form.
#[derive(Debug, Default)]
struct UploadForm {
    name: Option<String>,
    /// A `file` part carrying content: (client file name, bytes).
    file: Option<(Option<String>, Vec<u8>)>,
    /// A `file` field sent as plain text, interpreted as a path.
    file_text: Option<String>,
    filepath: Option<String>,
    src: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let field_name = field.name().unwrap_or("").to_string();
            let client_filename = field.file_name().map(str::to_string);

            if let ("file", Some(filename)) = (field_name.as_str(), client_filename) {
                // An empty filename is what browsers send for an unselected input.
                if filename.is_empty() {
                    continue;
                }
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.file = Some((Some(filename), data.to_vec()));
                continue;
            }

            let slot = match field_name.as_str() {
                "name" => &mut form.name,
                "file" => &mut form.file_text,
                "filepath" => &mut form.filepath,
                "src" => &mut form.src,
                _ => continue,
            };
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            *slot = Some(text);
        }

        Ok(form)
    }

    /// Pick the upload source: a content part wins, then `filepath`, `src`,
    /// and a textual `file` field, in that order.
    fn into_source(
        self,
        allow_local_paths: bool,
    ) -> Result<(Option<String>, UploadSource), CoreError> {
        let UploadForm {
            name,
            file,
            file_text,
            filepath,
            src,
        } = self;

        if let Some((filename, content)) = file {
            return Ok((name, UploadSource::Bytes { filename, content }));
        }

        let path = [filepath, src, file_text]
            .into_iter()
            .flatten()
            .find(|p| !p.is_empty())
            .ok_or_else(|| CoreError::InvalidInput {
                message: NO_FILE_MESSAGE.to_string(),
                detail: None,
            })?;

        if !allow_local_paths {
            return Err(CoreError::InvalidInput {
                message: NO_FILE_MESSAGE.to_string(),
                detail: Some("local path uploads are disabled".to_string()),
            });
        }

        Ok((name, UploadSource::LocalPath(PathBuf::from(path))))
    }
}

/// POST /api/deposit/depositions/{id}/files
///
/// Accepts a multipart form with an optional `name` field and either a
/// `file` part or a local path (`filepath`, `src`, or `file` as text). The
/// content is checksummed and stored in the draft under the resolved name.
pub async fn upload_file(
    State(state): State<AppState>,
    IdPath(id): IdPath<DepositionId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<StoredFile>)> {
    if !state.registry.contains(id).await {
        return Err(CoreError::deposition_not_found(id).into());
    }

    let form = match multipart {
        Ok(multipart) => UploadForm::read(multipart).await?,
        Err(rejection) => {
            tracing::debug!(deposition_id = id, %rejection, "Upload without multipart body");
            UploadForm::default()
        }
    };

    let (name, source) = form.into_source(state.config.allow_local_path_uploads)?;
    let stored = state
        .registry
        .upload_file(id, name.as_deref(), source)
        .await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

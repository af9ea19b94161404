//! Upload inputs and their resolution to `(filename, bytes)`.

use std::path::PathBuf;

use crate::error::CoreError;

/// Filename used when neither the request nor the source provides one.
pub const FALLBACK_FILENAME: &str = "uploaded";

/// Message reported when an upload carries no usable content.
pub const NO_FILE_MESSAGE: &str = "No file provided";

/// Where the content of an uploaded file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    /// Content sent in the request, with the client-side file name if any.
    Bytes {
        filename: Option<String>,
        content: Vec<u8>,
    },
    /// A file on the server's local filesystem, read at upload time.
    LocalPath(PathBuf),
}

/// A source resolved to the name it is stored under and its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUpload {
    pub filename: String,
    pub content: Vec<u8>,
}

impl UploadSource {
    /// Read the content and pick the stored filename.
    ///
    /// `name` wins when present and non-empty; otherwise the source's own
    /// name (client file name or path basename) is used, then
    /// [`FALLBACK_FILENAME`].
    pub async fn resolve(self, name: Option<&str>) -> Result<ResolvedUpload, CoreError> {
        let explicit = name.filter(|n| !n.is_empty()).map(str::to_string);

        let (own_name, content) = match self {
            UploadSource::Bytes { filename, content } => (filename, content),
            UploadSource::LocalPath(path) => {
                let content =
                    tokio::fs::read(&path)
                        .await
                        .map_err(|e| CoreError::InvalidInput {
                            message: NO_FILE_MESSAGE.to_string(),
                            detail: Some(format!("{}: {e}", path.display())),
                        })?;
                let basename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned());
                (basename, content)
            }
        };

        let filename = explicit
            .or(own_name.filter(|n| !n.is_empty()))
            .unwrap_or_else(|| FALLBACK_FILENAME.to_string());

        Ok(ResolvedUpload { filename, content })
    }
}

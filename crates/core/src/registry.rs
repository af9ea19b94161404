//! In-memory deposition store.
//!
//! One [`DepositionRegistry`] is created at startup and shared through the
//! application state. Every mutating operation holds the write lock for its
//! whole duration, so id allocation and insertion are atomic and a publish
//! never observes a half-applied upload.

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::deposition::{Deposition, PublishOutcome, VersionHit, DEFAULT_DOI_PREFIX};
use crate::error::CoreError;
use crate::hashing::checksum_hex;
use crate::types::{ConceptId, DepositionId, Metadata};
use crate::upload::UploadSource;

/// Result of storing a file in a deposition's draft.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StoredFile {
    pub filename: String,
    pub checksum: String,
    pub deposition_id: DepositionId,
}

struct RegistryInner {
    next_id: DepositionId,
    depositions: IndexMap<DepositionId, Deposition>,
}

impl RegistryInner {
    fn empty() -> Self {
        Self {
            next_id: 1,
            depositions: IndexMap::new(),
        }
    }

    fn get_mut(&mut self, id: DepositionId) -> Result<&mut Deposition, CoreError> {
        self.depositions
            .get_mut(&id)
            .ok_or_else(|| CoreError::deposition_not_found(id))
    }
}

/// Process-wide store of depositions, keyed by id in insertion order.
pub struct DepositionRegistry {
    doi_prefix: String,
    inner: RwLock<RegistryInner>,
}

impl Default for DepositionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DepositionRegistry {
    /// Create an empty registry using [`DEFAULT_DOI_PREFIX`].
    pub fn new() -> Self {
        Self::with_doi_prefix(DEFAULT_DOI_PREFIX)
    }

    /// Create an empty registry minting DOIs under `prefix`.
    pub fn with_doi_prefix(prefix: impl Into<String>) -> Self {
        Self {
            doi_prefix: prefix.into(),
            inner: RwLock::new(RegistryInner::empty()),
        }
    }

    /// Create a new draft deposition with the given metadata.
    pub async fn create(&self, metadata: Metadata) -> Deposition {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let deposition = Deposition::new(id, metadata);
        inner.depositions.insert(id, deposition.clone());

        tracing::info!(deposition_id = id, "Deposition created");
        deposition
    }

    pub async fn get(&self, id: DepositionId) -> Result<Deposition, CoreError> {
        self.inner
            .read()
            .await
            .depositions
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::deposition_not_found(id))
    }

    /// Whether a deposition with this id exists. Does not clone it.
    pub async fn contains(&self, id: DepositionId) -> bool {
        self.inner.read().await.depositions.contains_key(&id)
    }

    /// All depositions, oldest first.
    pub async fn list(&self) -> Vec<Deposition> {
        self.inner
            .read()
            .await
            .depositions
            .values()
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.depositions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Replace the metadata wholesale. Files and version history are untouched.
    pub async fn update_metadata(
        &self,
        id: DepositionId,
        metadata: Metadata,
    ) -> Result<Deposition, CoreError> {
        let mut inner = self.inner.write().await;
        let deposition = inner.get_mut(id)?;
        deposition.metadata = metadata;

        tracing::debug!(deposition_id = id, "Deposition metadata replaced");
        Ok(deposition.clone())
    }

    /// Remove a deposition together with its version history.
    pub async fn delete(&self, id: DepositionId) -> Result<(), CoreError> {
        let removed = self.inner.write().await.depositions.shift_remove(&id);
        match removed {
            Some(_) => {
                tracing::info!(deposition_id = id, "Deposition deleted");
                Ok(())
            }
            None => Err(CoreError::deposition_not_found(id)),
        }
    }

    /// Checksum the content of `source` and store it under the resolved
    /// filename, overwriting any previous checksum for that name.
    ///
    /// The deposition is checked before the source is read, so an unknown id
    /// is reported as not found even when the source is also unusable.
    pub async fn upload_file(
        &self,
        id: DepositionId,
        name: Option<&str>,
        source: UploadSource,
    ) -> Result<StoredFile, CoreError> {
        if !self.contains(id).await {
            return Err(CoreError::deposition_not_found(id));
        }

        let resolved = source.resolve(name).await?;
        let checksum = checksum_hex(&resolved.content);

        let mut inner = self.inner.write().await;
        let deposition = inner.get_mut(id)?;
        deposition.put_file(resolved.filename.clone(), checksum.clone());

        tracing::info!(
            deposition_id = id,
            filename = %resolved.filename,
            size_bytes = resolved.content.len(),
            %checksum,
            "File stored in deposition draft"
        );

        Ok(StoredFile {
            filename: resolved.filename,
            checksum,
            deposition_id: id,
        })
    }

    /// Publish the deposition, minting a new version only if its files changed.
    pub async fn publish(&self, id: DepositionId) -> Result<Deposition, CoreError> {
        let mut inner = self.inner.write().await;
        let deposition = inner.get_mut(id)?;

        match deposition.publish(&self.doi_prefix) {
            PublishOutcome::Minted { version, doi } => {
                tracing::info!(deposition_id = id, version, %doi, "New version minted");
            }
            PublishOutcome::Unchanged { version, doi } => {
                tracing::info!(
                    deposition_id = id,
                    version,
                    %doi,
                    "Files unchanged since last version, DOI reused"
                );
            }
        }

        Ok(deposition.clone())
    }

    /// Published versions of the lineage `concept_id`. Empty when the concept
    /// is unknown or has never been published.
    pub async fn list_versions(&self, concept_id: ConceptId) -> Vec<VersionHit> {
        self.inner
            .read()
            .await
            .depositions
            .values()
            .find(|d| d.concept_id == concept_id)
            .map(Deposition::version_hits)
            .unwrap_or_default()
    }

    /// Drop every deposition and restart ids at 1.
    pub async fn reset(&self) {
        *self.inner.write().await = RegistryInner::empty();
        tracing::debug!("Deposition registry reset");
    }
}

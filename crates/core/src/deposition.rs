//! Deposition aggregate: draft file set, published version history, DOIs.
//!
//! A deposition starts as a draft with no files. Each publish compares the
//! live file set against the snapshot of the last published version and only
//! mints a new version (and DOI) when they differ. Metadata is not versioned.

use serde::{Deserialize, Serialize};

use crate::types::{ConceptId, DepositionId, FileSet, Metadata};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// DOI namespace used when none is configured.
pub const DEFAULT_DOI_PREFIX: &str = "10.9999/fakenodo";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Lifecycle state. Never returns to `Draft` once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositionState {
    Draft,
    Published,
}

/// One entry of the append-only version history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedVersion {
    pub version: u32,
    pub doi: String,
    /// Copy of the draft file set taken when this version was minted.
    pub files_snapshot: FileSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposition {
    pub id: DepositionId,
    #[serde(rename = "conceptrecid")]
    pub concept_id: ConceptId,
    pub metadata: Metadata,
    /// Live draft files.
    pub files: FileSet,
    pub published_versions: Vec<PublishedVersion>,
    pub state: DepositionState,
    #[serde(rename = "doi")]
    pub current_doi: Option<String>,
}

/// What a publish call did to the version history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The file set changed (or this was the first publish); a version was appended.
    Minted { version: u32, doi: String },
    /// The file set matches the last snapshot; the previous DOI was reused.
    Unchanged { version: u32, doi: String },
}

impl PublishOutcome {
    pub fn doi(&self) -> &str {
        match self {
            PublishOutcome::Minted { doi, .. } | PublishOutcome::Unchanged { doi, .. } => doi,
        }
    }

    pub fn version(&self) -> u32 {
        match self {
            PublishOutcome::Minted { version, .. } | PublishOutcome::Unchanged { version, .. } => {
                *version
            }
        }
    }
}

/// A published version as listed under its concept, with the deposition's
/// current metadata attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionHit {
    pub version: u32,
    pub doi: String,
    pub metadata: Metadata,
}

// ---------------------------------------------------------------------------
// DOI derivation
// ---------------------------------------------------------------------------

/// Build the DOI for a given concept and version: `{prefix}.{concept_id}.v{version}`.
pub fn derive_doi(prefix: &str, concept_id: ConceptId, version: u32) -> String {
    format!("{prefix}.{concept_id}.v{version}")
}

// ---------------------------------------------------------------------------
// Behaviour
// ---------------------------------------------------------------------------

impl Deposition {
    /// A fresh draft. The concept id is tied to the deposition id.
    pub fn new(id: DepositionId, metadata: Metadata) -> Self {
        Self {
            id,
            concept_id: id,
            metadata,
            files: FileSet::new(),
            published_versions: Vec::new(),
            state: DepositionState::Draft,
            current_doi: None,
        }
    }

    /// Record (or overwrite) the checksum for `filename` in the draft.
    pub fn put_file(&mut self, filename: String, checksum: String) {
        self.files.insert(filename, checksum);
    }

    pub fn latest_version(&self) -> Option<&PublishedVersion> {
        self.published_versions.last()
    }

    /// Publish the current draft.
    ///
    /// Mints version 1 on the first call. Afterwards a new version is only
    /// appended when the live file set differs from the last snapshot in any
    /// name or checksum; otherwise the last DOI is kept.
    pub fn publish(&mut self, doi_prefix: &str) -> PublishOutcome {
        let snapshot = self.files.clone();

        let next_version = match self.latest_version() {
            Some(last) if last.files_snapshot == snapshot => {
                let (version, doi) = (last.version, last.doi.clone());
                self.current_doi = Some(doi.clone());
                self.state = DepositionState::Published;
                return PublishOutcome::Unchanged { version, doi };
            }
            Some(last) => last.version + 1,
            None => 1,
        };

        let doi = derive_doi(doi_prefix, self.concept_id, next_version);
        self.published_versions.push(PublishedVersion {
            version: next_version,
            doi: doi.clone(),
            files_snapshot: snapshot,
        });
        self.current_doi = Some(doi.clone());
        self.state = DepositionState::Published;

        PublishOutcome::Minted {
            version: next_version,
            doi,
        }
    }

    /// Published versions projected with the current (unversioned) metadata.
    pub fn version_hits(&self) -> Vec<VersionHit> {
        self.published_versions
            .iter()
            .map(|v| VersionHit {
                version: v.version,
                doi: v.doi.clone(),
                metadata: self.metadata.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn metadata(title: &str) -> Metadata {
        let mut m = Metadata::new();
        m.insert("title".into(), json!(title));
        m
    }

    // -- derive_doi ----------------------------------------------------------

    #[test]
    fn doi_format() {
        assert_eq!(derive_doi("10.9999/fakenodo", 7, 3), "10.9999/fakenodo.7.v3");
    }

    #[test]
    fn doi_distinguishes_concept_and_version() {
        assert_ne!(derive_doi("p", 1, 12), derive_doi("p", 11, 2));
        assert_eq!(derive_doi("p", 4, 2), derive_doi("p", 4, 2));
    }

    // -- new -----------------------------------------------------------------

    #[test]
    fn new_is_empty_draft() {
        let dep = Deposition::new(5, metadata("X"));
        assert_eq!(dep.concept_id, 5);
        assert_eq!(dep.state, DepositionState::Draft);
        assert!(dep.files.is_empty());
        assert!(dep.published_versions.is_empty());
        assert!(dep.current_doi.is_none());
    }

    // -- publish -------------------------------------------------------------

    #[test]
    fn first_publish_without_files_mints_v1() {
        let mut dep = Deposition::new(1, Metadata::new());
        let outcome = dep.publish(DEFAULT_DOI_PREFIX);

        assert_matches!(outcome, PublishOutcome::Minted { version: 1, .. });
        assert_eq!(dep.state, DepositionState::Published);
        assert_eq!(dep.current_doi.as_deref(), Some("10.9999/fakenodo.1.v1"));
        assert!(dep.published_versions[0].files_snapshot.is_empty());
    }

    #[test]
    fn republish_without_changes_reuses_doi() {
        let mut dep = Deposition::new(1, Metadata::new());
        dep.put_file("a.txt".into(), "c1".into());
        let first = dep.publish(DEFAULT_DOI_PREFIX);
        let second = dep.publish(DEFAULT_DOI_PREFIX);

        assert_matches!(second, PublishOutcome::Unchanged { version: 1, .. });
        assert_eq!(first.doi(), second.doi());
        assert_eq!(dep.published_versions.len(), 1);
    }

    #[test]
    fn changed_checksum_mints_next_version() {
        let mut dep = Deposition::new(2, Metadata::new());
        dep.put_file("a.txt".into(), "c1".into());
        dep.publish(DEFAULT_DOI_PREFIX);
        dep.put_file("a.txt".into(), "c2".into());
        let outcome = dep.publish(DEFAULT_DOI_PREFIX);

        assert_eq!(outcome.version(), 2);
        assert_eq!(dep.current_doi.as_deref(), Some("10.9999/fakenodo.2.v2"));
    }

    #[test]
    fn added_file_counts_as_change() {
        let mut dep = Deposition::new(1, Metadata::new());
        dep.publish(DEFAULT_DOI_PREFIX);
        dep.put_file("new.csv".into(), "c".into());
        assert_matches!(
            dep.publish(DEFAULT_DOI_PREFIX),
            PublishOutcome::Minted { version: 2, .. }
        );
    }

    #[test]
    fn same_checksum_overwrite_is_not_a_change() {
        let mut dep = Deposition::new(1, Metadata::new());
        dep.put_file("a.txt".into(), "c1".into());
        dep.publish(DEFAULT_DOI_PREFIX);
        dep.put_file("a.txt".into(), "c1".into());
        assert_matches!(
            dep.publish(DEFAULT_DOI_PREFIX),
            PublishOutcome::Unchanged { version: 1, .. }
        );
    }

    #[test]
    fn versions_stay_contiguous_across_noop_publishes() {
        let mut dep = Deposition::new(1, Metadata::new());
        for round in 0..4 {
            dep.put_file("data.bin".into(), format!("c{round}"));
            dep.publish(DEFAULT_DOI_PREFIX);
            dep.publish(DEFAULT_DOI_PREFIX);
        }
        let versions: Vec<u32> = dep.published_versions.iter().map(|v| v.version).collect();
        assert_eq!(versions, vec![1, 2, 3, 4]);
        assert_eq!(
            dep.current_doi.as_deref(),
            dep.latest_version().map(|v| v.doi.as_str())
        );
    }

    #[test]
    fn snapshot_is_independent_of_live_files() {
        let mut dep = Deposition::new(1, Metadata::new());
        dep.put_file("a.txt".into(), "c1".into());
        dep.publish(DEFAULT_DOI_PREFIX);
        dep.put_file("a.txt".into(), "c2".into());
        dep.put_file("b.txt".into(), "c3".into());

        let snap = &dep.published_versions[0].files_snapshot;
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.get("a.txt").map(String::as_str), Some("c1"));
    }

    // -- version_hits --------------------------------------------------------

    #[test]
    fn hits_carry_current_metadata() {
        let mut dep = Deposition::new(1, metadata("old"));
        dep.publish(DEFAULT_DOI_PREFIX);
        dep.put_file("a".into(), "c".into());
        dep.publish(DEFAULT_DOI_PREFIX);
        dep.metadata = metadata("new");

        let hits = dep.version_hits();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.metadata["title"] == "new"));
    }

    // -- serialization -------------------------------------------------------

    #[test]
    fn wire_shape_uses_archive_field_names() {
        let dep = Deposition::new(3, Metadata::new());
        let value = serde_json::to_value(&dep).unwrap();
        assert_eq!(value["conceptrecid"], 3);
        assert_eq!(value["state"], "draft");
        assert!(value["doi"].is_null());
        assert!(value["files"].as_object().unwrap().is_empty());
    }
}

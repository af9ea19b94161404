use std::collections::BTreeMap;

/// Deposition identifiers are allocated from a process-wide counter starting at 1.
pub type DepositionId = i64;

/// Identifier of a version lineage. Equal to the deposition id it was created with.
pub type ConceptId = i64;

/// Free-form descriptive metadata (title, creators, ...). Always a JSON object.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Filename to checksum mapping. Ordered so equality and serialization are
/// independent of upload order.
pub type FileSet = BTreeMap<String, String>;

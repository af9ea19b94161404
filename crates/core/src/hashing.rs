//! Content checksum used for file change detection.
//!
//! Both upload modes (raw bytes and local path) go through [`checksum_hex`],
//! so identical content always compares equal regardless of how it arrived.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest of the given bytes.
pub fn checksum_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

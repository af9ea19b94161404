//! Response envelopes for the archive-compatible search endpoints.
//!
//! Version listings mimic the archive's search response:
//! `{ "hits": { "hits": [...], "total": n } }`.

use serde::Serialize;

/// Outer `{ "hits": ... }` wrapper.
#[derive(Debug, Serialize)]
pub struct SearchResponse<T: Serialize> {
    pub hits: Hits<T>,
}

#[derive(Debug, Serialize)]
pub struct Hits<T: Serialize> {
    pub hits: Vec<T>,
    pub total: usize,
}

impl<T: Serialize> SearchResponse<T> {
    pub fn new(hits: Vec<T>) -> Self {
        let total = hits.len();
        Self {
            hits: Hits { hits, total },
        }
    }
}

//! Domain core of the fakenodo archival test double.
//!
//! Holds the deposition model, the checksum and DOI rules, and the
//! in-memory [`registry::DepositionRegistry`]. Nothing in here knows about
//! HTTP; the `fakenodo-api` crate wraps it.

pub mod deposition;
pub mod error;
pub mod hashing;
pub mod registry;
pub mod types;
pub mod upload;

//! Snapshot persistence layer.
//!
//! The whole mapping history is kept in a single JSON document: an array of
//! records in insertion order, each
//! `{"symbol", "identifier", "start_date", "end_date"}` with ISO dates and
//! `null` for an open end. Every accepted mutation rewrites the document.
//!
//! ## Responsibilities
//!
//! - Encode and decode the snapshot document
//! - Replace the file atomically on save
//! - Fail open on load: a missing or unreadable file is an empty history
//!
//! ## Non-Responsibilities
//!
//! - Invariant checks on loaded records (handled by `symbology-core::rules`)
//! - Deciding when to save (handled by `symbology-engine`)

pub mod json_file;

// Re-export primary types
pub use json_file::{decode_records, encode_records, JsonSnapshotFile};

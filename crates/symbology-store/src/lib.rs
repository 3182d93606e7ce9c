//! Symbology Store - durable home of the mapping history
//!
//! Provides:
//! - Atomic temp-then-rename file writes
//! - The JSON snapshot file adapter implementing
//!   [`symbology_core::SnapshotSink`]

pub mod atomic;
pub mod errors;
pub mod snapshot;

// Re-export key types
pub use errors::Result;
pub use snapshot::JsonSnapshotFile;

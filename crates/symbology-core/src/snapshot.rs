//! Snapshot sink seam
//!
//! The domain triggers persistence after every accepted mutation but does not
//! know how records reach durable storage. Implementations live in the store
//! crate; [`NoSnapshot`] keeps everything in memory.

use crate::errors::ExError;
use crate::model::MappingRecord;

/// Durable home of the full record collection
pub trait SnapshotSink {
    /// Load the persisted collection in insertion order
    ///
    /// Must fail open: a missing or unreadable snapshot yields an empty list.
    fn load(&self) -> Vec<MappingRecord>;

    /// Replace the persisted collection with `records`, atomically
    ///
    /// # Errors
    ///
    /// Returns an `Io`, `Serialization` or `Persistence` error when the
    /// records could not be made durable. The previous snapshot stays intact.
    fn persist(&self, records: &[MappingRecord]) -> Result<(), ExError>;
}

/// Sink that persists nothing (in-memory operation and tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnapshot;

impl SnapshotSink for NoSnapshot {
    fn load(&self) -> Vec<MappingRecord> {
        Vec::new()
    }

    fn persist(&self, _records: &[MappingRecord]) -> Result<(), ExError> {
        Ok(())
    }
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for &S {
    fn load(&self) -> Vec<MappingRecord> {
        (**self).load()
    }

    fn persist(&self, records: &[MappingRecord]) -> Result<(), ExError> {
        (**self).persist(records)
    }
}

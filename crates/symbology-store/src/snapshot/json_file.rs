use std::fs;
use std::path::{Path, PathBuf};

use symbology_core::{ExError, MappingRecord, SnapshotSink};
use tracing::{debug, warn};

use crate::atomic::atomic_write;
use crate::errors::{io_error, persistence_error, serialization_error, Result};

/// Encode records as the snapshot document (pretty-printed JSON array)
pub fn encode_records(records: &[MappingRecord]) -> Result<Vec<u8>> {
    let mut bytes =
        serde_json::to_vec_pretty(records).map_err(|e| serialization_error("encode_snapshot", e))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode a snapshot document
///
/// # Errors
///
/// `Persistence` for an empty document, `Serialization` when it is not a
/// JSON array of records.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<MappingRecord>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(persistence_error("decode_snapshot", "snapshot file is empty"));
    }
    serde_json::from_slice(bytes).map_err(|e| serialization_error("decode_snapshot", e))
}

/// JSON snapshot file adapter
///
/// Loads the persisted history at startup and rewrites it after every
/// accepted mutation through [`atomic_write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSnapshotFile {
    path: PathBuf,
}

impl JsonSnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict read of the snapshot
    ///
    /// Unlike [`SnapshotSink::load`] this reports why a snapshot could not be
    /// used; the audit command relies on it.
    ///
    /// # Errors
    ///
    /// `Io` when the file cannot be read (including when it is missing),
    /// otherwise the errors of [`decode_records`].
    pub fn read(&self) -> Result<Vec<MappingRecord>> {
        let bytes = fs::read(&self.path).map_err(|e| io_error("read_snapshot", e))?;
        decode_records(&bytes)
    }
}

impl SnapshotSink for JsonSnapshotFile {
    fn load(&self) -> Vec<MappingRecord> {
        match self.read() {
            Ok(records) => {
                debug!(
                    component = module_path!(),
                    op = "snapshot_load",
                    path = %self.path.display(),
                    record_count = records.len(),
                    "snapshot loaded"
                );
                records
            }
            Err(err) => {
                warn!(
                    component = module_path!(),
                    op = "snapshot_load",
                    path = %self.path.display(),
                    err.code = err.code(),
                    "snapshot unusable, starting with an empty history: {}",
                    err.message()
                );
                Vec::new()
            }
        }
    }

    fn persist(&self, records: &[MappingRecord]) -> std::result::Result<(), ExError> {
        let bytes = encode_records(records)?;
        atomic_write(&self.path, &bytes)?;
        debug!(
            component = module_path!(),
            op = "snapshot_persist",
            path = %self.path.display(),
            record_count = records.len(),
            "snapshot written"
        );
        Ok(())
    }
}

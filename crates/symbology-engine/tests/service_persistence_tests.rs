//! Service mutations against real and failing snapshot sinks

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::Cell;

use chrono::NaiveDate;
use symbology_core::{ExError, ExErrorKind, MappingRecord, RecordStore, ReassignmentPolicy, SnapshotSink};
use symbology_engine::SymbologyService;
use symbology_store::JsonSnapshotFile;
use tempfile::TempDir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Sink that accepts a fixed number of writes, then fails
struct FlakySink {
    remaining: Cell<usize>,
}

impl FlakySink {
    fn allowing(writes: usize) -> Self {
        Self {
            remaining: Cell::new(writes),
        }
    }
}

impl SnapshotSink for FlakySink {
    fn load(&self) -> Vec<MappingRecord> {
        Vec::new()
    }

    fn persist(&self, _records: &[MappingRecord]) -> Result<(), ExError> {
        match self.remaining.get() {
            0 => Err(ExError::new(ExErrorKind::Persistence).with_message("disk full")),
            n => {
                self.remaining.set(n - 1);
                Ok(())
            }
        }
    }
}

#[test]
fn test_failed_persist_leaves_memory_unchanged() {
    let mut service = SymbologyService::new(
        RecordStore::new(),
        FlakySink::allowing(1),
        ReassignmentPolicy::StrictReject,
    );
    service.add_mapping("AAPL", 1, d(2024, 1, 1)).unwrap();

    let err = service.add_mapping("MSFT", 2, d(2024, 1, 1)).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert_eq!(err.op(), Some("add_mapping"));
    assert_eq!(service.records().len(), 1);
    assert!(service.lookup("MSFT", d(2024, 1, 1)).is_err());

    let err = service.terminate_mapping("AAPL", d(2024, 2, 1)).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert!(service.records()[0].is_open());
}

#[test]
fn test_rejected_mutation_does_not_persist() {
    let mut service = SymbologyService::new(
        RecordStore::new(),
        FlakySink::allowing(1),
        ReassignmentPolicy::StrictReject,
    );
    service.add_mapping("AAPL", 1, d(2024, 1, 1)).unwrap();

    // A conflict is reported as such, not as the sink's failure
    let err = service.add_mapping("AAPL", 2, d(2024, 1, 1)).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Conflict);
}

#[test]
fn test_every_accepted_mutation_is_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mappings.json");

    let mut service = SymbologyService::open(
        JsonSnapshotFile::new(&path),
        ReassignmentPolicy::StrictReject,
    );
    service.add_mapping("FB", 7, d(2020, 1, 1)).unwrap();
    service.terminate_mapping("FB", d(2021, 10, 28)).unwrap();
    service.add_mapping("META", 7, d(2021, 10, 28)).unwrap();

    let reopened = SymbologyService::open(
        JsonSnapshotFile::new(&path),
        ReassignmentPolicy::StrictReject,
    );
    assert_eq!(reopened.records(), service.records());
    assert_eq!(reopened.get_symbol(7, d(2021, 10, 27)).unwrap(), "FB");
    assert_eq!(reopened.get_symbol(7, d(2021, 10, 28)).unwrap(), "META");
}

#[test]
fn test_open_with_corrupt_snapshot_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mappings.json");
    std::fs::write(&path, "not json at all").unwrap();

    let mut service = SymbologyService::open(
        JsonSnapshotFile::new(&path),
        ReassignmentPolicy::StrictReject,
    );
    assert!(service.records().is_empty());

    // The next accepted mutation replaces the corrupt file
    service.add_mapping("AAPL", 1, d(2024, 1, 1)).unwrap();
    assert_eq!(JsonSnapshotFile::new(&path).read().unwrap().len(), 1);
}

#[test]
fn test_open_keeps_history_with_violations_and_reports_them() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mappings.json");
    std::fs::write(
        &path,
        r#"[
            {"symbol": "AAPL", "identifier": 1, "start_date": "2024-01-01", "end_date": null},
            {"symbol": "AAPL", "identifier": 2, "start_date": "2024-02-01", "end_date": null}
        ]"#,
    )
    .unwrap();

    let service = SymbologyService::open(
        JsonSnapshotFile::new(&path),
        ReassignmentPolicy::StrictReject,
    );
    assert_eq!(service.records().len(), 2);

    let violations = service.audit();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind(), ExErrorKind::InvariantViolation);
}

#[test]
fn test_auto_terminate_policy_through_service() {
    let mut service = SymbologyService::new(
        RecordStore::new(),
        symbology_core::NoSnapshot,
        ReassignmentPolicy::AutoTerminate,
    );
    service.add_mapping("AAPL", 1, d(2024, 1, 1)).unwrap();
    service.add_mapping("AAPL", 2, d(2024, 6, 1)).unwrap();

    assert_eq!(service.get_identifier("AAPL", d(2024, 5, 31)).unwrap(), 1);
    assert_eq!(service.get_identifier("AAPL", d(2024, 6, 1)).unwrap(), 2);
}

//! Service operations emit canonical start/end/end_error events

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::NaiveDate;
use symbology_core::core_types::schema::{FIELD_DATE, FIELD_IDENTIFIER};
use symbology_core::logging_facility::init_test_capture;
use symbology_core::{NoSnapshot, RecordStore, ReassignmentPolicy};
use symbology_engine::SymbologyService;
use tracing::Level;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn service() -> SymbologyService<NoSnapshot> {
    SymbologyService::new(RecordStore::new(), NoSnapshot, ReassignmentPolicy::StrictReject)
}

#[test]
fn test_add_mapping_emits_start_and_end() {
    let capture = init_test_capture();
    let mut service = service();

    service.add_mapping("LOGADD", 1, d(2024, 1, 1)).unwrap();

    let starts = capture.events_where("add_mapping", "symbol", "LOGADD");
    assert!(starts.iter().any(|e| e.event() == Some("start")));

    let ends: Vec<_> = starts
        .iter()
        .filter(|e| e.event() == Some("end"))
        .collect();
    assert_eq!(ends.len(), 1);
    assert!(ends[0].duration_ms().is_some());
    assert_eq!(ends[0].record_count(), Some(1));
}

#[test]
fn test_conflict_emits_end_error_at_warn() {
    let capture = init_test_capture();
    let mut service = service();

    service.add_mapping("LOGDUP", 1, d(2024, 1, 1)).unwrap();
    service.add_mapping("LOGDUP", 2, d(2024, 1, 1)).unwrap_err();

    let errors: Vec<_> = capture
        .events_where("add_mapping", "symbol", "LOGDUP")
        .into_iter()
        .filter(|e| e.event() == Some("end_error"))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].level, Level::WARN);
    assert_eq!(errors[0].err_code(), Some("ERR_CONFLICT"));
}

#[test]
fn test_lookup_miss_emits_not_found() {
    let capture = init_test_capture();
    let service = service();

    service.get_identifier("LOGMISS", d(2024, 1, 1)).unwrap_err();

    let errors: Vec<_> = capture
        .events_where("get_identifier", "symbol", "LOGMISS")
        .into_iter()
        .filter(|e| e.event() == Some("end_error"))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].err_code(), Some("ERR_NOT_FOUND"));
}

#[test]
fn test_reverse_lookup_logs_identifier_and_date() {
    let capture = init_test_capture();
    let service = service();

    service.get_symbol(987_654, d(2024, 3, 9)).unwrap_err();

    let events = capture.events_where("get_symbol", FIELD_IDENTIFIER, "987654");
    let start = events
        .iter()
        .find(|e| e.event() == Some("start"))
        .expect("start event");
    assert_eq!(start.field(FIELD_DATE), Some("2024-03-09"));

    let error = events
        .iter()
        .find(|e| e.event() == Some("end_error"))
        .expect("end_error event");
    assert_eq!(error.err_kind(), Some("NotFound"));
}

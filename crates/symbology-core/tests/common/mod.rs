use chrono::NaiveDate;
use symbology_core::ops::mapping_ops;
use symbology_core::{RecordStore, ReassignmentPolicy};

/// Shorthand for a calendar date in test tables
#[allow(dead_code)]
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Create a new empty store for testing
#[allow(dead_code)]
pub fn new_store() -> RecordStore {
    RecordStore::new()
}

/// Add a mapping under the default (strict) policy, panicking on conflict
#[allow(dead_code)]
pub fn add(store: &mut RecordStore, symbol: &str, identifier: u64, start: NaiveDate) {
    mapping_ops::add_mapping(
        store,
        ReassignmentPolicy::StrictReject,
        symbol,
        identifier,
        start,
    )
    .unwrap();
}

/// Build the two adjacent records used by the range scenarios:
/// A = [2024-01-01, 2024-01-03), B = [2024-01-03, 2024-01-05)
#[allow(dead_code)]
pub fn setup_adjacent_pair(store: &mut RecordStore) {
    add(store, "A", 1, d(2024, 1, 1));
    mapping_ops::terminate_mapping(store, "A", d(2024, 1, 3)).unwrap();
    add(store, "B", 2, d(2024, 1, 3));
    mapping_ops::terminate_mapping(store, "B", d(2024, 1, 5)).unwrap();
}

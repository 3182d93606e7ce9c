//! Scenario 01: add a mapping and resolve it in both directions
//!
//! Covers the identifier-by-symbol and symbol-by-identifier lookups and the
//! half-open boundary of a closed record.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{add, d, new_store};
use symbology_core::ops::mapping_ops::{get_identifier, get_symbol, lookup, terminate_mapping};
use symbology_core::{MappingState, SymbologyError};

#[test]
fn test_identifier_by_symbol_after_add() {
    // GIVEN AAPL -> 1 from 2024-01-01
    let mut store = new_store();
    add(&mut store, "AAPL", 1, d(2024, 1, 1));

    // THEN the next day resolves to 1
    assert_eq!(get_identifier(&store, "AAPL", d(2024, 1, 2)).unwrap(), 1);
}

#[test]
fn test_symbol_by_identifier_after_add() {
    let mut store = new_store();
    add(&mut store, "AAPL", 1, d(2024, 1, 1));

    assert_eq!(get_symbol(&store, 1, d(2024, 6, 30)).unwrap(), "AAPL");
}

#[test]
fn test_lookup_before_start_is_not_found() {
    let mut store = new_store();
    add(&mut store, "AAPL", 1, d(2024, 1, 1));

    let result = lookup(&store, "AAPL", d(2023, 12, 31));
    assert_eq!(
        result,
        Err(SymbologyError::SymbolNotActive {
            symbol: "AAPL".to_string(),
            date: d(2023, 12, 31),
        })
    );
    assert!(matches!(
        get_symbol(&store, 1, d(2023, 12, 31)),
        Err(SymbologyError::IdentifierNotActive { identifier: 1, .. })
    ));
}

#[test]
fn test_boundary_exactness() {
    // GIVEN a record [2024-01-01, 2024-01-05)
    let mut store = new_store();
    add(&mut store, "AAPL", 1, d(2024, 1, 1));
    terminate_mapping(&mut store, "AAPL", d(2024, 1, 5)).unwrap();

    // THEN it is active on the first and on the fourth, not on the fifth
    assert!(lookup(&store, "AAPL", d(2024, 1, 1)).is_ok());
    assert!(lookup(&store, "AAPL", d(2024, 1, 4)).is_ok());
    assert!(lookup(&store, "AAPL", d(2024, 1, 5)).is_err());
    assert!(get_symbol(&store, 1, d(2024, 1, 5)).is_err());
}

#[test]
fn test_lookup_returns_record_view() {
    let mut store = new_store();
    add(&mut store, "MSFT", 10, d(2024, 1, 1));

    let record = lookup(&store, "MSFT", d(2024, 1, 1)).unwrap();
    assert_eq!(record.symbol, "MSFT");
    assert_eq!(record.identifier, 10);
    assert_eq!(record.start_date, d(2024, 1, 1));
    assert_eq!(record.state(), MappingState::Open);
}

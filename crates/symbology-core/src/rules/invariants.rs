//! Collection-wide invariant audit
//!
//! The mapping operations keep these invariants by construction. The audit
//! exists for collections of unknown origin: snapshots loaded from disk and
//! property tests. Results are ordered by the later record's position.

use crate::errors::{Result, SymbologyError};
use crate::ops::RecordStore;

/// Find pairs of records for the same symbol whose intervals overlap
///
/// Returns list of (symbol, earlier_position, later_position) tuples
pub fn find_symbol_overlaps(store: &RecordStore) -> Vec<(String, usize, usize)> {
    let mut overlaps = Vec::new();

    for (later, record) in store.records().iter().enumerate() {
        for &earlier in store.positions_for_symbol(&record.symbol) {
            if earlier >= later {
                break;
            }
            if store.records()[earlier].overlaps(record) {
                overlaps.push((record.symbol.clone(), earlier, later));
            }
        }
    }

    overlaps
}

/// Find pairs of records for the same identifier whose intervals overlap
///
/// Returns list of (identifier, earlier_position, later_position) tuples
pub fn find_identifier_overlaps(store: &RecordStore) -> Vec<(u64, usize, usize)> {
    let mut overlaps = Vec::new();

    for (later, record) in store.records().iter().enumerate() {
        for &earlier in store.positions_for_identifier(record.identifier) {
            if earlier >= later {
                break;
            }
            if store.records()[earlier].overlaps(record) {
                overlaps.push((record.identifier, earlier, later));
            }
        }
    }

    overlaps
}

/// Find records whose end date is not after their start date
///
/// Returns the positions of the offending records
pub fn find_malformed_intervals(store: &RecordStore) -> Vec<usize> {
    store
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| !record.is_well_formed())
        .map(|(position, _)| position)
        .collect()
}

/// Every violation in the collection, as typed errors
///
/// Same order as [`validate_store`]: malformed intervals, then symbol
/// overlaps, then identifier overlaps.
pub fn collect_violations(store: &RecordStore) -> Vec<SymbologyError> {
    let malformed = find_malformed_intervals(store)
        .into_iter()
        .map(|position| SymbologyError::MalformedInterval {
            position,
            symbol: store.records()[position].symbol.clone(),
        });
    let symbols = find_symbol_overlaps(store)
        .into_iter()
        .map(|(symbol, first, second)| SymbologyError::OverlappingSymbol {
            symbol,
            first,
            second,
        });
    let identifiers = find_identifier_overlaps(store).into_iter().map(
        |(identifier, first, second)| SymbologyError::OverlappingIdentifier {
            identifier,
            first,
            second,
        },
    );

    malformed.chain(symbols).chain(identifiers).collect()
}

/// Validate the whole collection
///
/// # Errors
/// Returns the first violation found, checking interval shape, then symbol
/// uniqueness, then identifier uniqueness. For exhaustive reporting call the
/// individual `find_*` functions.
pub fn validate_store(store: &RecordStore) -> Result<()> {
    if let Some(&position) = find_malformed_intervals(store).first() {
        return Err(SymbologyError::MalformedInterval {
            position,
            symbol: store.records()[position].symbol.clone(),
        });
    }

    if let Some((symbol, first, second)) = find_symbol_overlaps(store).into_iter().next() {
        return Err(SymbologyError::OverlappingSymbol {
            symbol,
            first,
            second,
        });
    }

    if let Some((identifier, first, second)) = find_identifier_overlaps(store).into_iter().next() {
        return Err(SymbologyError::OverlappingIdentifier {
            identifier,
            first,
            second,
        });
    }

    Ok(())
}

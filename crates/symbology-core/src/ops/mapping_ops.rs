use chrono::NaiveDate;

use super::store::RecordStore;
use crate::errors::{Result, SymbologyError};
use crate::model::MappingRecord;
use crate::policy::ReassignmentPolicy;

/// Add a new open-ended mapping `symbol ↔ identifier` starting on `start_date`
///
/// Conflict checks run before anything is mutated, in this order:
///
/// 1. a record for `symbol` active on `start_date`
/// 2. a record for `identifier` active on `start_date`
/// 3. a record for `symbol`, then for `identifier`, starting after
///    `start_date` - the new record is open-ended and would overlap it
///
/// Under [`ReassignmentPolicy::AutoTerminate`] an open holder from checks 1
/// and 2 that started before `start_date` is closed at `start_date` instead
/// of rejecting. Check 3 always rejects.
///
/// # Arguments
/// * `store` - Mutable reference to the RecordStore
/// * `policy` - Reassignment policy
/// * `symbol` - Symbol to assign (validated at the boundary)
/// * `identifier` - Identifier to assign
/// * `start_date` - First day of validity
///
/// # Returns
/// A copy of the appended record
///
/// # Errors
/// * `SymbolConflict` - the symbol is held on or after `start_date`
/// * `IdentifierConflict` - the identifier is held on or after `start_date`
pub fn add_mapping(
    store: &mut RecordStore,
    policy: ReassignmentPolicy,
    symbol: &str,
    identifier: u64,
    start_date: NaiveDate,
) -> Result<MappingRecord> {
    let symbol_conflict = || SymbologyError::SymbolConflict {
        symbol: symbol.to_string(),
        date: start_date,
    };
    let identifier_conflict = || SymbologyError::IdentifierConflict {
        identifier,
        date: start_date,
    };

    let symbol_holder = store.active_by_symbol(symbol, start_date).cloned();
    if let Some(holder) = &symbol_holder {
        if !can_supersede(policy, holder, start_date) {
            return Err(symbol_conflict());
        }
    }

    let identifier_holder = store.active_by_identifier(identifier, start_date).cloned();
    if let Some(holder) = &identifier_holder {
        if !can_supersede(policy, holder, start_date) {
            return Err(identifier_conflict());
        }
    }

    if store.next_by_symbol(symbol, start_date).is_some() {
        return Err(symbol_conflict());
    }
    if store.next_by_identifier(identifier, start_date).is_some() {
        return Err(identifier_conflict());
    }

    // Only reachable with holders under AutoTerminate
    if let Some(holder) = symbol_holder {
        store.close(&holder.symbol, start_date)?;
    }
    if let Some(holder) = identifier_holder {
        // Same symbol means the same record, already closed above
        if holder.symbol != symbol {
            store.close(&holder.symbol, start_date)?;
        }
    }

    Ok(store.append(symbol, identifier, start_date).clone())
}

fn can_supersede(policy: ReassignmentPolicy, holder: &MappingRecord, start_date: NaiveDate) -> bool {
    policy == ReassignmentPolicy::AutoTerminate && holder.is_open() && holder.start_date < start_date
}

/// Terminate the mapping for `symbol` active on `end_date`
///
/// The record's `end_date` becomes `end_date`; it is no longer active on
/// that date or any later one.
///
/// # Errors
/// * `SymbolNotActive` - nothing is active for `symbol` on `end_date`
/// * `AlreadyClosed` - the active record was closed earlier (end dates never move)
/// * `InvalidInterval` - the active record starts on `end_date`; closing
///   would leave an empty interval
pub fn terminate_mapping(
    store: &mut RecordStore,
    symbol: &str,
    end_date: NaiveDate,
) -> Result<MappingRecord> {
    let active = store.active_by_symbol(symbol, end_date).ok_or_else(|| {
        SymbologyError::SymbolNotActive {
            symbol: symbol.to_string(),
            date: end_date,
        }
    })?;

    if let Some(existing_end) = active.end_date {
        return Err(SymbologyError::AlreadyClosed {
            symbol: symbol.to_string(),
            date: end_date,
            end_date: existing_end,
        });
    }

    if active.start_date >= end_date {
        return Err(SymbologyError::InvalidInterval {
            symbol: symbol.to_string(),
            start_date: active.start_date,
            end_date,
        });
    }

    store.close(symbol, end_date).cloned()
}

/// Return the record for `symbol` active on `date`
///
/// # Errors
/// * `SymbolNotActive` - if no record is active
pub fn lookup(store: &RecordStore, symbol: &str, date: NaiveDate) -> Result<MappingRecord> {
    store
        .active_by_symbol(symbol, date)
        .cloned()
        .ok_or_else(|| SymbologyError::SymbolNotActive {
            symbol: symbol.to_string(),
            date,
        })
}

/// Identifier assigned to `symbol` on `date`
///
/// # Errors
/// * `SymbolNotActive` - if no record is active
pub fn get_identifier(store: &RecordStore, symbol: &str, date: NaiveDate) -> Result<u64> {
    lookup(store, symbol, date).map(|record| record.identifier)
}

/// Symbol assigned to `identifier` on `date`
///
/// # Errors
/// * `IdentifierNotActive` - if no record is active
pub fn get_symbol(store: &RecordStore, identifier: u64, date: NaiveDate) -> Result<String> {
    store
        .active_by_identifier(identifier, date)
        .map(|record| record.symbol.clone())
        .ok_or(SymbologyError::IdentifierNotActive { identifier, date })
}

/// All records intersecting `[begin, end)`, in insertion order
///
/// Never fails; an empty or inverted window yields an empty list.
pub fn mappings_between(store: &RecordStore, begin: NaiveDate, end: NaiveDate) -> Vec<MappingRecord> {
    store.overlapping(begin, end).into_iter().cloned().collect()
}

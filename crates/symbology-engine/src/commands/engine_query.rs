//! Engine-level read-only query surface.
//!
//! `apply_engine_query` is the single entry point for read-only queries.
//! Unlike `apply_engine_command`, it takes a shared reference to the service
//! and never touches the snapshot.

#![allow(clippy::result_large_err)]

use chrono::NaiveDate;
use symbology_core::{MappingRecord, SnapshotSink, SymbologyError};
use symbology_store::errors::Result;

use crate::service::SymbologyService;

/// Read-only queries supported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineQuery {
    /// Identifier a symbol meant on a date.
    IdentifierBySymbol { symbol: String, date: NaiveDate },
    /// Symbol an identifier meant on a date.
    SymbolByIdentifier { identifier: u64, date: NaiveDate },
    /// Full record active for a symbol on a date.
    MappingLookup { symbol: String, date: NaiveDate },
    /// Records intersecting `[begin, end)`.
    MappingsBetween { begin: NaiveDate, end: NaiveDate },
    /// The whole history.
    Records,
    /// Invariant violations in the live history.
    Audit,
}

/// Result of a read-only engine query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineQueryResult {
    Identifier(u64),
    Symbol(String),
    Mapping(MappingRecord),
    Mappings(Vec<MappingRecord>),
    Violations(Vec<SymbologyError>),
}

/// Apply a read-only query to a service.
///
/// # Errors
/// `NotFound` for point lookups with no active record. Range, history and
/// audit queries never fail.
pub fn apply_engine_query<S: SnapshotSink>(
    query: EngineQuery,
    service: &SymbologyService<S>,
) -> Result<EngineQueryResult> {
    match query {
        EngineQuery::IdentifierBySymbol { symbol, date } => service
            .get_identifier(&symbol, date)
            .map(EngineQueryResult::Identifier),
        EngineQuery::SymbolByIdentifier { identifier, date } => service
            .get_symbol(identifier, date)
            .map(EngineQueryResult::Symbol),
        EngineQuery::MappingLookup { symbol, date } => {
            service.lookup(&symbol, date).map(EngineQueryResult::Mapping)
        }
        EngineQuery::MappingsBetween { begin, end } => Ok(EngineQueryResult::Mappings(
            service.mappings_between(begin, end),
        )),
        EngineQuery::Records => Ok(EngineQueryResult::Mappings(service.records().to_vec())),
        EngineQuery::Audit => Ok(EngineQueryResult::Violations(service.audit())),
    }
}

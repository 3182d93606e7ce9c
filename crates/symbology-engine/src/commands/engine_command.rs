//! Engine-level mutating commands.

#![allow(clippy::result_large_err)]

use chrono::NaiveDate;
use symbology_core::{MappingRecord, SnapshotSink};
use symbology_store::errors::Result;

use crate::service::SymbologyService;

/// Engine-level commands that mutate the history and persist it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    /// Create an open-ended mapping.
    MappingCreate {
        symbol: String,
        identifier: u64,
        start_date: NaiveDate,
    },
    /// Close the mapping active for a symbol.
    MappingTerminate { symbol: String, end_date: NaiveDate },
}

/// Result of applying an engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommandResult {
    /// The appended record.
    MappingCreated(MappingRecord),
    /// The record as closed.
    MappingTerminated(MappingRecord),
}

impl EngineCommandResult {
    pub fn record(&self) -> &MappingRecord {
        match self {
            EngineCommandResult::MappingCreated(record)
            | EngineCommandResult::MappingTerminated(record) => record,
        }
    }
}

/// Apply an engine command to a service.
///
/// # Errors
/// The domain error (`Conflict`, `NotFound`, `InvalidInterval`) or the
/// persistence error of the service's snapshot sink.
pub fn apply_engine_command<S: SnapshotSink>(
    cmd: EngineCommand,
    service: &mut SymbologyService<S>,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::MappingCreate {
            symbol,
            identifier,
            start_date,
        } => service
            .add_mapping(&symbol, identifier, start_date)
            .map(EngineCommandResult::MappingCreated),
        EngineCommand::MappingTerminate { symbol, end_date } => service
            .terminate_mapping(&symbol, end_date)
            .map(EngineCommandResult::MappingTerminated),
    }
}

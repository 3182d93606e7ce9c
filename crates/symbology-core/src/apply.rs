//! Functional-boundary apply function
//!
//! ## Atomicity Contract
//!
//! `apply()` takes ownership of the current state and either returns the new
//! state together with the affected record, or an error. On error the input
//! state is dropped; callers that need to keep it apply to a clone and swap
//! the result in only once everything downstream (persistence) succeeded.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use symbology_core::{apply, Command, RecordStore, ReassignmentPolicy};
//!
//! let cmd = Command::MappingCreate {
//!     symbol: "AAPL".to_string(),
//!     identifier: 1,
//!     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//! };
//!
//! let applied = apply(RecordStore::new(), cmd, ReassignmentPolicy::StrictReject).unwrap();
//! assert_eq!(applied.state.len(), 1);
//! assert_eq!(applied.record.identifier, 1);
//! ```

use crate::commands::Command;
use crate::errors::Result;
use crate::model::MappingRecord;
use crate::ops::{mapping_ops, RecordStore};
use crate::policy::ReassignmentPolicy;

/// Outcome of a successfully applied command
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    /// Store after the mutation
    pub state: RecordStore,
    /// The record that was appended or closed
    pub record: MappingRecord,
}

/// Apply a command to a store, returning the new store state
///
/// # Errors
///
/// Returns the domain error of the underlying operation (`SymbolConflict`,
/// `IdentifierConflict`, `SymbolNotActive`, `AlreadyClosed`,
/// `InvalidInterval`). No error leaves a half-applied state behind: every
/// check runs before the first mutation.
pub fn apply(mut state: RecordStore, cmd: Command, policy: ReassignmentPolicy) -> Result<Applied> {
    let record = match cmd {
        Command::MappingCreate {
            symbol,
            identifier,
            start_date,
        } => mapping_ops::add_mapping(&mut state, policy, &symbol, identifier, start_date)?,
        Command::MappingTerminate { symbol, end_date } => {
            mapping_ops::terminate_mapping(&mut state, &symbol, end_date)?
        }
    };

    Ok(Applied { state, record })
}

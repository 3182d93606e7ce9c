//! Reader-writer serialized engine
//!
//! Commands hold the write lock across the whole check, mutate and persist
//! sequence; queries share the read lock.

#![allow(clippy::result_large_err)]

use std::sync::RwLock;

use symbology_core::errors::{ExError, ExErrorKind};
use symbology_core::{ReassignmentPolicy, SnapshotSink};
use symbology_store::errors::Result;

use crate::commands::engine_command::{self, EngineCommand, EngineCommandResult};
use crate::commands::engine_query::{self, EngineQuery, EngineQueryResult};
use crate::service::SymbologyService;

fn lock_poisoned(op: &str) -> ExError {
    ExError::new(ExErrorKind::Concurrency)
        .with_op(op.to_string())
        .with_message("service lock poisoned by a panicked writer")
}

/// Thread-safe front of a [`SymbologyService`]
#[derive(Debug)]
pub struct Engine<S: SnapshotSink> {
    service: RwLock<SymbologyService<S>>,
}

impl<S: SnapshotSink> Engine<S> {
    pub fn new(service: SymbologyService<S>) -> Self {
        Self {
            service: RwLock::new(service),
        }
    }

    /// Apply a mutating command under the write lock.
    ///
    /// # Errors
    /// `Concurrency` if the lock is poisoned, otherwise the errors of
    /// [`engine_command::apply_engine_command`].
    pub fn apply_engine_command(&self, cmd: EngineCommand) -> Result<EngineCommandResult> {
        let mut service = self
            .service
            .write()
            .map_err(|_| lock_poisoned("apply_engine_command"))?;
        engine_command::apply_engine_command(cmd, &mut *service)
    }

    /// Apply a read-only query under the read lock.
    ///
    /// # Errors
    /// `Concurrency` if the lock is poisoned, otherwise the errors of
    /// [`engine_query::apply_engine_query`].
    pub fn apply_engine_query(&self, query: EngineQuery) -> Result<EngineQueryResult> {
        let service = self
            .service
            .read()
            .map_err(|_| lock_poisoned("apply_engine_query"))?;
        engine_query::apply_engine_query(query, &*service)
    }

    /// Policy the service was configured with
    ///
    /// # Errors
    /// `Concurrency` if the lock is poisoned.
    pub fn policy(&self) -> Result<ReassignmentPolicy> {
        self.service
            .read()
            .map(|service| service.policy())
            .map_err(|_| lock_poisoned("policy"))
    }

    /// Consume the engine, returning the service
    ///
    /// # Errors
    /// `Concurrency` if the lock is poisoned.
    pub fn into_inner(self) -> Result<SymbologyService<S>> {
        self.service
            .into_inner()
            .map_err(|_| lock_poisoned("into_inner"))
    }
}

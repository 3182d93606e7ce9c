//! Mapping service: the domain operations wired to a snapshot sink.
//!
//! ## Mutation pipeline (in order):
//! 1. Clone the current store
//! 2. `apply` the command to the clone (all conflict checks, then mutation)
//! 3. Persist the staged records through the snapshot sink
//! 4. Swap the staged store in
//!
//! A failure at any step leaves the live store untouched, so memory and the
//! snapshot never diverge.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use chrono::NaiveDate;
use symbology_core::errors::{ExError, SymbologyError};
use symbology_core::ops::mapping_ops;
use symbology_core::rules::invariants::collect_violations;
use symbology_core::{
    apply, log_op_end, log_op_error, log_op_start, Command, MappingRecord, RecordStore,
    ReassignmentPolicy, SnapshotSink,
};
use symbology_store::errors::Result;
use tracing::warn;

/// Owns the live record store and its snapshot sink
///
/// Not synchronized; wrap in [`crate::Engine`] to share between threads.
#[derive(Debug)]
pub struct SymbologyService<S: SnapshotSink> {
    store: RecordStore,
    snapshot: S,
    policy: ReassignmentPolicy,
}

impl<S: SnapshotSink> SymbologyService<S> {
    /// Build a service over an existing store
    pub fn new(store: RecordStore, snapshot: S, policy: ReassignmentPolicy) -> Self {
        Self {
            store,
            snapshot,
            policy,
        }
    }

    /// Build a service from whatever the snapshot sink holds
    ///
    /// The loaded history is audited; each violation is logged at `warn`
    /// but does not prevent startup.
    pub fn open(snapshot: S, policy: ReassignmentPolicy) -> Self {
        log_op_start!("open_service", policy = policy.as_str());
        let start = Instant::now();

        let store = RecordStore::from_records(snapshot.load());
        let violations = collect_violations(&store);
        for violation in &violations {
            let ex: ExError = violation.clone().into();
            warn!(
                component = module_path!(),
                op = "open_service",
                err.code = ex.code(),
                "loaded snapshot violates an invariant: {}",
                violation
            );
        }

        let elapsed = start.elapsed().as_millis() as u64;
        log_op_end!(
            "open_service",
            duration_ms = elapsed,
            record_count = store.len(),
            violation_count = violations.len()
        );
        Self::new(store, snapshot, policy)
    }

    pub fn policy(&self) -> ReassignmentPolicy {
        self.policy
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }

    /// All records in history order
    pub fn records(&self) -> &[MappingRecord] {
        self.store.records()
    }

    /// Create an open-ended mapping and persist the new history
    ///
    /// # Errors
    /// `Conflict` when the symbol or identifier is taken, or the persistence
    /// error of the snapshot sink.
    pub fn add_mapping(
        &mut self,
        symbol: &str,
        identifier: u64,
        start_date: NaiveDate,
    ) -> Result<MappingRecord> {
        self.execute(Command::MappingCreate {
            symbol: symbol.to_string(),
            identifier,
            start_date,
        })
    }

    /// Close the mapping for `symbol` active on `end_date` and persist
    ///
    /// # Errors
    /// `NotFound` when nothing open is active, `InvalidInterval` for a
    /// termination on the start date, or the persistence error of the sink.
    pub fn terminate_mapping(&mut self, symbol: &str, end_date: NaiveDate) -> Result<MappingRecord> {
        self.execute(Command::MappingTerminate {
            symbol: symbol.to_string(),
            end_date,
        })
    }

    /// Record for `symbol` active on `date`
    ///
    /// # Errors
    /// `NotFound` if no record is active.
    pub fn lookup(&self, symbol: &str, date: NaiveDate) -> Result<MappingRecord> {
        self.query("lookup", symbol, date, |store| {
            mapping_ops::lookup(store, symbol, date)
        })
    }

    /// Identifier assigned to `symbol` on `date`
    ///
    /// # Errors
    /// `NotFound` if no record is active.
    pub fn get_identifier(&self, symbol: &str, date: NaiveDate) -> Result<u64> {
        self.query("get_identifier", symbol, date, |store| {
            mapping_ops::get_identifier(store, symbol, date)
        })
    }

    /// Symbol assigned to `identifier` on `date`
    ///
    /// # Errors
    /// `NotFound` if no record is active.
    pub fn get_symbol(&self, identifier: u64, date: NaiveDate) -> Result<String> {
        log_op_start!("get_symbol", identifier = identifier, date = %date);
        let start = Instant::now();

        let result = mapping_ops::get_symbol(&self.store, identifier, date)
            .map_err(|e| ExError::from(e).with_op("get_symbol"));

        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => log_op_end!("get_symbol", duration_ms = elapsed),
            Err(e) => log_op_error!("get_symbol", e, duration_ms = elapsed, identifier = identifier),
        }
        result
    }

    /// All records intersecting `[begin, end)`, in history order
    pub fn mappings_between(&self, begin: NaiveDate, end: NaiveDate) -> Vec<MappingRecord> {
        log_op_start!("mappings_between", begin = %begin, end = %end);
        let start = Instant::now();

        let records = mapping_ops::mappings_between(&self.store, begin, end);

        let elapsed = start.elapsed().as_millis() as u64;
        log_op_end!(
            "mappings_between",
            duration_ms = elapsed,
            record_count = records.len()
        );
        records
    }

    /// Every invariant violation in the live history
    pub fn audit(&self) -> Vec<SymbologyError> {
        collect_violations(&self.store)
    }

    fn execute(&mut self, cmd: Command) -> Result<MappingRecord> {
        let op = cmd.op_name();
        log_op_start!(op, symbol = cmd.symbol(), policy = self.policy.as_str());
        let start = Instant::now();
        let symbol = cmd.symbol().to_string();

        let result = self.stage_and_commit(cmd).map_err(|e| e.with_op(op));

        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => log_op_end!(
                op,
                duration_ms = elapsed,
                symbol = symbol.as_str(),
                record_count = self.store.len()
            ),
            Err(e) => log_op_error!(op, e, duration_ms = elapsed, symbol = symbol.as_str()),
        }
        result
    }

    fn stage_and_commit(&mut self, cmd: Command) -> Result<MappingRecord> {
        let applied = apply(self.store.clone(), cmd, self.policy)?;
        self.snapshot.persist(applied.state.records())?;
        self.store = applied.state;
        Ok(applied.record)
    }

    fn query<T>(
        &self,
        op: &'static str,
        symbol: &str,
        date: NaiveDate,
        run: impl FnOnce(&RecordStore) -> symbology_core::Result<T>,
    ) -> Result<T> {
        log_op_start!(op, symbol = symbol, date = %date);
        let start = Instant::now();

        let result = run(&self.store).map_err(|e| ExError::from(e).with_op(op));

        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => log_op_end!(op, duration_ms = elapsed),
            Err(e) => log_op_error!(op, e, duration_ms = elapsed, symbol = symbol),
        }
        result
    }
}

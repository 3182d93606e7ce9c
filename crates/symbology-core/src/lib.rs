//! Symbology core
//!
//! Tracks a bidirectional symbol ↔ identifier assignment over calendar time.
//! Every assignment is a [`MappingRecord`] valid on a half-open interval
//! `[start_date, end_date)`. The [`RecordStore`] owns the append-mostly
//! history; the operations in [`ops::mapping_ops`] are the only mutation
//! path and keep the two uniqueness invariants intact:
//!
//! - at most one record per symbol is active on any date
//! - at most one record per identifier is active on any date
//!
//! Records are closed at most once and are never removed.

#![allow(clippy::result_large_err)]

pub mod apply;
pub mod commands;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod policy;
pub mod rules;
pub mod snapshot;

pub use symbology_core_types as core_types;

#[doc(hidden)]
pub use tracing as __tracing;

pub use apply::{apply, Applied};
pub use commands::Command;
pub use errors::{ExError, ExErrorKind, Result, SymbologyError};
pub use model::{MappingRecord, MappingState};
pub use ops::RecordStore;
pub use policy::ReassignmentPolicy;
pub use snapshot::{NoSnapshot, SnapshotSink};

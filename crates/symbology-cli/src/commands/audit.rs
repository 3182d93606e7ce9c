//! Snapshot audit
//!
//! Usage: symbology audit
//!
//! Unlike the other commands, an unreadable snapshot is an error here
//! instead of an empty history.

use anyhow::{bail, Context, Result};
use symbology_core::rules::invariants::collect_violations;
use symbology_core::RecordStore;
use symbology_engine::SymbologyConfig;
use symbology_store::JsonSnapshotFile;

/// Execute audit
pub fn execute(settings: &SymbologyConfig) -> Result<()> {
    let snapshot = JsonSnapshotFile::new(&settings.snapshot_path);
    let records = snapshot
        .read()
        .with_context(|| format!("cannot audit {}", snapshot.path().display()))?;

    let store = RecordStore::from_records(records);
    let violations = collect_violations(&store);
    for violation in &violations {
        println!("{}", violation);
    }

    if !violations.is_empty() {
        bail!(
            "{} invariant violation(s) in {} records",
            violations.len(),
            store.len()
        );
    }
    println!("ok: {} records, no violations", store.len());
    Ok(())
}

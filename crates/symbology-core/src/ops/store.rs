use std::collections::HashMap;

use chrono::NaiveDate;

use crate::errors::{Result, SymbologyError};
use crate::model::MappingRecord;

/// In-memory store for mapping records
///
/// Records live in a single `Vec` in insertion (history) order; nothing is
/// ever removed. Two position indexes narrow key lookups to the records that
/// carry that symbol or identifier, scanned in insertion order, so every
/// lookup returns exactly what a full linear scan would.
///
/// The store performs no uniqueness validation - that is the job of
/// [`crate::ops::mapping_ops`]. Not thread-safe; callers serialize access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    /// All records, insertion order
    pub(crate) records: Vec<MappingRecord>,
    /// Symbol -> positions in `records`, ascending
    pub(crate) by_symbol: HashMap<String, Vec<usize>>,
    /// Identifier -> positions in `records`, ascending
    pub(crate) by_identifier: HashMap<u64, Vec<usize>>,
}

impl RecordStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a previously persisted record sequence
    ///
    /// Order is preserved as given. Records are taken as-is; use
    /// [`crate::rules::invariants`] to audit a collection of unknown origin.
    pub fn from_records(records: Vec<MappingRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.push(record);
        }
        store
    }

    /// All records in insertion order
    pub fn records(&self) -> &[MappingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a new open-ended record
    ///
    /// Returns a view of the stored record.
    pub fn append(
        &mut self,
        symbol: impl Into<String>,
        identifier: u64,
        start_date: NaiveDate,
    ) -> &MappingRecord {
        let position = self.push(MappingRecord::open(symbol, identifier, start_date));
        &self.records[position]
    }

    /// Find the record for `symbol` active on `date`
    ///
    /// Returns the first match in insertion order.
    pub fn active_by_symbol(&self, symbol: &str, date: NaiveDate) -> Option<&MappingRecord> {
        self.position_active_by_symbol(symbol, date)
            .map(|pos| &self.records[pos])
    }

    /// Find the record for `identifier` active on `date`
    ///
    /// Returns the first match in insertion order.
    pub fn active_by_identifier(&self, identifier: u64, date: NaiveDate) -> Option<&MappingRecord> {
        self.positions_for_identifier(identifier)
            .iter()
            .map(|&pos| &self.records[pos])
            .find(|record| record.is_active_on(date))
    }

    /// Find the first record for `symbol` that starts strictly after `date`
    pub fn next_by_symbol(&self, symbol: &str, date: NaiveDate) -> Option<&MappingRecord> {
        self.positions_for_symbol(symbol)
            .iter()
            .map(|&pos| &self.records[pos])
            .find(|record| record.start_date > date)
    }

    /// Find the first record for `identifier` that starts strictly after `date`
    pub fn next_by_identifier(&self, identifier: u64, date: NaiveDate) -> Option<&MappingRecord> {
        self.positions_for_identifier(identifier)
            .iter()
            .map(|&pos| &self.records[pos])
            .find(|record| record.start_date > date)
    }

    /// Close the record for `symbol` active on `date`, setting `end_date = date`
    ///
    /// From then on the record is active up to and excluding `date`.
    ///
    /// # Errors
    ///
    /// * `SymbolNotActive` - no record for `symbol` is active on `date`
    /// * `AlreadyClosed` - the active record already carries an end date;
    ///   an end date is never rewritten
    pub fn close(&mut self, symbol: &str, date: NaiveDate) -> Result<&MappingRecord> {
        let position = self.position_active_by_symbol(symbol, date).ok_or_else(|| {
            SymbologyError::SymbolNotActive {
                symbol: symbol.to_string(),
                date,
            }
        })?;

        let record = &mut self.records[position];
        if let Some(end_date) = record.end_date {
            return Err(SymbologyError::AlreadyClosed {
                symbol: symbol.to_string(),
                date,
                end_date,
            });
        }

        record.end_date = Some(date);
        Ok(&self.records[position])
    }

    /// Every record whose interval intersects `[begin, end)`, in insertion order
    ///
    /// Callers needing chronological order must sort.
    pub fn overlapping(&self, begin: NaiveDate, end: NaiveDate) -> Vec<&MappingRecord> {
        self.records
            .iter()
            .filter(|record| record.overlaps_window(begin, end))
            .collect()
    }

    fn push(&mut self, record: MappingRecord) -> usize {
        let position = self.records.len();
        self.by_symbol
            .entry(record.symbol.clone())
            .or_default()
            .push(position);
        self.by_identifier
            .entry(record.identifier)
            .or_default()
            .push(position);
        self.records.push(record);
        position
    }

    fn position_active_by_symbol(&self, symbol: &str, date: NaiveDate) -> Option<usize> {
        self.positions_for_symbol(symbol)
            .iter()
            .copied()
            .find(|&pos| self.records[pos].is_active_on(date))
    }

    pub(crate) fn positions_for_symbol(&self, symbol: &str) -> &[usize] {
        self.by_symbol.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn positions_for_identifier(&self, identifier: u64) -> &[usize] {
        self.by_identifier
            .get(&identifier)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

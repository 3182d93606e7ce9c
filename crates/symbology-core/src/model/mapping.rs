use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a mapping record
///
/// `Open` is the only initial state; `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingState {
    /// No end date yet: valid from `start_date` into the unbounded future
    Open,
    /// End date set; the record is an immutable historical fact
    Closed,
}

/// MappingRecord - one symbol ↔ identifier assignment
///
/// The assignment is valid on the half-open interval `[start_date, end_date)`.
/// An absent `end_date` means the record is open-ended. The serialized form
/// is the snapshot wire format: dates are ISO `YYYY-MM-DD`, an open record
/// carries `"end_date": null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingRecord {
    /// Human-readable symbol (letters only at the boundary)
    pub symbol: String,

    /// Numeric identifier in the second identifier space
    pub identifier: u64,

    /// Inclusive lower bound
    pub start_date: NaiveDate,

    /// Exclusive upper bound, `None` while the record is open
    pub end_date: Option<NaiveDate>,
}

impl MappingRecord {
    /// Create a new open record starting on `start_date`
    pub fn open(symbol: impl Into<String>, identifier: u64, start_date: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            identifier,
            start_date,
            end_date: None,
        }
    }

    /// Check whether the record is active on `date`
    ///
    /// Active means `start_date <= date` and (`end_date` absent or `date < end_date`).
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date.map_or(true, |end| date < end)
    }

    /// Check whether the record's interval intersects the window `[begin, end)`
    ///
    /// An empty or inverted window (`end <= begin`) intersects nothing.
    pub fn overlaps_window(&self, begin: NaiveDate, end: NaiveDate) -> bool {
        begin < end && self.start_date < end && self.end_date.map_or(true, |e| e > begin)
    }

    /// Check whether two records' intervals intersect
    ///
    /// An absent end date counts as the unbounded future.
    pub fn overlaps(&self, other: &MappingRecord) -> bool {
        let self_before_other_ends = other.end_date.map_or(true, |e| self.start_date < e);
        let other_before_self_ends = self.end_date.map_or(true, |e| other.start_date < e);
        self_before_other_ends && other_before_self_ends
    }

    /// Current lifecycle state
    pub fn state(&self) -> MappingState {
        if self.end_date.is_some() {
            MappingState::Closed
        } else {
            MappingState::Open
        }
    }

    /// Check if the record is still open-ended
    pub fn is_open(&self) -> bool {
        self.end_date.is_none()
    }

    /// Check if the record has been closed
    pub fn is_closed(&self) -> bool {
        self.end_date.is_some()
    }

    /// `end_date` absent or strictly after `start_date`
    pub fn is_well_formed(&self) -> bool {
        self.end_date.map_or(true, |end| end > self.start_date)
    }
}

//! Reassignment policy
//!
//! Decides what `add_mapping` does when the requested symbol or identifier is
//! already held by an open record on the start date. Rejecting is the
//! default; superseding must be opted into through configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Behaviour of `add_mapping` when the new record collides with an active one
///
/// # Example
/// ```
/// use symbology_core::ReassignmentPolicy;
///
/// let policy: ReassignmentPolicy = "auto-terminate".parse().unwrap();
/// assert_eq!(policy, ReassignmentPolicy::AutoTerminate);
/// assert_eq!(ReassignmentPolicy::default(), ReassignmentPolicy::StrictReject);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReassignmentPolicy {
    /// Reject with a Conflict; the caller terminates the old record first
    #[default]
    StrictReject,
    /// Close the colliding open record at the new start date, then append
    ///
    /// Collisions that cannot be resolved by closing (the colliding record
    /// starts on the same date, is already closed, or starts later) are
    /// still rejected.
    AutoTerminate,
}

impl ReassignmentPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReassignmentPolicy::StrictReject => "strict-reject",
            ReassignmentPolicy::AutoTerminate => "auto-terminate",
        }
    }
}

impl fmt::Display for ReassignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReassignmentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" | "strict-reject" => Ok(ReassignmentPolicy::StrictReject),
            "auto" | "auto-terminate" => Ok(ReassignmentPolicy::AutoTerminate),
            other => Err(format!(
                "unknown reassignment policy '{}' (expected strict-reject or auto-terminate)",
                other
            )),
        }
    }
}

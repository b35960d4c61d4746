//! Inputs the task logic consumes but does not compute.
//!
//! Rate vectors, crime data, success chances and reputation gain come from
//! the wider game simulation. [`TaskEnvironment`] is the seam; the
//! [`catalog`](crate::catalog) module provides a data-driven implementation.

use serde::{Deserialize, Serialize};

use crate::sleeve::{GainRates, Sleeve, SleeveStats};

/// Static facts about a crime that the task logic needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeInfo {
    /// Verb phrase shown in the activity description, e.g. "shoplift".
    pub type_name: String,
    /// Time to attempt the crime once, in milliseconds.
    pub time_ms: f64,
}

/// External collaborator supplying game formulas.
pub trait TaskEnvironment {
    /// Gains for the sleeve's current task. Every field non-negative.
    ///
    /// For continuous tasks this is the per-cycle accrual. For a crime it is
    /// the per-attempt payout: `money` is paid only on success, and the exp
    /// fields are credited once per attempt, doubled on success.
    fn gain_rates(&self, sleeve: &Sleeve) -> GainRates;

    /// Look up a crime by identifier.
    fn crime(&self, id: &str) -> Option<CrimeInfo>;

    /// Chance in `[0, 1]` that the sleeve succeeds at the crime.
    fn crime_success_chance(&self, id: &str, stats: &SleeveStats) -> f64;

    /// Per-cycle reputation gain. Only meaningful for company/faction work.
    fn reputation_gain(&self, sleeve: &Sleeve) -> f64;
}

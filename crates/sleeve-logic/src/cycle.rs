//! Per-cycle task processing: accrue continuous gains, resolve crimes.
//!
//! The game clock decides how many cycles have elapsed; this module only
//! applies them. Crime rolls are passed in so callers control randomness.

use crate::constants::{CRIME_SUCCESS_EXP_MULT, CYCLE_MS};
use crate::environment::TaskEnvironment;
use crate::sleeve::{GainRates, Sleeve};
use crate::task::SleeveTask;

/// Result of one finished crime attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct CrimeResolution {
    pub crime: String,
    pub success: bool,
    /// Money and experience credited for the attempt.
    pub gains: GainRates,
}

/// Apply `cycles` game cycles to the sleeve's current task.
///
/// For crimes, `roll` in `[0, 1)` decides the outcome if the attempt
/// finishes during these cycles. At most one attempt resolves per call;
/// the crime then restarts from zero.
pub fn process_cycles(
    sleeve: &mut Sleeve,
    env: &dyn TaskEnvironment,
    cycles: u32,
    roll: f64,
) -> Option<CrimeResolution> {
    if cycles == 0 {
        return None;
    }
    let rates = *sleeve.gain_rates();
    let crime = match sleeve.task() {
        SleeveTask::Idle => return None,
        SleeveTask::Crime { crime } => crime.clone(),
        _ => {
            sleeve.credit(&rates, cycles as f64);
            return None;
        }
    };

    sleeve.task_time += cycles as f64 * CYCLE_MS;
    if sleeve.task_time < sleeve.task_max_time() {
        return None;
    }

    let chance = env.crime_success_chance(&crime, &sleeve.stats);
    let success = roll < chance;
    let gains = if success {
        rates.scaled(CRIME_SUCCESS_EXP_MULT).with_money(rates.money)
    } else {
        rates.with_money(0.0)
    };
    sleeve.credit(&gains, 1.0);
    sleeve.task_time = 0.0;

    log::debug!(
        "Sleeve {} {} crime {:?} (chance {:.3}, roll {:.3})",
        sleeve.index,
        if success { "succeeded at" } else { "failed" },
        crime,
        chance,
        roll
    );

    Some(CrimeResolution {
        crime,
        success,
        gains,
    })
}

//! The sleeve record: stats, recovery scalars, current task and its rates.
//!
//! Task state is private. It changes only through [`Sleeve::reset_task_status`]
//! and the task-start operations the [`controller`](crate::controller) calls,
//! so every assignment passes through the reset step.

use serde::{Deserialize, Serialize};

use crate::environment::TaskEnvironment;
use crate::error::SelectionError;
use crate::task::{FactionWorkType, SleeveTask, TaskKind};

/// Per-cycle accrual amounts for each experience category and money.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GainRates {
    pub hack: f64,
    pub str: f64,
    pub def: f64,
    pub dex: f64,
    pub agi: f64,
    pub cha: f64,
    pub money: f64,
}

impl GainRates {
    pub const ZERO: GainRates = GainRates {
        hack: 0.0,
        str: 0.0,
        def: 0.0,
        dex: 0.0,
        agi: 0.0,
        cha: 0.0,
        money: 0.0,
    };

    /// Every field multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> GainRates {
        GainRates {
            hack: self.hack * factor,
            str: self.str * factor,
            def: self.def * factor,
            dex: self.dex * factor,
            agi: self.agi * factor,
            cha: self.cha * factor,
            money: self.money * factor,
        }
    }

    /// Add `other * factor` into `self`.
    pub fn add_scaled(&mut self, other: &GainRates, factor: f64) {
        self.hack += other.hack * factor;
        self.str += other.str * factor;
        self.def += other.def * factor;
        self.dex += other.dex * factor;
        self.agi += other.agi * factor;
        self.cha += other.cha * factor;
        self.money += other.money * factor;
    }

    /// Same experience, money replaced.
    pub fn with_money(mut self, money: f64) -> GainRates {
        self.money = money;
        self
    }
}

/// The six primary attribute levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleeveStats {
    pub hacking: f64,
    pub strength: f64,
    pub defense: f64,
    pub dexterity: f64,
    pub agility: f64,
    pub charisma: f64,
}

impl Default for SleeveStats {
    fn default() -> Self {
        Self {
            hacking: 1.0,
            strength: 1.0,
            defense: 1.0,
            dexterity: 1.0,
            agility: 1.0,
            charisma: 1.0,
        }
    }
}

impl SleeveStats {
    pub fn average_combat(&self) -> f64 {
        (self.strength + self.defense + self.dexterity + self.agility) / 4.0
    }

    pub fn average_all(&self) -> f64 {
        (self.hacking
            + self.strength
            + self.defense
            + self.dexterity
            + self.agility
            + self.charisma)
            / 6.0
    }
}

/// A secondary, independently taskable avatar.
#[derive(Debug, Clone)]
pub struct Sleeve {
    /// Position in the player's roster.
    pub index: usize,
    pub stats: SleeveStats,
    /// Recovery scalar, 0–100. 100 means fully recovered.
    pub shock: f64,
    /// Synchronization with the original consciousness, 0–100.
    pub sync: f64,
    pub augmentations: Vec<String>,
    /// Milliseconds spent on the current attempt. Advanced by the game clock.
    pub task_time: f64,
    task: SleeveTask,
    gain_rates: GainRates,
    task_max_time: f64,
    earnings_for_task: GainRates,
}

impl Sleeve {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            stats: SleeveStats::default(),
            shock: 1.0,
            sync: 1.0,
            augmentations: Vec::new(),
            task_time: 0.0,
            task: SleeveTask::Idle,
            gain_rates: GainRates::ZERO,
            task_max_time: 0.0,
            earnings_for_task: GainRates::ZERO,
        }
    }

    pub fn with_stats(mut self, stats: SleeveStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn task(&self) -> &SleeveTask {
        &self.task
    }

    pub fn current_task(&self) -> TaskKind {
        self.task.kind()
    }

    pub fn gain_rates(&self) -> &GainRates {
        &self.gain_rates
    }

    pub fn task_max_time(&self) -> f64 {
        self.task_max_time
    }

    /// Gains accumulated since the current task started.
    pub fn earnings_for_task(&self) -> &GainRates {
        &self.earnings_for_task
    }

    /// Return to idle and clear everything tied to the previous task.
    pub fn reset_task_status(&mut self) {
        self.task = SleeveTask::Idle;
        self.gain_rates = GainRates::ZERO;
        self.task_time = 0.0;
        self.task_max_time = 0.0;
        self.earnings_for_task = GainRates::ZERO;
    }

    // ── Task-start operations ───────────────────────────────────────────
    //
    // Callers must reset first; `controller::assign_task` does.

    pub(crate) fn work_for_company(&mut self, env: &dyn TaskEnvironment, company: &str) {
        self.start(
            env,
            SleeveTask::Company {
                company: company.to_string(),
            },
        );
    }

    pub(crate) fn work_for_faction(
        &mut self,
        env: &dyn TaskEnvironment,
        faction: &str,
        work: FactionWorkType,
    ) {
        self.start(
            env,
            SleeveTask::Faction {
                faction: faction.to_string(),
                work,
            },
        );
    }

    pub(crate) fn commit_crime(
        &mut self,
        env: &dyn TaskEnvironment,
        crime: &str,
    ) -> Result<(), SelectionError> {
        let info = env
            .crime(crime)
            .ok_or_else(|| SelectionError::UnknownCrime(crime.to_string()))?;
        self.task_max_time = info.time_ms;
        self.start(
            env,
            SleeveTask::Crime {
                crime: crime.to_string(),
            },
        );
        Ok(())
    }

    pub(crate) fn take_university_course(
        &mut self,
        env: &dyn TaskEnvironment,
        university: &str,
        course: &str,
    ) {
        self.start(
            env,
            SleeveTask::Class {
                university: university.to_string(),
                course: course.to_string(),
            },
        );
    }

    pub(crate) fn workout_at_gym(&mut self, env: &dyn TaskEnvironment, gym: &str, stat: &str) {
        self.start(
            env,
            SleeveTask::Gym {
                gym: gym.to_string(),
                stat: stat.to_string(),
            },
        );
    }

    pub(crate) fn shock_recovery(&mut self, env: &dyn TaskEnvironment) {
        self.start(env, SleeveTask::Recovery);
    }

    pub(crate) fn synchronize(&mut self, env: &dyn TaskEnvironment) {
        self.start(env, SleeveTask::Synchro);
    }

    fn start(&mut self, env: &dyn TaskEnvironment, task: SleeveTask) {
        self.task = task;
        self.gain_rates = env.gain_rates(self);
    }

    // ── Crate-internal hooks for cycle processing and restore ───────────

    pub(crate) fn credit(&mut self, gains: &GainRates, factor: f64) {
        self.earnings_for_task.add_scaled(gains, factor);
    }

    /// Put back a task read from a save without recomputing rates.
    pub(crate) fn restore_task(
        &mut self,
        task: SleeveTask,
        gain_rates: GainRates,
        task_time: f64,
        task_max_time: f64,
        earnings: GainRates,
    ) {
        self.task = task;
        self.gain_rates = gain_rates;
        self.task_time = task_time;
        self.task_max_time = task_max_time;
        self.earnings_for_task = earnings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sleeve_is_idle() {
        let sleeve = Sleeve::new(3);
        assert_eq!(sleeve.index, 3);
        assert_eq!(sleeve.current_task(), TaskKind::Idle);
        assert_eq!(*sleeve.gain_rates(), GainRates::ZERO);
    }

    #[test]
    fn test_gain_rates_scaling() {
        let rates = GainRates {
            hack: 2.0,
            money: 10.0,
            ..GainRates::ZERO
        };
        let scaled = rates.scaled(5.0);
        assert_eq!(scaled.hack, 10.0);
        assert_eq!(scaled.money, 50.0);
        assert_eq!(scaled.str, 0.0);

        let mut total = GainRates::ZERO;
        total.add_scaled(&rates, 3.0);
        total.add_scaled(&rates, 1.0);
        assert_eq!(total.hack, 8.0);
        assert_eq!(total.money, 40.0);
    }

    #[test]
    fn test_stat_averages() {
        let stats = SleeveStats {
            hacking: 60.0,
            strength: 10.0,
            defense: 20.0,
            dexterity: 30.0,
            agility: 40.0,
            charisma: 0.0,
        };
        assert!((stats.average_combat() - 25.0).abs() < 1e-9);
        assert!((stats.average_all() - 26.666_666).abs() < 1e-3);
    }
}

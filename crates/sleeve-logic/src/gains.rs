//! Gain aggregator: turns a sleeve's rate vector into earnings-table rows.
//!
//! Two mutually exclusive modes:
//!
//! | Task | Rows | Qualifier |
//! |------|------|-----------|
//! | Idle | none | — |
//! | Crime | full payout per attempt | on success / 2x on success |
//! | everything else | rate × display multiplier | per second |
//!
//! Company and faction work add a reputation row. Row order is fixed:
//! money, hacking, strength, defense, dexterity, agility, charisma,
//! reputation.

use serde::{Deserialize, Serialize};

use crate::config::SleeveConfig;
use crate::environment::TaskEnvironment;
use crate::format;
use crate::sleeve::{GainRates, Sleeve};
use crate::task::SleeveTask;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GainKind {
    Money,
    Hacking,
    Strength,
    Defense,
    Dexterity,
    Agility,
    Charisma,
    Reputation,
}

impl GainKind {
    /// Rows taken straight from the rate vector, in display order.
    pub const RATE_ROWS: [GainKind; 7] = [
        GainKind::Money,
        GainKind::Hacking,
        GainKind::Strength,
        GainKind::Defense,
        GainKind::Dexterity,
        GainKind::Agility,
        GainKind::Charisma,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GainKind::Money => "Money",
            GainKind::Hacking => "Hacking Exp",
            GainKind::Strength => "Strength Exp",
            GainKind::Defense => "Defense Exp",
            GainKind::Dexterity => "Dexterity Exp",
            GainKind::Agility => "Agility Exp",
            GainKind::Charisma => "Charisma Exp",
            GainKind::Reputation => "Reputation",
        }
    }

    /// The matching field of a rate vector. Reputation is not part of it.
    pub fn rate_in(self, rates: &GainRates) -> Option<f64> {
        match self {
            GainKind::Money => Some(rates.money),
            GainKind::Hacking => Some(rates.hack),
            GainKind::Strength => Some(rates.str),
            GainKind::Defense => Some(rates.def),
            GainKind::Dexterity => Some(rates.dex),
            GainKind::Agility => Some(rates.agi),
            GainKind::Charisma => Some(rates.cha),
            GainKind::Reputation => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Qualifier {
    /// Paid once if the crime succeeds.
    OnSuccess,
    /// Granted on every attempt, doubled if the crime succeeds.
    DoubleOnSuccess,
    PerSecond,
}

impl Qualifier {
    pub fn text(self) -> &'static str {
        match self {
            Qualifier::OnSuccess => "(on success)",
            Qualifier::DoubleOnSuccess => "(2x on success)",
            Qualifier::PerSecond => "/ sec",
        }
    }
}

/// One line of the earnings table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainRow {
    pub kind: GainKind,
    pub value: f64,
    pub qualifier: Qualifier,
}

impl GainRow {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Earnings rows for the sleeve's current task, using default display settings.
pub fn compute_displayed_gains(sleeve: &Sleeve, env: &dyn TaskEnvironment) -> Vec<GainRow> {
    compute_displayed_gains_with(sleeve, env, &SleeveConfig::default())
}

pub fn compute_displayed_gains_with(
    sleeve: &Sleeve,
    env: &dyn TaskEnvironment,
    config: &SleeveConfig,
) -> Vec<GainRow> {
    let rates = sleeve.gain_rates();
    match sleeve.task() {
        SleeveTask::Idle => Vec::new(),
        SleeveTask::Crime { .. } => rate_rows(rates, 1.0, |kind| {
            if kind == GainKind::Money {
                Qualifier::OnSuccess
            } else {
                Qualifier::DoubleOnSuccess
            }
        }),
        SleeveTask::Company { .. } | SleeveTask::Faction { .. } => {
            let mut rows = rate_rows(rates, config.display_multiplier, |_| Qualifier::PerSecond);
            rows.push(GainRow {
                kind: GainKind::Reputation,
                value: config.display_multiplier * env.reputation_gain(sleeve),
                qualifier: Qualifier::PerSecond,
            });
            rows
        }
        SleeveTask::Class { .. }
        | SleeveTask::Gym { .. }
        | SleeveTask::Recovery
        | SleeveTask::Synchro => {
            rate_rows(rates, config.display_multiplier, |_| Qualifier::PerSecond)
        }
    }
}

fn rate_rows(
    rates: &GainRates,
    factor: f64,
    qualifier: impl Fn(GainKind) -> Qualifier,
) -> Vec<GainRow> {
    GainKind::RATE_ROWS
        .iter()
        .filter_map(|&kind| {
            kind.rate_in(rates).map(|rate| GainRow {
                kind,
                value: rate * factor,
                qualifier: qualifier(kind),
            })
        })
        .collect()
}

/// Success chance of the sleeve's current crime, `None` for other tasks.
pub fn crime_success_rate(sleeve: &Sleeve, env: &dyn TaskEnvironment) -> Option<f64> {
    sleeve
        .task()
        .crime()
        .map(|crime| env.crime_success_chance(crime, &sleeve.stats))
}

/// Fraction of the current crime attempt completed, `None` for other tasks.
pub fn crime_progress(sleeve: &Sleeve) -> Option<f64> {
    sleeve.task().crime()?;
    let max = sleeve.task_max_time();
    if max <= 0.0 {
        return Some(0.0);
    }
    Some((sleeve.task_time / max).clamp(0.0, 1.0))
}

/// Number of filled ticks for a progress fraction, rounded down.
pub fn progress_ticks(fraction: f64, total_ticks: u32) -> u32 {
    let filled = (fraction.clamp(0.0, 1.0) * total_ticks as f64).floor();
    (filled as u32).min(total_ticks)
}

/// Text progress bar, e.g. `[||||------]`.
pub fn progress_bar_text(fraction: f64, total_ticks: u32) -> String {
    let filled = progress_ticks(fraction, total_ticks) as usize;
    let empty = total_ticks as usize - filled;
    format!("[{}{}]", "|".repeat(filled), "-".repeat(empty))
}

/// Render one row for a plain-text earnings table.
pub fn render_row(row: &GainRow) -> String {
    let value = match row.kind {
        GainKind::Money => format::money(row.value),
        GainKind::Reputation => format::reputation(row.value),
        _ => format::exp(row.value),
    };
    format!("{}: {} {}", row.label(), value, row.qualifier.text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_ticks_round_down() {
        assert_eq!(progress_ticks(10.0 / 25.0, 25), 10);
        assert_eq!(progress_ticks(0.999, 25), 24);
        assert_eq!(progress_ticks(1.0, 25), 25);
        assert_eq!(progress_ticks(-0.5, 25), 0);
        assert_eq!(progress_ticks(3.0, 25), 25);
    }

    #[test]
    fn test_progress_bar_text() {
        assert_eq!(progress_bar_text(0.5, 4), "[||--]");
        assert_eq!(progress_bar_text(0.0, 3), "[---]");
    }

    #[test]
    fn test_render_rows() {
        let money = GainRow {
            kind: GainKind::Money,
            value: 50.0,
            qualifier: Qualifier::PerSecond,
        };
        assert_eq!(render_row(&money), "Money: $50.000 / sec");
        let exp = GainRow {
            kind: GainKind::Agility,
            value: 2.0,
            qualifier: Qualifier::DoubleOnSuccess,
        };
        assert_eq!(render_row(&exp), "Agility Exp: 2.000 (2x on success)");
    }

    #[test]
    fn test_reputation_has_no_rate_field() {
        let rates = GainRates {
            hack: 1.0,
            ..GainRates::ZERO
        };
        assert_eq!(GainKind::Reputation.rate_in(&rates), None);
        assert_eq!(GainKind::Hacking.rate_in(&rates), Some(1.0));
    }
}

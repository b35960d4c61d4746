//! Data-driven [`TaskEnvironment`] backed by a JSON task catalog.
//!
//! The real game derives rates from multipliers, job levels and faction
//! favor. The catalog flattens all of that to fixed numbers per task kind
//! and per crime, which is enough to drive the harness and the tests.
//!
//! ```
//! use sleeve_logic::catalog::TaskCatalog;
//! use sleeve_logic::environment::TaskEnvironment;
//!
//! let catalog = TaskCatalog::default();
//! assert!(catalog.crime("Shoplift").is_none());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::MAX_SKILL_LEVEL;
use crate::environment::{CrimeInfo, TaskEnvironment};
use crate::sleeve::{GainRates, Sleeve, SleeveStats};
use crate::task::{SleeveTask, TaskKind};

/// How much each stat contributes to a crime's success chance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessWeights {
    pub hacking: f64,
    pub strength: f64,
    pub defense: f64,
    pub dexterity: f64,
    pub agility: f64,
    pub charisma: f64,
}

impl SuccessWeights {
    fn weigh(&self, stats: &SleeveStats) -> f64 {
        self.hacking * stats.hacking
            + self.strength * stats.strength
            + self.defense * stats.defense
            + self.dexterity * stats.dexterity
            + self.agility * stats.agility
            + self.charisma * stats.charisma
    }
}

/// One crime a sleeve can commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeSpec {
    pub id: String,
    pub type_name: String,
    /// Payout on success.
    pub money: f64,
    pub time_ms: f64,
    /// Experience per attempt. `money` is ignored here.
    #[serde(default)]
    pub exp: GainRates,
    #[serde(default)]
    pub weights: SuccessWeights,
    pub difficulty: f64,
}

/// Fixed per-cycle rates for a non-crime task kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRateSpec {
    pub kind: TaskKind,
    pub rates: GainRates,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskCatalog {
    pub crimes: Vec<CrimeSpec>,
    pub task_rates: Vec<TaskRateSpec>,
    /// Reputation per cycle for company and faction work.
    pub reputation_per_cycle: f64,
}

impl TaskCatalog {
    pub fn crime_spec(&self, id: &str) -> Option<&CrimeSpec> {
        self.crimes.iter().find(|c| c.id == id)
    }

    pub fn rates_for(&self, kind: TaskKind) -> GainRates {
        self.task_rates
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| r.rates)
            .unwrap_or(GainRates::ZERO)
    }
}

impl TaskEnvironment for TaskCatalog {
    fn gain_rates(&self, sleeve: &Sleeve) -> GainRates {
        match sleeve.task() {
            SleeveTask::Idle => GainRates::ZERO,
            SleeveTask::Crime { crime } => self
                .crime_spec(crime)
                .map(|c| c.exp.with_money(c.money))
                .unwrap_or(GainRates::ZERO),
            other => self.rates_for(other.kind()),
        }
    }

    fn crime(&self, id: &str) -> Option<CrimeInfo> {
        self.crime_spec(id).map(|c| CrimeInfo {
            type_name: c.type_name.clone(),
            time_ms: c.time_ms,
        })
    }

    fn crime_success_chance(&self, id: &str, stats: &SleeveStats) -> f64 {
        let Some(crime) = self.crime_spec(id) else {
            return 0.0;
        };
        if crime.difficulty <= 0.0 {
            return 1.0;
        }
        let chance = crime.weights.weigh(stats) / MAX_SKILL_LEVEL / crime.difficulty;
        chance.clamp(0.0, 1.0)
    }

    fn reputation_gain(&self, sleeve: &Sleeve) -> f64 {
        if sleeve.current_task().earns_reputation() {
            self.reputation_per_cycle
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoplift() -> CrimeSpec {
        CrimeSpec {
            id: "Shoplift".into(),
            type_name: "shoplift".into(),
            money: 15_000.0,
            time_ms: 2_000.0,
            exp: GainRates {
                dex: 2.0,
                agi: 2.0,
                ..GainRates::ZERO
            },
            weights: SuccessWeights {
                dexterity: 1.0,
                agility: 1.0,
                ..SuccessWeights::default()
            },
            difficulty: 0.05,
        }
    }

    #[test]
    fn test_success_chance_scales_with_stats() {
        let catalog = TaskCatalog {
            crimes: vec![shoplift()],
            ..TaskCatalog::default()
        };
        let weak = SleeveStats::default();
        let strong = SleeveStats {
            dexterity: 200.0,
            agility: 200.0,
            ..SleeveStats::default()
        };
        let low = catalog.crime_success_chance("Shoplift", &weak);
        let high = catalog.crime_success_chance("Shoplift", &strong);
        assert!(low > 0.0 && low < high);
        assert!(high <= 1.0);
        assert_eq!(catalog.crime_success_chance("Heist", &strong), 0.0);
    }

    #[test]
    fn test_unknown_kind_rates_are_zero() {
        let catalog = TaskCatalog::default();
        assert_eq!(catalog.rates_for(TaskKind::Gym), GainRates::ZERO);
    }

    #[test]
    fn test_parse_catalog_json() {
        let json = r#"{
            "crimes": [{
                "id": "Mug",
                "type_name": "mug someone",
                "money": 36000,
                "time_ms": 4000,
                "exp": { "hack": 0, "str": 3, "def": 3, "dex": 3, "agi": 3, "cha": 0, "money": 0 },
                "difficulty": 0.2
            }],
            "task_rates": [{
                "kind": "Gym",
                "rates": { "hack": 0, "str": 1.5, "def": 0, "dex": 0, "agi": 0, "cha": 0, "money": 0 }
            }],
            "reputation_per_cycle": 0.4
        }"#;
        let catalog: TaskCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.crimes.len(), 1);
        assert_eq!(catalog.crime("Mug").unwrap().type_name, "mug someone");
        assert_eq!(catalog.rates_for(TaskKind::Gym).str, 1.5);
        assert_eq!(catalog.crimes[0].weights, SuccessWeights::default());
    }
}

//! The player's sleeves as a collection: lookup, sorting, action gating.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::config::SleeveConfig;
use crate::constants::SHOCK_RECOVERED;
use crate::sleeve::Sleeve;
use crate::task::TaskKind;

/// Ways to order sleeves in the roster view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOption {
    Hacking,
    Strength,
    Defense,
    Dexterity,
    Agility,
    Charisma,
    AverageCombatStats,
    AverageAllStats,
    TotalNumAugmentations,
}

impl SortOption {
    pub const ALL: [SortOption; 9] = [
        SortOption::Hacking,
        SortOption::Strength,
        SortOption::Defense,
        SortOption::Dexterity,
        SortOption::Agility,
        SortOption::Charisma,
        SortOption::AverageCombatStats,
        SortOption::AverageAllStats,
        SortOption::TotalNumAugmentations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortOption::Hacking => "Hacking Level",
            SortOption::Strength => "Strength Level",
            SortOption::Defense => "Defense Level",
            SortOption::Dexterity => "Dexterity Level",
            SortOption::Agility => "Agility Level",
            SortOption::Charisma => "Charisma Level",
            SortOption::AverageCombatStats => "Average Combat Stats",
            SortOption::AverageAllStats => "Average Stats",
            SortOption::TotalNumAugmentations => "Number of Augmentations",
        }
    }

    /// The number a sleeve is sorted by.
    pub fn metric(self, sleeve: &Sleeve) -> f64 {
        let s = &sleeve.stats;
        match self {
            SortOption::Hacking => s.hacking,
            SortOption::Strength => s.strength,
            SortOption::Defense => s.defense,
            SortOption::Dexterity => s.dexterity,
            SortOption::Agility => s.agility,
            SortOption::Charisma => s.charisma,
            SortOption::AverageCombatStats => s.average_combat(),
            SortOption::AverageAllStats => s.average_all(),
            SortOption::TotalNumAugmentations => sleeve.augmentations.len() as f64,
        }
    }

    /// Ascending comparison by this option's metric.
    pub fn compare(self, a: &Sleeve, b: &Sleeve) -> Ordering {
        self.metric(a)
            .partial_cmp(&self.metric(b))
            .unwrap_or(Ordering::Equal)
    }
}

/// Whether augmentations can be managed. Requires full recovery from shock.
pub fn can_manage_augmentations(sleeve: &Sleeve) -> bool {
    sleeve.shock >= SHOCK_RECOVERED
}

/// Whether the player can afford to send a sleeve travelling.
pub fn can_travel(player_money: f64, config: &SleeveConfig) -> bool {
    player_money >= config.travel_cost
}

/// All sleeves owned by one player session.
#[derive(Debug, Clone, Default)]
pub struct SleeveRoster {
    sleeves: Vec<Sleeve>,
}

impl SleeveRoster {
    /// Create `count` fresh idle sleeves indexed from zero.
    pub fn with_count(count: usize) -> Self {
        Self {
            sleeves: (0..count).map(Sleeve::new).collect(),
        }
    }

    /// Add a sleeve, re-indexing it to its roster position.
    pub fn push(&mut self, mut sleeve: Sleeve) -> usize {
        let index = self.sleeves.len();
        sleeve.index = index;
        self.sleeves.push(sleeve);
        index
    }

    pub fn len(&self) -> usize {
        self.sleeves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sleeves.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sleeve> {
        self.sleeves.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Sleeve> {
        self.sleeves.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sleeve> {
        self.sleeves.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Sleeve> {
        self.sleeves.iter_mut()
    }

    /// Roster indices ordered ascending by `option`. Ties keep roster order.
    pub fn sorted_indices(&self, option: SortOption) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.sleeves.len()).collect();
        indices.sort_by(|&a, &b| option.compare(&self.sleeves[a], &self.sleeves[b]));
        indices
    }

    /// How many sleeves are doing each task kind.
    pub fn count_by_task(&self, kind: TaskKind) -> usize {
        self.sleeves
            .iter()
            .filter(|s| s.current_task() == kind)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sleeve::SleeveStats;

    fn roster() -> SleeveRoster {
        let mut roster = SleeveRoster::default();
        roster.push(Sleeve::new(0).with_stats(SleeveStats {
            hacking: 50.0,
            strength: 10.0,
            ..SleeveStats::default()
        }));
        roster.push(Sleeve::new(0).with_stats(SleeveStats {
            hacking: 5.0,
            strength: 80.0,
            ..SleeveStats::default()
        }));
        let mut third = Sleeve::new(0);
        third.augmentations = vec!["Synaptic Enhancement Implant".into(), "Neurotrainer I".into()];
        roster.push(third);
        roster
    }

    #[test]
    fn test_push_reindexes() {
        let roster = roster();
        let indices: Vec<_> = roster.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_sort_by_stat_ascending() {
        let roster = roster();
        assert_eq!(roster.sorted_indices(SortOption::Hacking), vec![2, 1, 0]);
        assert_eq!(roster.sorted_indices(SortOption::Strength), vec![2, 0, 1]);
    }

    #[test]
    fn test_sort_by_augmentations_keeps_ties_stable() {
        let roster = roster();
        assert_eq!(
            roster.sorted_indices(SortOption::TotalNumAugmentations),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_gating() {
        let mut sleeve = Sleeve::new(0);
        assert!(!can_manage_augmentations(&sleeve));
        sleeve.shock = 100.0;
        assert!(can_manage_augmentations(&sleeve));
        let config = SleeveConfig::default();
        assert!(!can_travel(199_999.0, &config));
        assert!(can_travel(200_000.0, &config));
    }

    #[test]
    fn test_fresh_roster_all_idle() {
        let roster = SleeveRoster::with_count(4);
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.count_by_task(TaskKind::Idle), 4);
        assert_eq!(roster.get(3).map(|s| s.index), Some(3));
    }
}

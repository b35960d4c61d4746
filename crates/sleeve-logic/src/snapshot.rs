//! Flat save form of a sleeve, as stored in the player save.
//!
//! The save keeps the task as a string tag plus loose context fields.
//! Restoring rebuilds the tagged [`SleeveTask`]; a tag outside the known set
//! means the save is corrupt, and the sleeve comes back idle.

use serde::{Deserialize, Serialize};

use crate::sleeve::{GainRates, Sleeve, SleeveStats};
use crate::task::{FactionWorkType, SleeveTask, TaskKind};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SleeveSnapshot {
    pub index: usize,
    pub stats: SleeveStats,
    pub shock: f64,
    pub sync: f64,
    pub augmentations: Vec<String>,
    pub current_task: String,
    /// Company, faction, university or gym.
    pub current_task_location: String,
    pub crime_type: String,
    pub faction_work_type: FactionWorkType,
    /// Course for classes, exercised stat for the gym.
    pub class_type: String,
    pub gain_rates_for_task: GainRates,
    pub current_task_time: f64,
    pub current_task_max_time: f64,
    pub earnings_for_task: GainRates,
}

impl Sleeve {
    pub fn to_snapshot(&self) -> SleeveSnapshot {
        let mut snap = SleeveSnapshot {
            index: self.index,
            stats: self.stats,
            shock: self.shock,
            sync: self.sync,
            augmentations: self.augmentations.clone(),
            current_task: self.current_task().tag().to_string(),
            gain_rates_for_task: *self.gain_rates(),
            current_task_time: self.task_time,
            current_task_max_time: self.task_max_time(),
            earnings_for_task: *self.earnings_for_task(),
            ..SleeveSnapshot::default()
        };
        match self.task() {
            SleeveTask::Idle | SleeveTask::Recovery | SleeveTask::Synchro => {}
            SleeveTask::Company { company } => {
                snap.current_task_location = company.clone();
            }
            SleeveTask::Faction { faction, work } => {
                snap.current_task_location = faction.clone();
                snap.faction_work_type = *work;
            }
            SleeveTask::Crime { crime } => {
                snap.crime_type = crime.clone();
            }
            SleeveTask::Class { university, course } => {
                snap.current_task_location = university.clone();
                snap.class_type = course.clone();
            }
            SleeveTask::Gym { gym, stat } => {
                snap.current_task_location = gym.clone();
                snap.class_type = stat.clone();
            }
        }
        snap
    }
}

impl SleeveSnapshot {
    /// Rebuild a sleeve. Context fields that do not belong to the stored
    /// task are ignored.
    pub fn restore(self) -> Sleeve {
        let mut sleeve = Sleeve::new(self.index);
        sleeve.stats = self.stats;
        sleeve.shock = self.shock;
        sleeve.sync = self.sync;
        sleeve.augmentations = self.augmentations;

        let Some(kind) = TaskKind::from_tag(&self.current_task) else {
            log::error!(
                "Sleeve {} has unrecognized task {:?} in save; restoring as idle",
                self.index,
                self.current_task
            );
            return sleeve;
        };

        let task = match kind {
            TaskKind::Idle => return sleeve,
            TaskKind::Company => SleeveTask::Company {
                company: self.current_task_location,
            },
            TaskKind::Faction => SleeveTask::Faction {
                faction: self.current_task_location,
                work: self.faction_work_type,
            },
            TaskKind::Crime => SleeveTask::Crime {
                crime: self.crime_type,
            },
            TaskKind::Class => SleeveTask::Class {
                university: self.current_task_location,
                course: self.class_type,
            },
            TaskKind::Gym => SleeveTask::Gym {
                gym: self.current_task_location,
                stat: self.class_type,
            },
            TaskKind::Recovery => SleeveTask::Recovery,
            TaskKind::Synchro => SleeveTask::Synchro,
        };
        sleeve.restore_task(
            task,
            self.gain_rates_for_task,
            self.current_task_time,
            self.current_task_max_time,
            self.earnings_for_task,
        );
        sleeve
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag_restores_idle() {
        let snap = SleeveSnapshot {
            index: 2,
            current_task: "Bladeburner".into(),
            current_task_location: "Sector-12".into(),
            current_task_time: 500.0,
            gain_rates_for_task: GainRates {
                money: 9.0,
                ..GainRates::ZERO
            },
            ..SleeveSnapshot::default()
        };
        let sleeve = snap.restore();
        assert_eq!(sleeve.index, 2);
        assert!(sleeve.task().is_idle());
        assert_eq!(sleeve.task_time, 0.0);
        assert_eq!(*sleeve.gain_rates(), GainRates::ZERO);
    }

    #[test]
    fn test_idle_tag_ignores_stray_context() {
        let snap = SleeveSnapshot {
            current_task: "Idle".into(),
            current_task_location: "Foo Corp".into(),
            ..SleeveSnapshot::default()
        };
        let sleeve = snap.restore();
        assert_eq!(sleeve.task().location(), None);
    }

    #[test]
    fn test_camel_case_fields() {
        let json = r#"{ "index": 1, "currentTask": "Gym", "currentTaskLocation": "Iron Gym", "classType": "Defense" }"#;
        let snap: SleeveSnapshot = serde_json::from_str(json).unwrap();
        let sleeve = snap.restore();
        assert_eq!(
            *sleeve.task(),
            SleeveTask::Gym {
                gym: "Iron Gym".into(),
                stat: "Defense".into(),
            }
        );
    }
}

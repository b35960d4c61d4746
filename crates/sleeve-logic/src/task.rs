//! Task kinds and the per-task context a sleeve carries.
//!
//! A sleeve is always doing exactly one [`SleeveTask`]. The context each
//! task needs (company name, crime id, gym...) lives inside its variant, so
//! switching tasks cannot leave stale context behind.

use serde::{Deserialize, Serialize};

use crate::constants::faction_work;

/// Closed set of task kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskKind {
    #[default]
    Idle,
    Company,
    Faction,
    Crime,
    Class,
    Gym,
    Recovery,
    Synchro,
}

impl TaskKind {
    /// All task kinds in declaration order.
    pub const ALL: [TaskKind; 8] = [
        TaskKind::Idle,
        TaskKind::Company,
        TaskKind::Faction,
        TaskKind::Crime,
        TaskKind::Class,
        TaskKind::Gym,
        TaskKind::Recovery,
        TaskKind::Synchro,
    ];

    /// Tag used in save snapshots.
    pub fn tag(self) -> &'static str {
        match self {
            TaskKind::Idle => "Idle",
            TaskKind::Company => "Company",
            TaskKind::Faction => "Faction",
            TaskKind::Crime => "Crime",
            TaskKind::Class => "Class",
            TaskKind::Gym => "Gym",
            TaskKind::Recovery => "Recovery",
            TaskKind::Synchro => "Synchro",
        }
    }

    /// Parse a snapshot tag. Returns `None` for anything outside the set.
    pub fn from_tag(tag: &str) -> Option<TaskKind> {
        TaskKind::ALL.iter().copied().find(|k| k.tag() == tag)
    }

    /// Whether this task earns reputation for the player.
    pub fn earns_reputation(self) -> bool {
        matches!(self, TaskKind::Company | TaskKind::Faction)
    }
}

/// Kind of work done for a faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FactionWorkType {
    #[default]
    None,
    Hacking,
    Field,
    Security,
}

impl FactionWorkType {
    /// Map a selector label onto a work type. Unmatched labels map to `None`.
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("hacking") {
            FactionWorkType::Hacking
        } else if lower.contains("field") {
            FactionWorkType::Field
        } else if lower.contains("security") {
            FactionWorkType::Security
        } else {
            FactionWorkType::None
        }
    }

    /// Selector label, or an empty string for `None`.
    pub fn label(self) -> &'static str {
        match self {
            FactionWorkType::None => "",
            FactionWorkType::Hacking => faction_work::HACKING,
            FactionWorkType::Field => faction_work::FIELD,
            FactionWorkType::Security => faction_work::SECURITY,
        }
    }

    /// Phrase used in the activity description.
    pub fn doing(self) -> &'static str {
        match self {
            FactionWorkType::None => "nothing",
            FactionWorkType::Hacking => "Hacking contracts",
            FactionWorkType::Field => "Field work",
            FactionWorkType::Security => "Security work",
        }
    }
}

/// The current task of a sleeve, with the context that task needs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum SleeveTask {
    #[default]
    Idle,
    Company {
        company: String,
    },
    Faction {
        faction: String,
        work: FactionWorkType,
    },
    Crime {
        crime: String,
    },
    Class {
        university: String,
        course: String,
    },
    Gym {
        gym: String,
        stat: String,
    },
    Recovery,
    Synchro,
}

impl SleeveTask {
    pub fn kind(&self) -> TaskKind {
        match self {
            SleeveTask::Idle => TaskKind::Idle,
            SleeveTask::Company { .. } => TaskKind::Company,
            SleeveTask::Faction { .. } => TaskKind::Faction,
            SleeveTask::Crime { .. } => TaskKind::Crime,
            SleeveTask::Class { .. } => TaskKind::Class,
            SleeveTask::Gym { .. } => TaskKind::Gym,
            SleeveTask::Recovery => TaskKind::Recovery,
            SleeveTask::Synchro => TaskKind::Synchro,
        }
    }

    /// Location or target the task is bound to, if any.
    pub fn location(&self) -> Option<&str> {
        match self {
            SleeveTask::Company { company } => Some(company),
            SleeveTask::Faction { faction, .. } => Some(faction),
            SleeveTask::Class { university, .. } => Some(university),
            SleeveTask::Gym { gym, .. } => Some(gym),
            SleeveTask::Idle
            | SleeveTask::Crime { .. }
            | SleeveTask::Recovery
            | SleeveTask::Synchro => None,
        }
    }

    /// Crime identifier when the task is a crime.
    pub fn crime(&self) -> Option<&str> {
        match self {
            SleeveTask::Crime { crime } => Some(crime),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SleeveTask::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_lookup_covers_all_kinds() {
        for kind in TaskKind::ALL {
            assert_eq!(TaskKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(TaskKind::from_tag("Bladeburner"), None);
    }

    #[test]
    fn test_work_type_from_label() {
        assert_eq!(
            FactionWorkType::from_label("Hacking Contracts"),
            FactionWorkType::Hacking
        );
        assert_eq!(FactionWorkType::from_label("field work"), FactionWorkType::Field);
        assert_eq!(
            FactionWorkType::from_label("SECURITY WORK"),
            FactionWorkType::Security
        );
        assert_eq!(FactionWorkType::from_label("------"), FactionWorkType::None);
    }

    #[test]
    fn test_work_type_label_round_trip() {
        let all = [
            FactionWorkType::None,
            FactionWorkType::Hacking,
            FactionWorkType::Field,
            FactionWorkType::Security,
        ];
        for work in all {
            assert_eq!(FactionWorkType::from_label(work.label()), work);
        }
        assert_eq!(
            FactionWorkType::from_label(faction_work::SECURITY),
            FactionWorkType::Security
        );
    }

    #[test]
    fn test_only_company_and_faction_earn_reputation() {
        let earning: Vec<_> = TaskKind::ALL
            .iter()
            .filter(|k| k.earns_reputation())
            .collect();
        assert_eq!(earning, vec![&TaskKind::Company, &TaskKind::Faction]);
    }

    #[test]
    fn test_location_per_variant() {
        let gym = SleeveTask::Gym {
            gym: "Powerhouse Gym".into(),
            stat: "Strength".into(),
        };
        assert_eq!(gym.location(), Some("Powerhouse Gym"));
        assert_eq!(SleeveTask::Recovery.location(), None);
        let crime = SleeveTask::Crime {
            crime: "Shoplift".into(),
        };
        assert_eq!(crime.location(), None);
        assert_eq!(crime.crime(), Some("Shoplift"));
    }
}

//! Sleeve task controller: validates and applies task assignments.
//!
//! Every assignment first resets the sleeve to idle, then starts exactly one
//! task. A selection that cannot be applied leaves the sleeve idle and is
//! reported as a diagnostic; nothing here panics.
//!
//! ```
//! use sleeve_logic::catalog::TaskCatalog;
//! use sleeve_logic::controller::{assign_task, AssignOutcome, TaskSelection};
//! use sleeve_logic::sleeve::Sleeve;
//! use sleeve_logic::task::TaskKind;
//!
//! let catalog = TaskCatalog::default();
//! let mut sleeve = Sleeve::new(0);
//! let outcome = assign_task(&mut sleeve, &TaskSelection::Synchro, &catalog, || {});
//! assert_eq!(outcome, AssignOutcome::Assigned(TaskKind::Synchro));
//! ```

use crate::constants::selector;
use crate::environment::TaskEnvironment;
use crate::error::SelectionError;
use crate::sleeve::Sleeve;
use crate::task::{FactionWorkType, SleeveTask, TaskKind};

/// A structurally valid task request.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskSelection {
    /// The selector's empty entry. Resets, starts nothing.
    Placeholder,
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

impl TaskSelection {
    /// Build a selection from the selector's three string slots.
    ///
    /// `first` and `second` mean different things per kind: the company,
    /// faction or crime goes in `first`; faction work type, university and
    /// gym go in `second`; course and exercise go in `first`.
    pub fn from_selector(kind: &str, first: &str, second: &str) -> Result<Self, SelectionError> {
        let selection = match kind {
            selector::PLACEHOLDER => TaskSelection::Placeholder,
            selector::COMPANY => TaskSelection::Company {
                company: first.to_string(),
            },
            selector::FACTION => TaskSelection::Faction {
                faction: first.to_string(),
                work: FactionWorkType::from_label(second),
            },
            selector::CRIME => TaskSelection::Crime {
                crime: first.to_string(),
            },
            selector::CLASS => TaskSelection::Class {
                university: second.to_string(),
                course: first.to_string(),
            },
            selector::GYM => TaskSelection::Gym {
                gym: second.to_string(),
                stat: first.to_string(),
            },
            selector::RECOVERY => TaskSelection::Recovery,
            selector::SYNCHRO => TaskSelection::Synchro,
            other => return Err(SelectionError::UnrecognizedKind(other.to_string())),
        };
        Ok(selection)
    }
}

/// What an assignment did. Callers are free to ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOutcome {
    Assigned(TaskKind),
    /// Placeholder selection: the sleeve was reset and left idle.
    Cleared,
    /// The selection was refused; the sleeve is idle.
    Rejected(SelectionError),
}

/// Reset the sleeve to idle, clearing all task context.
pub fn reset_task_status(sleeve: &mut Sleeve) {
    sleeve.reset_task_status();
}

/// Reset the sleeve, then start the selected task. Calls `rerender` once
/// afterwards on every path.
pub fn assign_task(
    sleeve: &mut Sleeve,
    selection: &TaskSelection,
    env: &dyn TaskEnvironment,
    rerender: impl FnOnce(),
) -> AssignOutcome {
    sleeve.reset_task_status();

    let outcome = match selection {
        TaskSelection::Placeholder => AssignOutcome::Cleared,
        TaskSelection::Company { company } => {
            sleeve.work_for_company(env, company);
            AssignOutcome::Assigned(TaskKind::Company)
        }
        TaskSelection::Faction { faction, work } => {
            sleeve.work_for_faction(env, faction, *work);
            AssignOutcome::Assigned(TaskKind::Faction)
        }
        TaskSelection::Crime { crime } => match sleeve.commit_crime(env, crime) {
            Ok(()) => AssignOutcome::Assigned(TaskKind::Crime),
            Err(e) => AssignOutcome::Rejected(e),
        },
        TaskSelection::Class { university, course } => {
            sleeve.take_university_course(env, university, course);
            AssignOutcome::Assigned(TaskKind::Class)
        }
        TaskSelection::Gym { gym, stat } => {
            sleeve.workout_at_gym(env, gym, stat);
            AssignOutcome::Assigned(TaskKind::Gym)
        }
        TaskSelection::Recovery => {
            sleeve.shock_recovery(env);
            AssignOutcome::Assigned(TaskKind::Recovery)
        }
        TaskSelection::Synchro => {
            sleeve.synchronize(env);
            AssignOutcome::Assigned(TaskKind::Synchro)
        }
    };

    log_outcome(sleeve, &outcome);
    rerender();
    outcome
}

/// String-slot entry point used by the task selector.
///
/// An unrecognized kind still resets the sleeve to idle.
// TODO: confirm with the selector owners whether an unknown kind should
// keep the previous task instead of failing safe to idle.
pub fn assign_from_selector(
    sleeve: &mut Sleeve,
    slots: [&str; 3],
    env: &dyn TaskEnvironment,
    rerender: impl FnOnce(),
) -> AssignOutcome {
    let [kind, first, second] = slots;
    match TaskSelection::from_selector(kind, first, second) {
        Ok(selection) => assign_task(sleeve, &selection, env, rerender),
        Err(e) => {
            sleeve.reset_task_status();
            let outcome = AssignOutcome::Rejected(e);
            log_outcome(sleeve, &outcome);
            rerender();
            outcome
        }
    }
}

fn log_outcome(sleeve: &Sleeve, outcome: &AssignOutcome) {
    match outcome {
        AssignOutcome::Assigned(kind) => {
            log::info!("Sleeve {} assigned {:?}", sleeve.index, kind);
        }
        AssignOutcome::Cleared => {
            log::info!("Sleeve {} set to idle", sleeve.index);
        }
        AssignOutcome::Rejected(e) => {
            log::warn!("Sleeve {} left idle: {}", sleeve.index, e);
        }
    }
}

/// Human-readable sentence for what the sleeve is doing right now.
pub fn describe_current_activity(sleeve: &Sleeve, env: &dyn TaskEnvironment) -> String {
    match sleeve.task() {
        SleeveTask::Idle => "This sleeve is currently idle".to_string(),
        SleeveTask::Company { company } => {
            format!("This sleeve is currently working your job at {company}.")
        }
        SleeveTask::Faction { faction, work } => format!(
            "This sleeve is currently doing {} for {faction}.",
            work.doing()
        ),
        SleeveTask::Crime { crime } => match env.crime(crime) {
            Some(info) => format!(
                "This sleeve is currently attempting to {} (Success Rate: {}).",
                info.type_name,
                crate::format::percentage(env.crime_success_chance(crime, &sleeve.stats))
            ),
            None => {
                log::error!(
                    "Sleeve {} is committing unknown crime {:?}",
                    sleeve.index,
                    crime
                );
                String::new()
            }
        },
        SleeveTask::Class { university, .. } => {
            format!("This sleeve is currently studying/taking a course at {university}.")
        }
        SleeveTask::Gym { gym, .. } => {
            format!("This sleeve is currently working out at {gym}.")
        }
        SleeveTask::Recovery => "This sleeve is currently set to focus on shock recovery. \
             This causes the Sleeve's shock to decrease at a faster rate."
            .to_string(),
        SleeveTask::Synchro => "This sleeve is currently set to synchronize with the original \
             consciousness. This causes the Sleeve's synchronization to increase."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CrimeSpec, TaskCatalog, TaskRateSpec};
    use crate::constants::faction_work;
    use crate::sleeve::GainRates;
    use std::cell::Cell;

    fn catalog() -> TaskCatalog {
        TaskCatalog {
            crimes: vec![CrimeSpec {
                id: "Shoplift".into(),
                type_name: "shoplift".into(),
                money: 15_000.0,
                time_ms: 2_000.0,
                exp: GainRates {
                    dex: 2.0,
                    agi: 2.0,
                    ..GainRates::ZERO
                },
                weights: Default::default(),
                difficulty: 0.05,
            }],
            task_rates: vec![TaskRateSpec {
                kind: TaskKind::Company,
                rates: GainRates {
                    hack: 2.0,
                    money: 10.0,
                    ..GainRates::ZERO
                },
            }],
            reputation_per_cycle: 0.5,
        }
    }

    #[test]
    fn test_from_selector_argument_order() {
        let class =
            TaskSelection::from_selector(selector::CLASS, "Algorithms", "Rothman University")
                .unwrap();
        assert_eq!(
            class,
            TaskSelection::Class {
                university: "Rothman University".into(),
                course: "Algorithms".into(),
            }
        );
        let faction =
            TaskSelection::from_selector(selector::FACTION, "CyberSec", faction_work::HACKING)
                .unwrap();
        assert_eq!(
            faction,
            TaskSelection::Faction {
                faction: "CyberSec".into(),
                work: FactionWorkType::Hacking,
            }
        );
        assert_eq!(
            TaskSelection::from_selector("Bladeburner", "", ""),
            Err(SelectionError::UnrecognizedKind("Bladeburner".into()))
        );
    }

    #[test]
    fn test_assign_company_sets_rates() {
        let env = catalog();
        let mut sleeve = Sleeve::new(0);
        let outcome = assign_task(
            &mut sleeve,
            &TaskSelection::Company {
                company: "Foo Corp".into(),
            },
            &env,
            || {},
        );
        assert_eq!(outcome, AssignOutcome::Assigned(TaskKind::Company));
        assert_eq!(sleeve.task().location(), Some("Foo Corp"));
        assert_eq!(sleeve.gain_rates().money, 10.0);
    }

    #[test]
    fn test_switch_clears_previous_context() {
        let env = catalog();
        let mut sleeve = Sleeve::new(0);
        assign_task(
            &mut sleeve,
            &TaskSelection::Crime {
                crime: "Shoplift".into(),
            },
            &env,
            || {},
        );
        sleeve.task_time = 1_500.0;
        assert_eq!(sleeve.task_max_time(), 2_000.0);

        assign_task(&mut sleeve, &TaskSelection::Recovery, &env, || {});
        assert_eq!(*sleeve.task(), SleeveTask::Recovery);
        assert_eq!(sleeve.task_time, 0.0);
        assert_eq!(sleeve.task_max_time(), 0.0);
        assert_eq!(sleeve.gain_rates().money, 0.0);
    }

    #[test]
    fn test_unknown_crime_leaves_idle() {
        let env = catalog();
        let mut sleeve = Sleeve::new(0);
        assign_task(&mut sleeve, &TaskSelection::Synchro, &env, || {});
        let outcome = assign_task(
            &mut sleeve,
            &TaskSelection::Crime {
                crime: "Heist".into(),
            },
            &env,
            || {},
        );
        assert_eq!(
            outcome,
            AssignOutcome::Rejected(SelectionError::UnknownCrime("Heist".into()))
        );
        assert!(sleeve.task().is_idle());
    }

    #[test]
    fn test_placeholder_resets_to_idle() {
        let env = catalog();
        let mut sleeve = Sleeve::new(0);
        assign_task(&mut sleeve, &TaskSelection::Synchro, &env, || {});
        let outcome = assign_from_selector(&mut sleeve, ["------", "", ""], &env, || {});
        assert_eq!(outcome, AssignOutcome::Cleared);
        assert!(sleeve.task().is_idle());
    }

    #[test]
    fn test_rerender_called_once_on_every_path() {
        let env = catalog();
        let mut sleeve = Sleeve::new(0);
        for slots in [
            ["Synchronize", "", ""],
            ["Commit Crime", "Heist", ""],
            ["Hack the planet", "", ""],
            ["------", "", ""],
        ] {
            let calls = Cell::new(0);
            assign_from_selector(&mut sleeve, slots, &env, || calls.set(calls.get() + 1));
            assert_eq!(calls.get(), 1, "slots {:?}", slots);
        }
    }

    #[test]
    fn test_describe_faction_work() {
        let env = catalog();
        let mut sleeve = Sleeve::new(0);
        let slots = [selector::FACTION, "NiteSec", faction_work::FIELD];
        assign_from_selector(&mut sleeve, slots, &env, || {});
        assert_eq!(
            describe_current_activity(&sleeve, &env),
            "This sleeve is currently doing Field work for NiteSec."
        );

        let slots = [selector::FACTION, "NiteSec", "Lobbying"];
        assign_from_selector(&mut sleeve, slots, &env, || {});
        assert_eq!(
            describe_current_activity(&sleeve, &env),
            "This sleeve is currently doing nothing for NiteSec."
        );
    }

    #[test]
    fn test_describe_crime_includes_type_and_rate() {
        let env = catalog();
        let mut sleeve = Sleeve::new(0);
        assign_from_selector(&mut sleeve, ["Commit Crime", "Shoplift", ""], &env, || {});
        let desc = describe_current_activity(&sleeve, &env);
        assert!(desc.contains("attempting to shoplift"), "{desc}");
        assert!(desc.contains("Success Rate:"), "{desc}");
    }

    #[test]
    fn test_describe_crime_missing_from_environment_is_empty() {
        let env = catalog();
        let mut sleeve = Sleeve::new(0);
        assign_from_selector(&mut sleeve, ["Commit Crime", "Shoplift", ""], &env, || {});
        let empty = TaskCatalog::default();
        assert_eq!(describe_current_activity(&sleeve, &empty), "");
    }

    #[test]
    fn test_describe_fixed_sentences() {
        let env = catalog();
        let mut sleeve = Sleeve::new(0);
        assert_eq!(
            describe_current_activity(&sleeve, &env),
            "This sleeve is currently idle"
        );
        assign_task(&mut sleeve, &TaskSelection::Recovery, &env, || {});
        assert!(describe_current_activity(&sleeve, &env).contains("shock recovery"));
        assign_task(&mut sleeve, &TaskSelection::Synchro, &env, || {});
        assert!(describe_current_activity(&sleeve, &env).contains("synchronize"));
    }
}

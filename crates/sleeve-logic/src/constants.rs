//! Game constants: cycle timing, display resolution, selector labels.
//!
//! Plain values with no runtime dependency. Both the library and the
//! headless harness read these.

/// Length of one game update cycle in milliseconds.
pub const CYCLE_MS: f64 = 200.0;

/// Game cycles per real second. Per-cycle rates are multiplied by this
/// before being shown as per-second rates.
pub const CYCLES_PER_SECOND: f64 = 1000.0 / CYCLE_MS;

/// Number of discrete ticks in the crime progress bar.
pub const PROGRESS_TICKS: u32 = 25;

/// Experience multiplier applied when a crime succeeds.
pub const CRIME_SUCCESS_EXP_MULT: f64 = 2.0;

/// Money a sleeve needs the player to have before it can travel.
pub const TRAVEL_COST: f64 = 200_000.0;

/// Shock level at which a sleeve counts as fully recovered.
pub const SHOCK_RECOVERED: f64 = 100.0;

/// Skill level used to normalize crime success weights.
pub const MAX_SKILL_LEVEL: f64 = 975.0;

/// Task selector kind labels, as the selector widget emits them.
pub mod selector {
    pub const PLACEHOLDER: &str = "------";
    pub const COMPANY: &str = "Work for Company";
    pub const FACTION: &str = "Work for Faction";
    pub const CRIME: &str = "Commit Crime";
    pub const CLASS: &str = "Take University Course";
    pub const GYM: &str = "Workout at Gym";
    pub const RECOVERY: &str = "Shock Recovery";
    pub const SYNCHRO: &str = "Synchronize";
}

/// Faction work type labels offered by the selector.
pub mod faction_work {
    pub const HACKING: &str = "Hacking Contracts";
    pub const FIELD: &str = "Field Work";
    pub const SECURITY: &str = "Security Work";
}

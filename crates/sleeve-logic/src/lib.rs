//! Pure sleeve task logic.
//!
//! A player owns several sleeves. Each sleeve does exactly one task at a
//! time; this crate owns the assignment state machine and turns a task's
//! rate vector into the earnings rows the sleeve panel shows. Game formulas
//! (rates, crime success, reputation) come in through
//! [`environment::TaskEnvironment`]. No UI, no runtime: functions take plain
//! data and return results.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | JSON-backed task environment (crimes, per-task rates) |
//! | [`config`] | Display multiplier, progress resolution, travel cost |
//! | [`constants`] | Cycle timing, selector labels, thresholds |
//! | [`controller`] | Task assignment, reset, activity description |
//! | [`cycle`] | Per-cycle accrual and crime resolution |
//! | [`environment`] | Trait for externally computed game formulas |
//! | [`error`] | Selection errors |
//! | [`format`] | Money / exp / percentage formatting |
//! | [`gains`] | Earnings rows, crime progress bar |
//! | [`roster`] | Sleeve collection, sorting, action gating |
//! | [`sleeve`] | The sleeve record and rate vectors |
//! | [`snapshot`] | Flat save form and restore |
//! | [`task`] | Task kinds and per-task context |

pub mod catalog;
pub mod config;
pub mod constants;
pub mod controller;
pub mod cycle;
pub mod environment;
pub mod error;
pub mod format;
pub mod gains;
pub mod roster;
pub mod sleeve;
pub mod snapshot;
pub mod task;

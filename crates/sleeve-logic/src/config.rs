//! Display configuration for the sleeve panel.
//!
//! Defaults come from [`constants`](crate::constants); a host can load an
//! override from JSON. Missing fields fall back to the defaults.
//!
//! ```
//! use sleeve_logic::config::{validate_config, SleeveConfig};
//!
//! let config = SleeveConfig::default();
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{CYCLES_PER_SECOND, PROGRESS_TICKS, TRAVEL_COST};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleeveConfig {
    /// Factor turning per-cycle rates into per-second display rates.
    pub display_multiplier: f64,
    /// Resolution of the crime progress bar.
    pub progress_ticks: u32,
    /// Player money required before a sleeve may travel.
    pub travel_cost: f64,
}

impl Default for SleeveConfig {
    fn default() -> Self {
        Self {
            display_multiplier: CYCLES_PER_SECOND,
            progress_ticks: PROGRESS_TICKS,
            travel_cost: TRAVEL_COST,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Multiplier must be a positive finite number.
    InvalidDisplayMultiplier(f64),
    /// Progress bar needs at least one tick.
    ZeroProgressTicks,
    /// Travel cost must be non-negative and finite.
    InvalidTravelCost(f64),
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &SleeveConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !config.display_multiplier.is_finite() || config.display_multiplier <= 0.0 {
        errors.push(ConfigError::InvalidDisplayMultiplier(
            config.display_multiplier,
        ));
    }
    if config.progress_ticks == 0 {
        errors.push(ConfigError::ZeroProgressTicks);
    }
    if !config.travel_cost.is_finite() || config.travel_cost < 0.0 {
        errors.push(ConfigError::InvalidTravelCost(config.travel_cost));
    }

    errors
}

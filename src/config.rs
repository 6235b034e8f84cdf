//! Tunable prediction policy.
//!
//! Every field has a default, so a partial JSON document only overrides what
//! it names. [`PredictionConfig::validate`] rejects values the engine cannot
//! work with.

use serde::{Deserialize, Serialize};

/// Most recent records fed to the trend and ovulation estimators.
pub const RECENT_CYCLE_WINDOW: usize = 6;
/// Share of the regression projection in the blended cycle length.
pub const REGRESSION_WEIGHT: f64 = 0.7;
/// Population average used when only one cycle is known.
pub const COLD_START_CYCLE_LENGTH: u32 = 28;
pub const COLD_START_STD_DEV: u32 = 4;
pub const DEFAULT_PERIOD_LENGTH: u32 = 5;
/// Allowed range for the reported period length.
pub const MIN_PERIOD_LENGTH: u32 = 3;
pub const MAX_PERIOD_LENGTH: u32 = 8;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("recent window must cover at least 2 cycles, got {0}")]
    WindowTooSmall(usize),
    #[error("regression weight must be within 0.0..=1.0, got {0}")]
    RegressionWeight(f64),
    #[error("cold-start std dev {std_dev} must be below half of cycle length {cycle_length}")]
    ColdStart { cycle_length: u32, std_dev: u32 },
    #[error("default period length must be within 3..=8, got {0}")]
    PeriodLength(u32),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunable policy for the prediction engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredictionConfig {
    pub recent_window: usize,
    pub regression_weight: f64,
    pub cold_start_cycle_length: u32,
    pub cold_start_std_dev: u32,
    pub default_period_length: u32,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            recent_window: RECENT_CYCLE_WINDOW,
            regression_weight: REGRESSION_WEIGHT,
            cold_start_cycle_length: COLD_START_CYCLE_LENGTH,
            cold_start_std_dev: COLD_START_STD_DEV,
            default_period_length: DEFAULT_PERIOD_LENGTH,
        }
    }
}

impl PredictionConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recent_window < 2 {
            return Err(ConfigError::WindowTooSmall(self.recent_window));
        }
        if !self.regression_weight.is_finite() || !(0.0..=1.0).contains(&self.regression_weight) {
            return Err(ConfigError::RegressionWeight(self.regression_weight));
        }
        // min start is length - 2 * std dev, which has to stay after the last start
        if self.cold_start_cycle_length == 0
            || self.cold_start_std_dev.saturating_mul(2) >= self.cold_start_cycle_length
        {
            return Err(ConfigError::ColdStart {
                cycle_length: self.cold_start_cycle_length,
                std_dev: self.cold_start_std_dev,
            });
        }
        if !(MIN_PERIOD_LENGTH..=MAX_PERIOD_LENGTH).contains(&self.default_period_length) {
            return Err(ConfigError::PeriodLength(self.default_period_length));
        }
        Ok(())
    }
}

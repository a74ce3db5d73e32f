//! Engine configuration.
//!
//! Every threshold the engine compares against lives here so callers and
//! tests can override them instead of patching hidden globals. The defaults
//! match the shipped behavior: tie epsilon 0.01, urgency band [1.0, 3.0],
//! rating band [1300, 1700], neutral rating 1500, calibration batches of at
//! most 3 new tasks plus 2 anchors.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable engine constants.
///
/// Serialized to/from TOML so a caller can keep overrides in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Two importance scores within this distance count as tied.
    #[serde(default = "default_tie_epsilon")]
    pub tie_epsilon: f64,
    /// Urgency assigned to tasks without a due date.
    #[serde(default = "default_urgency_floor")]
    pub urgency_floor: f64,
    /// Urgency assigned to the earliest due date in the scored set.
    #[serde(default = "default_urgency_ceiling")]
    pub urgency_ceiling: f64,
    /// Lower interpolation bound when a tier has no rated anchors.
    #[serde(default = "default_rating_band_bottom")]
    pub rating_band_bottom: f64,
    /// Upper interpolation bound when a tier has no rated anchors.
    #[serde(default = "default_rating_band_top")]
    pub rating_band_top: f64,
    /// Rating carried by tasks that have never been compared.
    #[serde(default = "default_rating")]
    pub default_rating: f64,
    /// How many never-ranked tasks a calibration batch samples.
    #[serde(default = "default_calibration_new_limit")]
    pub calibration_new_limit: usize,
    /// Hard cap on calibration batch size (new tasks plus anchors).
    #[serde(default = "default_calibration_batch_limit")]
    pub calibration_batch_limit: usize,
}

fn default_tie_epsilon() -> f64 {
    EngineConfig::DEFAULT_TIE_EPSILON
}
fn default_urgency_floor() -> f64 {
    EngineConfig::DEFAULT_URGENCY_FLOOR
}
fn default_urgency_ceiling() -> f64 {
    EngineConfig::DEFAULT_URGENCY_CEILING
}
fn default_rating_band_bottom() -> f64 {
    EngineConfig::DEFAULT_RATING_BAND_BOTTOM
}
fn default_rating_band_top() -> f64 {
    EngineConfig::DEFAULT_RATING_BAND_TOP
}
fn default_rating() -> f64 {
    EngineConfig::DEFAULT_RATING
}
fn default_calibration_new_limit() -> usize {
    EngineConfig::DEFAULT_CALIBRATION_NEW_LIMIT
}
fn default_calibration_batch_limit() -> usize {
    EngineConfig::DEFAULT_CALIBRATION_BATCH_LIMIT
}

impl EngineConfig {
    /// Default tie tolerance between importance scores.
    pub const DEFAULT_TIE_EPSILON: f64 = 0.01;
    /// Default urgency floor (no due date).
    pub const DEFAULT_URGENCY_FLOOR: f64 = 1.0;
    /// Default urgency ceiling (earliest due date).
    pub const DEFAULT_URGENCY_CEILING: f64 = 3.0;
    /// Default lower rating bound for calibration without anchors.
    pub const DEFAULT_RATING_BAND_BOTTOM: f64 = 1300.0;
    /// Default upper rating bound for calibration without anchors.
    pub const DEFAULT_RATING_BAND_TOP: f64 = 1700.0;
    /// Neutral rating for never-compared tasks.
    pub const DEFAULT_RATING: f64 = 1500.0;
    /// Default sample size of new tasks per calibration batch.
    pub const DEFAULT_CALIBRATION_NEW_LIMIT: usize = 3;
    /// Default calibration batch cap (3 new + 2 anchors).
    pub const DEFAULT_CALIBRATION_BATCH_LIMIT: usize = 5;

    /// Parse a configuration from a TOML string.
    ///
    /// Missing keys fall back to their defaults; the result is validated.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            toml::from_str(s).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Check internal consistency of the thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tie_epsilon.is_finite() || self.tie_epsilon < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "tie_epsilon".to_string(),
                message: format!("must be finite and >= 0, got {}", self.tie_epsilon),
            });
        }
        if !(self.urgency_floor.is_finite() && self.urgency_ceiling.is_finite())
            || self.urgency_floor >= self.urgency_ceiling
        {
            return Err(ConfigError::InvalidValue {
                key: "urgency_floor/urgency_ceiling".to_string(),
                message: format!(
                    "floor must be below ceiling, got {} / {}",
                    self.urgency_floor, self.urgency_ceiling
                ),
            });
        }
        if !(self.rating_band_bottom.is_finite() && self.rating_band_top.is_finite())
            || self.rating_band_bottom >= self.rating_band_top
        {
            return Err(ConfigError::InvalidValue {
                key: "rating_band_bottom/rating_band_top".to_string(),
                message: format!(
                    "bottom must be below top, got {} / {}",
                    self.rating_band_bottom, self.rating_band_top
                ),
            });
        }
        if !self.default_rating.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "default_rating".to_string(),
                message: "must be finite".to_string(),
            });
        }
        if self.calibration_new_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "calibration_new_limit".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        // Two anchor slots on top of the sampled new tasks.
        if self.calibration_batch_limit < self.calibration_new_limit + 2 {
            return Err(ConfigError::InvalidValue {
                key: "calibration_batch_limit".to_string(),
                message: format!(
                    "must be at least calibration_new_limit + 2, got {}",
                    self.calibration_batch_limit
                ),
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tie_epsilon: Self::DEFAULT_TIE_EPSILON,
            urgency_floor: Self::DEFAULT_URGENCY_FLOOR,
            urgency_ceiling: Self::DEFAULT_URGENCY_CEILING,
            rating_band_bottom: Self::DEFAULT_RATING_BAND_BOTTOM,
            rating_band_top: Self::DEFAULT_RATING_BAND_TOP,
            default_rating: Self::DEFAULT_RATING,
            calibration_new_limit: Self::DEFAULT_CALIBRATION_NEW_LIMIT,
            calibration_batch_limit: Self::DEFAULT_CALIBRATION_BATCH_LIMIT,
        }
    }
}

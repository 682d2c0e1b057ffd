//! Engine configuration.
//!
//! Every field has a default, so a config file only needs the values it changes:
//!
//! ```json
//! { "initial_drop_ms": 800, "randomizer": "bag", "seed": 42 }
//! ```

use serde::{Deserialize, Serialize};

use blockfall_core::{
    BagRandomizer, PieceSource, ProgressionParams, UniformRandomizer,
};
use blockfall_types::{
    CASCADE_SETTLE_MS, DROP_INTERVAL_MIN_MS, INITIAL_DROP_MS, LINE_CLEAR_HOLD_MS,
    POINTS_PER_LEVEL, SPEED_FACTOR,
};

/// Which piece source a new engine builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RandomizerKind {
    #[default]
    Uniform,
    Bag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub initial_drop_ms: u32,
    pub speed_factor: f64,
    pub points_per_level: u32,
    pub min_drop_interval_ms: u32,
    pub line_clear_hold_ms: u32,
    pub cascade_settle_ms: u32,
    pub randomizer: RandomizerKind,
    /// Fixed seed for reproducible games; `None` picks one from the clock.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_drop_ms: INITIAL_DROP_MS,
            speed_factor: SPEED_FACTOR,
            points_per_level: POINTS_PER_LEVEL,
            min_drop_interval_ms: DROP_INTERVAL_MIN_MS,
            line_clear_hold_ms: LINE_CLEAR_HOLD_MS,
            cascade_settle_ms: CASCADE_SETTLE_MS,
            randomizer: RandomizerKind::Uniform,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroDropInterval,
    ZeroMinDropInterval,
    BadSpeedFactor,
    ZeroPointsPerLevel,
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::ZeroDropInterval => "initial_drop_ms",
            ConfigError::ZeroMinDropInterval => "min_drop_interval_ms",
            ConfigError::BadSpeedFactor => "speed_factor",
            ConfigError::ZeroPointsPerLevel => "points_per_level",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::ZeroDropInterval => "initial drop interval must be at least 1ms",
            ConfigError::ZeroMinDropInterval => "minimum drop interval must be at least 1ms",
            ConfigError::BadSpeedFactor => "speed factor must be finite and in (0, 1]",
            ConfigError::ZeroPointsPerLevel => "points per level must be positive",
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ConfigError {}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_drop_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        if self.min_drop_interval_ms == 0 {
            return Err(ConfigError::ZeroMinDropInterval);
        }
        if !self.speed_factor.is_finite() || self.speed_factor <= 0.0 || self.speed_factor > 1.0
        {
            return Err(ConfigError::BadSpeedFactor);
        }
        if self.points_per_level == 0 {
            return Err(ConfigError::ZeroPointsPerLevel);
        }
        Ok(())
    }

    pub fn progression(&self) -> ProgressionParams {
        ProgressionParams {
            initial_drop_ms: self.initial_drop_ms,
            speed_factor: self.speed_factor,
            points_per_level: self.points_per_level,
            min_drop_interval_ms: self.min_drop_interval_ms,
        }
    }

    /// Build the configured piece source.
    pub fn piece_source(&self) -> Box<dyn PieceSource> {
        let seed = self.seed.unwrap_or_else(clock_seed);
        match self.randomizer {
            RandomizerKind::Uniform => Box::new(UniformRandomizer::new(seed)),
            RandomizerKind::Bag => Box::new(BagRandomizer::new(seed)),
        }
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: EngineConfig =
            serde_json::from_str(r#"{ "seed": 9, "randomizer": "bag" }"#).unwrap();
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.randomizer, RandomizerKind::Bag);
        assert_eq!(cfg.initial_drop_ms, INITIAL_DROP_MS);
        assert_eq!(cfg.line_clear_hold_ms, LINE_CLEAR_HOLD_MS);
    }

    #[test]
    fn rejects_bad_values() {
        let cfg = EngineConfig {
            speed_factor: 1.5,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::BadSpeedFactor));

        let cfg = EngineConfig {
            initial_drop_ms: 0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroDropInterval));

        let cfg = EngineConfig {
            points_per_level: 0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate().unwrap_err().code(), "points_per_level");
    }
}

// Engine configuration.
//
// Tunables that are not musical constants live in `EngineConfig`, loaded
// from JSON once at startup and handed to `PatternEngine::new`. The
// per-step path only reads it. Missing fields fall back to the built-in
// defaults, so a config file only needs the values it overrides.
//
// See also: `engine.rs` which owns the config, `error.rs` for the failure
// modes of `load` and `validate`.

use crate::archetype::DEFAULT_SOFTMAX_TEMPERATURE;
use crate::error::{PulseError, PulseResult};
use crate::hat_burst::DEFAULT_PROXIMITY_WINDOW;
use crate::types::MAX_STEPS;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sharpness of the archetype blend. Low values snap to the nearest
    /// archetype, high values average all four neighbours.
    pub softmax_temperature: f32,

    /// Steps on either side of an anchor hit where hat-burst triggers duck.
    pub proximity_window: i32,

    /// Shimmer hits per anchor hit before the shape correction.
    pub shimmer_ratio: f32,

    /// Apply the per-zone minimum spacing to anchor selection. With this off
    /// hits may cluster at any energy.
    pub min_spacing: bool,

    /// Pattern length used when the controls don't name one.
    pub default_pattern_length: i32,

    /// Bars per phrase. Drives phrase progress in the CLI and the
    /// integration tests.
    pub phrase_length_bars: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            softmax_temperature: DEFAULT_SOFTMAX_TEMPERATURE,
            proximity_window: DEFAULT_PROXIMITY_WINDOW,
            shimmer_ratio: 0.75,
            min_spacing: true,
            default_pattern_length: 16,
            phrase_length_bars: 4,
        }
    }
}

impl EngineConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> PulseResult<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> PulseResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PulseResult<()> {
        let reject = |field: &'static str, reason: String| {
            warn!("rejecting config: {field}: {reason}");
            Err(PulseError::InvalidConfig { field, reason })
        };

        if !(self.softmax_temperature.is_finite() && self.softmax_temperature > 0.0) {
            return reject(
                "softmax_temperature",
                format!("must be positive, got {}", self.softmax_temperature),
            );
        }
        if self.proximity_window < 0 {
            return reject(
                "proximity_window",
                format!("must not be negative, got {}", self.proximity_window),
            );
        }
        if !(self.shimmer_ratio.is_finite() && self.shimmer_ratio >= 0.0) {
            return reject(
                "shimmer_ratio",
                format!("must not be negative, got {}", self.shimmer_ratio),
            );
        }
        if !(1..=MAX_STEPS as i32).contains(&self.default_pattern_length) {
            return reject(
                "default_pattern_length",
                format!("must be in 1..={MAX_STEPS}, got {}", self.default_pattern_length),
            );
        }
        if self.phrase_length_bars == 0 {
            return reject("phrase_length_bars", "must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn default_config_serializes() {
        let config = EngineConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{ "shimmer_ratio": 1.25 }"#).unwrap();
        assert_eq!(config.shimmer_ratio, 1.25);
        assert_eq!(config.default_pattern_length, 16);
        assert!(config.min_spacing);
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            (r#"{ "softmax_temperature": 0.0 }"#, "softmax_temperature"),
            (r#"{ "proximity_window": -1 }"#, "proximity_window"),
            (r#"{ "default_pattern_length": 33 }"#, "default_pattern_length"),
            (r#"{ "default_pattern_length": 0 }"#, "default_pattern_length"),
            (r#"{ "phrase_length_bars": 0 }"#, "phrase_length_bars"),
            (r#"{ "shimmer_ratio": -0.5 }"#, "shimmer_ratio"),
        ];
        for (json, expected) in cases {
            match EngineConfig::from_json(json) {
                Err(PulseError::InvalidConfig { field, .. }) => {
                    assert_eq!(field, expected, "wrong field for {json}")
                }
                other => panic!("{json} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            EngineConfig::from_json("{ not json"),
            Err(PulseError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = EngineConfig::load(Path::new("/nonexistent/duopulse.json"));
        assert!(matches!(result, Err(PulseError::Io(_))));
    }
}

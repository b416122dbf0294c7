use crate::camera::RECT_INSET;
use crate::core_modules::color::SortColor;
use crate::core_modules::color_classifier::ColorThresholds;
use crate::core_modules::conveyor::ConveyorConfig;
use crate::core_modules::gate_actuator::GateConfig;
use crate::error::SorterError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for the sorter, allowing for tunable behavior.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SorterConfig {
    /// Width of synthetic camera frames in pixels.
    pub frame_width: u32,
    /// Height of synthetic camera frames in pixels.
    pub frame_height: u32,
    /// Wall-clock time between ticks when driven by the runner.
    pub tick_interval_ms: u64,
    /// Chance, per tick, that a new object is placed on the belt.
    pub spawn_probability: f64,
    /// The color the sorter picks out until told otherwise.
    pub initial_target: SortColor,
    pub conveyor: ConveyorConfig,
    pub gate: GateConfig,
    pub thresholds: ColorThresholds,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            frame_width: 400,
            frame_height: 300,
            tick_interval_ms: 30,
            spawn_probability: 0.03,
            initial_target: SortColor::Red,
            conveyor: ConveyorConfig::default(),
            gate: GateConfig::default(),
            thresholds: ColorThresholds::default(),
        }
    }
}

impl SorterConfig {
    /// Loads a JSON config from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SorterError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).map_err(|e| SorterError::ConfigRead(e, path.to_path_buf()))?;
        let config = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, SorterError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SorterError> {
        let min_side = 2 * RECT_INSET;
        if self.frame_width <= min_side || self.frame_height <= min_side {
            return Err(SorterError::InvalidConfig(format!(
                "frame must be larger than {min_side}x{min_side}, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }
        if !(self.conveyor.belt_speed > 0.0) {
            return Err(SorterError::InvalidConfig(format!(
                "conveyor.belt_speed must be positive, got {}",
                self.conveyor.belt_speed
            )));
        }
        if !(self.conveyor.travel_limit > 0.0) {
            return Err(SorterError::InvalidConfig(format!(
                "conveyor.travel_limit must be positive, got {}",
                self.conveyor.travel_limit
            )));
        }
        if !(self.gate.step > 0.0 && self.gate.step <= 1.0) {
            return Err(SorterError::InvalidConfig(format!(
                "gate.step must be in (0, 1], got {}",
                self.gate.step
            )));
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(SorterError::InvalidConfig(format!(
                "spawn_probability must be in [0, 1], got {}",
                self.spawn_probability
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = SorterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.conveyor.belt_speed, 0.5);
        assert_eq!(config.conveyor.travel_limit, 100.0);
        assert_eq!(config.gate.step, 0.1);
        assert_eq!(config.initial_target, SortColor::Red);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = SorterConfig::from_json(
            r#"{ "initial_target": "blue", "conveyor": { "belt_speed": 2.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.initial_target, SortColor::Blue);
        assert_eq!(config.conveyor.belt_speed, 2.0);
        assert_eq!(config.conveyor.travel_limit, 100.0);
        assert_eq!(config.thresholds, ColorThresholds::default());
    }

    #[test]
    fn rejects_out_of_range_values() {
        for json in [
            r#"{ "gate": { "step": 0.0 } }"#,
            r#"{ "gate": { "step": 1.5 } }"#,
            r#"{ "spawn_probability": -0.1 }"#,
            r#"{ "conveyor": { "travel_limit": 0.0 } }"#,
            r#"{ "frame_width": 80 }"#,
        ] {
            assert!(
                matches!(SorterConfig::from_json(json), Err(SorterError::InvalidConfig(_))),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_unknown_target_color() {
        let result = SorterConfig::from_json(r#"{ "initial_target": "unknown" }"#);
        assert!(matches!(result, Err(SorterError::ConfigParse(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SorterConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, SorterConfig::default());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tick_interval_ms": 5, "spawn_probability": 1.0 }}"#).unwrap();
        let config = SorterConfig::load(file.path()).unwrap();
        assert_eq!(config.tick_interval_ms, 5);
        assert_eq!(config.spawn_probability, 1.0);
    }
}

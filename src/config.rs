use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Movement tuning constants.
///
/// Speeds, rates and forces are per second and get multiplied by the tick's
/// elapsed time where they are used. Heights and distances are world units.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub walk_speed: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub jump_impulse_rate: f32,
    pub jump_height_cap: f32,
    pub wall_slide_speed: f32,
    pub wall_jump_force_h: f32,
    /// Horizontal travel from the wall before the wall jump folds back
    pub wall_jump_limit_h: f32,
    pub wall_jump_force_v: f32,
    pub double_jump_cap: u32,
    pub double_jump_dip: f32,
    pub double_jump_lift_rate: f32,
    pub double_jump_height_cap: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 4.0,
            gravity: 24.0,
            max_fall_speed: 8.0,
            jump_impulse_rate: 8.0,
            jump_height_cap: 2.5,
            wall_slide_speed: 2.0,
            wall_jump_force_h: 2.0,
            wall_jump_limit_h: 2.0,
            wall_jump_force_v: 2.0,
            double_jump_cap: 1,
            double_jump_dip: 0.25,
            double_jump_lift_rate: 8.0,
            double_jump_height_cap: 1.5,
        }
    }
}

impl MovementConfig {
    fn magnitudes(&self) -> [(&'static str, f32); 12] {
        [
            ("walk_speed", self.walk_speed),
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("jump_impulse_rate", self.jump_impulse_rate),
            ("jump_height_cap", self.jump_height_cap),
            ("wall_slide_speed", self.wall_slide_speed),
            ("wall_jump_force_h", self.wall_jump_force_h),
            ("wall_jump_limit_h", self.wall_jump_limit_h),
            ("wall_jump_force_v", self.wall_jump_force_v),
            ("double_jump_dip", self.double_jump_dip),
            ("double_jump_lift_rate", self.double_jump_lift_rate),
            ("double_jump_height_cap", self.double_jump_height_cap),
        ]
    }
}

/// Load movement tuning from a JSON file. Missing fields keep their defaults.
pub fn load_config_from_file(path: &str) -> Result<MovementConfig, ConfigLoadError> {
    if !Path::new(path).exists() {
        return Err(ConfigLoadError::FileNotFound(path.to_string()));
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| ConfigLoadError::IoError(path.to_string(), e.to_string()))?;

    let config: MovementConfig = serde_json::from_str(&contents)
        .map_err(|e| ConfigLoadError::ParseError(path.to_string(), e.to_string()))?;

    validate_config(&config)?;

    Ok(config)
}

/// Every magnitude must be finite and non-negative
pub fn validate_config(config: &MovementConfig) -> Result<(), ConfigLoadError> {
    for (name, value) in config.magnitudes() {
        if !value.is_finite() {
            return Err(ConfigLoadError::ValidationError(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
        if value < 0.0 {
            return Err(ConfigLoadError::ValidationError(format!(
                "{} must not be negative, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

/// Config loading errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigLoadError {
    FileNotFound(String),
    IoError(String, String),
    ParseError(String, String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigLoadError::IoError(path, err) => {
                write!(f, "IO error reading config file {}: {}", path, err)
            }
            ConfigLoadError::ParseError(path, err) => {
                write!(f, "Failed to parse config file {}: {}", path, err)
            }
            ConfigLoadError::ValidationError(msg) => write!(f, "Config validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigLoadError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&MovementConfig::default()).is_ok());
    }

    #[test]
    fn test_load_config_from_file_success() {
        let mut config = MovementConfig::default();
        config.walk_speed = 6.5;
        config.double_jump_cap = 2;
        let json = serde_json::to_string_pretty(&config).unwrap();
        let temp_file = write_temp(&json);

        let loaded = load_config_from_file(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_config_partial_fields_use_defaults() {
        let temp_file = write_temp(r#"{"walk_speed": 10.0}"#);

        let loaded = load_config_from_file(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(loaded.walk_speed, 10.0);
        assert_eq!(loaded.gravity, MovementConfig::default().gravity);
        assert_eq!(loaded.double_jump_cap, 1);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_from_file("nonexistent_movement.json");
        assert!(matches!(result, Err(ConfigLoadError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_invalid_json() {
        let temp_file = write_temp("{ not json");
        let result = load_config_from_file(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(ConfigLoadError::ParseError(_, _))));
    }

    #[test]
    fn test_load_config_negative_cap_rejected_by_parser() {
        let temp_file = write_temp(r#"{"double_jump_cap": -1}"#);
        let result = load_config_from_file(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(ConfigLoadError::ParseError(_, _))));
    }

    #[test]
    fn test_load_config_negative_magnitude() {
        let temp_file = write_temp(r#"{"gravity": -9.8}"#);
        let result = load_config_from_file(temp_file.path().to_str().unwrap());
        match result {
            Err(ConfigLoadError::ValidationError(msg)) => assert!(msg.contains("gravity")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let config = MovementConfig {
            max_fall_speed: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigLoadError::ValidationError(_))
        ));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigLoadError::FileNotFound("movement.json".to_string());
        assert_eq!(err.to_string(), "Config file not found: movement.json");
    }
}

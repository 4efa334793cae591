//! Validation for loaded gameplay configuration.

use super::data::{GAMEPLAY_SCHEMA_VERSION, GameplayConfig};
use crate::movement::SensorProbe;

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub section: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.section, self.message)
    }
}

fn check_probe(errors: &mut Vec<ValidationError>, section: &'static str, probe: &SensorProbe) {
    if !probe.offset.iter().all(|v| v.is_finite()) {
        errors.push(ValidationError {
            section,
            message: format!("offset {:?} is not finite", probe.offset),
        });
    }
    if !probe.max_distance.is_finite() || probe.max_distance <= 0.0 {
        errors.push(ValidationError {
            section,
            message: format!("max_distance {} must be positive", probe.max_distance),
        });
    }
}

/// Validate a gameplay configuration.
/// Returns a list of validation errors, empty if the configuration is usable.
pub fn validate_gameplay_config(config: &GameplayConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.schema_version != GAMEPLAY_SCHEMA_VERSION {
        errors.push(ValidationError {
            section: "schema",
            message: format!(
                "schema_version {} is not supported (expected {})",
                config.schema_version, GAMEPLAY_SCHEMA_VERSION
            ),
        });
    }

    if let Err(e) = config.movement.validate() {
        errors.push(ValidationError {
            section: "movement",
            message: e.to_string(),
        });
    }

    check_probe(&mut errors, "sensors.ground", &config.sensors.ground);
    check_probe(&mut errors, "sensors.wall", &config.sensors.wall);

    errors
}

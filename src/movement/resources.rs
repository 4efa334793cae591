//! Movement domain: tuning resources for locomotion.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::SensorProbe;

/// Tunable parameters for the player's motion state machine.
///
/// Loaded from `gameplay.ron`; missing fields fall back to [`Default`].
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Acceleration applied along the move input while walking.
    pub walk_force: f32,
    /// Horizontal velocity bled off per second.
    pub drag: f32,
    /// Slerp rate used to turn the body toward the move input.
    pub rotation_speed: f32,
    /// Vertical velocity set by a jump (absolute, not additive).
    pub jump_force: f32,
    /// Vertical speed while climbing at full input.
    pub climb_speed: f32,
    /// Grace window after leaving the ground during which a jump is honored.
    pub coyote_time: f32,
    /// Window during which an early jump press is remembered.
    pub jump_buffer_time: f32,
    pub dash_distance: f32,
    /// Peak of the dash arc, reached halfway through the dash.
    pub dash_height: f32,
    pub dash_duration: f32,
    /// Move input magnitudes at or below this are treated as zero.
    pub move_dead_zone: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            walk_force: 45.0,
            drag: 6.0,
            rotation_speed: 12.0,
            jump_force: 7.5,
            climb_speed: 3.0,
            coyote_time: 0.15,
            jump_buffer_time: 0.15,
            dash_distance: 5.0,
            dash_height: 1.2,
            dash_duration: 0.25,
            move_dead_zone: 0.1,
        }
    }
}

/// Rejected tuning value.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningError {
    pub field: &'static str,
    pub value: f32,
    pub reason: &'static str,
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "movement tuning field '{}' = {} {}",
            self.field, self.value, self.reason
        )
    }
}

impl std::error::Error for TuningError {}

impl MovementTuning {
    /// Check every field; the first invalid one is reported.
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("walk_force", self.walk_force),
            ("drag", self.drag),
            ("rotation_speed", self.rotation_speed),
            ("jump_force", self.jump_force),
            ("climb_speed", self.climb_speed),
            ("coyote_time", self.coyote_time),
            ("jump_buffer_time", self.jump_buffer_time),
            ("dash_distance", self.dash_distance),
            ("dash_height", self.dash_height),
            ("dash_duration", self.dash_duration),
            ("move_dead_zone", self.move_dead_zone),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(TuningError {
                    field,
                    value,
                    reason: "is not finite",
                });
            }
            if value < 0.0 {
                return Err(TuningError {
                    field,
                    value,
                    reason: "must not be negative",
                });
            }
        }

        if self.dash_duration <= 0.0 {
            return Err(TuningError {
                field: "dash_duration",
                value: self.dash_duration,
                reason: "must be greater than zero",
            });
        }

        if self.move_dead_zone >= 1.0 {
            return Err(TuningError {
                field: "move_dead_zone",
                value: self.move_dead_zone,
                reason: "must be below 1.0",
            });
        }

        Ok(())
    }

    /// Apex height of a jump from rest under the given gravity magnitude.
    /// Uses h = v² / (2g).
    pub fn jump_height(&self, gravity: f32) -> f32 {
        self.jump_force * self.jump_force / (2.0 * gravity)
    }
}

/// Placement of the player's ground and wall probes.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SensorLayout {
    pub ground: SensorProbe,
    pub wall: SensorProbe,
}

impl Default for SensorLayout {
    fn default() -> Self {
        Self {
            // Just inside the bottom of the capsule, reaching a little past the feet.
            ground: SensorProbe {
                offset: [0.0, -0.85, 0.0],
                max_distance: 0.2,
            },
            // Chest height, reaching past the capsule radius.
            wall: SensorProbe {
                offset: [0.0, 0.2, 0.0],
                max_distance: 0.6,
            },
        }
    }
}

//! Data definitions for gameplay configuration files.
//!
//! These structs mirror the structure in assets/data/gameplay.ron.

use serde::{Deserialize, Serialize};

use crate::movement::{MovementTuning, SensorLayout};

/// Schema version this build understands.
pub const GAMEPLAY_SCHEMA_VERSION: u32 = 1;

// ============================================================================
// Gameplay configuration (gameplay.ron)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GameplayConfig {
    pub schema_version: u32,
    #[serde(default)]
    pub movement: MovementTuning,
    #[serde(default)]
    pub sensors: SensorLayout,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            schema_version: GAMEPLAY_SCHEMA_VERSION,
            movement: MovementTuning::default(),
            sensors: SensorLayout::default(),
        }
    }
}

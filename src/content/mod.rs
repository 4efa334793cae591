//! Content domain: gameplay configuration loaded from RON at startup.

mod data;
mod loader;
mod validation;

pub use data::{GAMEPLAY_SCHEMA_VERSION, GameplayConfig};
pub use loader::{ContentLoadError, load_gameplay_config, parse_gameplay_config};
pub use validation::{ValidationError, validate_gameplay_config};

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use std::path::PathBuf;

/// Default location of the gameplay configuration, relative to the working directory.
pub const DEFAULT_GAMEPLAY_CONFIG: &str = "assets/data/gameplay.ron";

/// Validation outcome for the configuration in use.
#[derive(Resource, Debug, Default)]
pub struct ConfigValidation {
    pub errors: Vec<ValidationError>,
}

pub struct ContentPlugin {
    pub config_path: PathBuf,
}

impl Default for ContentPlugin {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_GAMEPLAY_CONFIG),
        }
    }
}

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        let config = match load_gameplay_config(&self.config_path) {
            Ok(config) => {
                info!("Loaded gameplay config from {}", self.config_path.display());
                config
            }
            Err(e) => {
                warn!("{}; using default gameplay config", e);
                GameplayConfig::default()
            }
        };

        let errors = validate_gameplay_config(&config);
        for e in &errors {
            error!("Gameplay config invalid: {}", e);
        }

        app.insert_resource(config.movement)
            .insert_resource(config.sensors)
            .insert_resource(ConfigValidation { errors })
            .add_systems(PreStartup, halt_on_invalid_config);
    }
}

/// Run condition: true unless the loaded configuration was rejected.
///
/// Apps without the content plugin have no `ConfigValidation` and run on defaults.
pub fn config_is_valid(validation: Option<Res<ConfigValidation>>) -> bool {
    validation.is_none_or(|v| v.errors.is_empty())
}

/// Invalid configuration is fatal: stop before the first tick.
fn halt_on_invalid_config(validation: Res<ConfigValidation>, mut exit: MessageWriter<AppExit>) {
    if !validation.errors.is_empty() {
        error!(
            "Refusing to start with {} configuration error(s)",
            validation.errors.len()
        );
        exit.write(AppExit::error());
    }
}

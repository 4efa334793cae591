//! Movement domain: sensors, input signals, and the player's motion state machine.

mod body;
mod bootstrap;
mod components;
mod controller;
mod dash;
#[cfg(feature = "dev-tools")]
mod dev;
mod resources;
mod sensors;
mod signals;
mod systems;
#[cfg(test)]
mod tests;

pub use body::{DEFAULT_GRAVITY_SCALE, ForceMode, MotionBody, PhysicsBody};
pub use components::{GameLayer, Ground, Player, Wall};
pub use controller::{MotionState, facing_rotation};
pub use dash::{DashStep, DashTrajectory};
pub use resources::{MovementTuning, SensorLayout, TuningError};
pub use sensors::{
    ContactEdge, ContactEvent, ContactSensor, ContactState, RayCaster, SensorKind, SensorProbe,
};
pub use signals::{DashSignal, JumpSignal, LookSignal, MoveSignal};

use bevy::prelude::*;

use crate::content::config_is_valid;
use crate::movement::systems::{
    apply_contact_events, apply_input_signals, integrate_motion, read_input,
    sample_contact_sensors, validate_player_bodies,
};

/// Ordering of the per-tick movement pipeline.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovementSet {
    /// Input polling (Update).
    Input,
    /// Sensor ray casts (FixedUpdate).
    Sense,
    /// Event routing and integration (FixedUpdate), after `Sense`.
    Simulate,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<SensorLayout>()
            // A rejected config stops the app; never spawn a body with its values.
            .add_systems(Startup, bootstrap::spawn_player.run_if(config_is_valid))
            .add_systems(PostStartup, validate_player_bodies)
            .add_systems(Update, read_input.in_set(MovementSet::Input))
            .add_systems(
                FixedUpdate,
                sample_contact_sensors.in_set(MovementSet::Sense),
            );
        add_motion_pipeline(app);

        #[cfg(feature = "dev-tools")]
        app.add_systems(Startup, dev::spawn_test_room);
    }
}

/// Messages and the per-tick controller chain, without sensing or input devices.
pub(crate) fn add_motion_pipeline(app: &mut App) {
    app.add_message::<ContactEvent>()
        .add_message::<MoveSignal>()
        .add_message::<LookSignal>()
        .add_message::<JumpSignal>()
        .add_message::<DashSignal>()
        .configure_sets(
            FixedUpdate,
            (MovementSet::Sense, MovementSet::Simulate).chain(),
        )
        // Contact state must be current before the controller reads input.
        .add_systems(
            FixedUpdate,
            (apply_contact_events, apply_input_signals, integrate_motion)
                .chain()
                .in_set(MovementSet::Simulate),
        );
}

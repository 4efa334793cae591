//! Core domain: fixed timestep, scene setup, and the follow camera.

mod resources;
mod systems;

pub use resources::{CameraRig, PHYSICS_TICK_HZ};

use bevy::prelude::*;

use crate::core::systems::{follow_player, setup_camera, setup_lighting};
use crate::movement::MovementSet;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(PHYSICS_TICK_HZ))
            .insert_resource(ClearColor(Color::srgb(0.55, 0.7, 0.85)))
            .add_systems(Startup, (setup_camera, setup_lighting))
            .add_systems(Update, follow_player.after(MovementSet::Input));
    }
}

//! Movement domain: player bootstrap from loaded gameplay configuration.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    ContactSensor, DEFAULT_GRAVITY_SCALE, GameLayer, MotionState, MovementTuning, Player,
    SensorLayout,
};

const PLAYER_RADIUS: f32 = 0.4;
const PLAYER_LENGTH: f32 = 1.0;

/// Spawn the player body with its ground and wall sensors as children.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    layout: Res<SensorLayout>,
    gravity: Res<Gravity>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    info!(
        "Spawning player: jump_force={}, apex={:.2}m, coyote={}s, buffer={}s, dash={}m over {}s",
        tuning.jump_force,
        tuning.jump_height(gravity.0.length()),
        tuning.coyote_time,
        tuning.jump_buffer_time,
        tuning.dash_distance,
        tuning.dash_duration
    );

    commands
        .spawn((
            // Identity & Movement
            (Player, MotionState::default()),
            // Rendering
            Mesh3d(meshes.add(Capsule3d::new(PLAYER_RADIUS, PLAYER_LENGTH))),
            MeshMaterial3d(materials.add(Color::srgb(0.9, 0.85, 0.8))),
            Transform::from_xyz(0.0, 2.0, 0.0),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::capsule(PLAYER_RADIUS, PLAYER_LENGTH),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(DEFAULT_GRAVITY_SCALE),
                Friction::new(0.0),
                CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Wall]),
            ),
        ))
        .with_children(|parent| {
            parent.spawn((
                ContactSensor::ground(layout.ground.max_distance),
                layout.ground.local_transform(),
            ));
            parent.spawn((
                ContactSensor::wall(layout.wall.max_distance),
                layout.wall.local_transform(),
            ));
        });
}

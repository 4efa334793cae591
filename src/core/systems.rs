//! Core domain: scene setup and camera follow.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::resources::CameraRig;
use crate::movement::{LookSignal, Player};

pub(crate) fn setup_camera(mut commands: Commands) {
    let rig = CameraRig::default();
    let focus = Vec3::new(0.0, 2.0, 0.0);
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(rig.eye(focus)).looking_at(focus, Vec3::Y),
        rig,
    ));
}

pub(crate) fn setup_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

pub(crate) fn follow_player(
    mut look_signals: MessageReader<LookSignal>,
    players: Query<&Transform, With<Player>>,
    mut cameras: Query<(&mut Transform, &mut CameraRig), Without<Player>>,
) {
    let look: Vec2 = look_signals.read().map(|&LookSignal(delta)| delta).sum();

    let Some(player) = players.iter().next() else {
        return;
    };
    let focus = player.translation + Vec3::Y * 0.5;

    for (mut transform, mut rig) in &mut cameras {
        rig.apply_look(look);
        transform.translation = rig.eye(focus);
        transform.look_at(focus, Vec3::Y);
    }
}

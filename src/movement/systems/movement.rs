//! Movement domain: routing sensor and input events into the motion state machine.

use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::movement::{
    ContactEdge, ContactEvent, DashSignal, JumpSignal, MotionState, MoveSignal, MovementTuning,
    PhysicsBody, Player, SensorKind,
};

type PlayerBody = (
    &'static mut MotionState,
    &'static mut Transform,
    &'static mut LinearVelocity,
    &'static mut GravityScale,
);

pub(crate) fn apply_contact_events(
    tuning: Res<MovementTuning>,
    mut contact_events: MessageReader<ContactEvent>,
    mut players: Query<PlayerBody, With<Player>>,
) {
    for event in contact_events.read() {
        let Ok((mut state, mut transform, mut velocity, mut gravity)) = players.get_mut(event.body)
        else {
            continue;
        };
        let mut body = PhysicsBody {
            transform: &mut transform,
            velocity: &mut velocity,
            gravity: &mut gravity,
        };

        match (event.sensor, event.edge) {
            (SensorKind::Ground, ContactEdge::Enter) => state.on_ground_enter(&mut body, &tuning),
            (SensorKind::Ground, ContactEdge::Exit) => state.on_ground_exit(&tuning),
            (SensorKind::Wall, ContactEdge::Enter) => state.on_wall_enter(),
            (SensorKind::Wall, ContactEdge::Exit) => state.on_wall_exit(),
        }
    }
}

pub(crate) fn apply_input_signals(
    tuning: Res<MovementTuning>,
    mut move_signals: MessageReader<MoveSignal>,
    mut jump_signals: MessageReader<JumpSignal>,
    mut dash_signals: MessageReader<DashSignal>,
    mut players: Query<PlayerBody, With<Player>>,
) {
    let latest_move = move_signals.read().last().copied();
    let jumped = jump_signals.read().count() > 0;
    let dashed = dash_signals.read().count() > 0;

    for (mut state, mut transform, mut velocity, mut gravity) in &mut players {
        let mut body = PhysicsBody {
            transform: &mut transform,
            velocity: &mut velocity,
            gravity: &mut gravity,
        };

        if let Some(MoveSignal(axis)) = latest_move {
            state.on_move(axis);
        }
        if jumped {
            state.on_jump(&tuning);
        }
        if dashed {
            state.on_dash(&mut body);
        }
    }
}

pub(crate) fn integrate_motion(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut players: Query<PlayerBody, With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut state, mut transform, mut velocity, mut gravity) in &mut players {
        let mut body = PhysicsBody {
            transform: &mut transform,
            velocity: &mut velocity,
            gravity: &mut gravity,
        };
        state.tick(dt, &mut body, &tuning);
    }
}

/// Halt startup when a player has no rigid body to drive.
pub(crate) fn validate_player_bodies(
    players: Query<Entity, (With<Player>, Without<RigidBody>)>,
    mut exit: MessageWriter<AppExit>,
) {
    for entity in &players {
        error!("Player {entity} has no RigidBody; movement cannot run");
        exit.write(AppExit::error());
    }
}

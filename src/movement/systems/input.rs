//! Movement domain: input sampling into semantic signals.

use bevy::ecs::message::MessageWriter;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::movement::{DashSignal, JumpSignal, LookSignal, MoveSignal};

/// Last values published, so steady input does not re-fire.
#[derive(Debug, Default)]
pub(crate) struct PublishedInput {
    move_axis: Vec2,
    looking: bool,
}

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut published: Local<PublishedInput>,
    mut move_signals: MessageWriter<MoveSignal>,
    mut look_signals: MessageWriter<LookSignal>,
    mut jump_signals: MessageWriter<JumpSignal>,
    mut dash_signals: MessageWriter<DashSignal>,
) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Forward axis, also the climb axis
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    let axis = Vec2::new(x, y).normalize_or_zero();
    if axis != published.move_axis {
        published.move_axis = axis;
        move_signals.write(MoveSignal(axis));
    }

    let look = mouse_motion.delta;
    if look != Vec2::ZERO {
        published.looking = true;
        look_signals.write(LookSignal(look));
    } else if published.looking {
        published.looking = false;
        look_signals.write(LookSignal(Vec2::ZERO));
    }

    if keyboard.just_pressed(KeyCode::Space) {
        jump_signals.write(JumpSignal);
    }
    if keyboard.just_pressed(KeyCode::ShiftLeft) || mouse_buttons.just_pressed(MouseButton::Left) {
        dash_signals.write(DashSignal);
    }
}

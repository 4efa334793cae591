//! Movement domain: semantic input signals published by the input layer.
//!
//! Each signal is its own message type, so a system reads exactly the
//! channel it names.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Move axis changed. Fires with `Vec2::ZERO` when released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveSignal(pub Vec2);

impl Message for MoveSignal {}

/// Look delta for this frame. Fires with `Vec2::ZERO` once when motion stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookSignal(pub Vec2);

impl Message for LookSignal {}

/// Jump pressed (never fired on release).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpSignal;

impl Message for JumpSignal {}

/// Dash pressed (never fired on release).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashSignal;

impl Message for DashSignal {}

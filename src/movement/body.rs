//! Movement domain: rigid body command surface used by the motion state machine.

use avian3d::prelude::*;
use bevy::prelude::*;

/// Gravity scale restored whenever the controller re-enables gravity.
pub const DEFAULT_GRAVITY_SCALE: f32 = 1.0;

/// How a force is turned into a velocity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous acceleration, scaled by the tick length.
    Acceleration,
    /// Immediate velocity change, independent of the tick length.
    VelocityChange,
}

/// Commands the controller issues to the physics body it drives.
pub trait MotionBody {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    fn set_gravity_enabled(&mut self, enabled: bool);

    /// Facing direction (-Z in body space).
    fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    fn apply_force(&mut self, force: Vec3, mode: ForceMode, dt: f32) {
        let delta = match mode {
            ForceMode::Acceleration => force * dt,
            ForceMode::VelocityChange => force,
        };
        self.set_velocity(self.velocity() + delta);
    }
}

/// [`MotionBody`] over an avian rigid body's components.
pub struct PhysicsBody<'a> {
    pub transform: &'a mut Transform,
    pub velocity: &'a mut LinearVelocity,
    pub gravity: &'a mut GravityScale,
}

impl MotionBody for PhysicsBody<'_> {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn set_position(&mut self, position: Vec3) {
        self.transform.translation = position;
    }

    fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity.0 = velocity;
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity.0 = if enabled { DEFAULT_GRAVITY_SCALE } else { 0.0 };
    }
}

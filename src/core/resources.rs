//! Core domain: camera rig and simulation rate.

use bevy::prelude::*;

/// Fixed physics tick rate in Hz.
pub const PHYSICS_TICK_HZ: f64 = 60.0;

/// Third-person orbit camera around the player.
#[derive(Component, Debug, Clone)]
pub struct CameraRig {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    /// Radians per pixel of look input.
    pub sensitivity: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: -0.35,
            distance: 9.0,
            sensitivity: 0.003,
        }
    }
}

impl CameraRig {
    const MIN_PITCH: f32 = -1.3;
    const MAX_PITCH: f32 = 0.2;

    pub fn apply_look(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.sensitivity;
        self.pitch = (self.pitch - delta.y * self.sensitivity).clamp(Self::MIN_PITCH, Self::MAX_PITCH);
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Camera position for a given focus point.
    pub fn eye(&self, focus: Vec3) -> Vec3 {
        focus + self.orientation() * Vec3::new(0.0, 0.0, self.distance)
    }
}

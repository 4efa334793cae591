//! Movement domain: dash trajectory, resumed once per physics tick.

use bevy::prelude::*;

use crate::movement::MovementTuning;

/// Result of advancing a dash by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashStep {
    /// Dash still running; move the body here.
    Moving(Vec3),
    /// Dash complete; the body ends here.
    Finished(Vec3),
}

/// Parabolic hop along the facing direction captured at dash start.
#[derive(Debug, Clone, PartialEq)]
pub struct DashTrajectory {
    start: Vec3,
    forward: Vec3,
    elapsed: f32,
}

impl DashTrajectory {
    pub fn begin(start: Vec3, forward: Vec3) -> Self {
        let forward = forward.with_y(0.0).normalize_or(Vec3::NEG_Z);
        Self {
            start,
            forward,
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Vertical offset at progress `t`: 0 at both ends, `height` at `t = 0.5`.
    pub fn height_at(t: f32, height: f32) -> f32 {
        4.0 * height * t * (1.0 - t)
    }

    pub fn position_at(&self, t: f32, tuning: &MovementTuning) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        self.start
            + self.forward * tuning.dash_distance * t
            + Vec3::Y * Self::height_at(t, tuning.dash_height)
    }

    /// Advance by `dt` and sample the new progress.
    pub fn advance(&mut self, dt: f32, tuning: &MovementTuning) -> DashStep {
        self.elapsed += dt;
        if self.elapsed >= tuning.dash_duration {
            return DashStep::Finished(self.position_at(1.0, tuning));
        }

        DashStep::Moving(self.position_at(self.elapsed / tuning.dash_duration, tuning))
    }
}

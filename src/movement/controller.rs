//! Movement domain: the player's motion state machine.
//!
//! State is a set of orthogonal flags and timers rather than one enum:
//! - ground/air: `is_grounded`, `coyote_timer`
//! - wall/climb: `is_touching_wall`, `is_climbing` (always equal)
//! - jump request: `jump_buffer_timer`
//! - dash: `is_dashing` plus the in-flight [`DashTrajectory`]
//!
//! Sensor edges and input signals mutate the flags through the `on_*`
//! handlers; [`MotionState::tick`] integrates once per physics tick.

use bevy::prelude::*;

use crate::movement::MovementTuning;
use crate::movement::body::{ForceMode, MotionBody};
use crate::movement::dash::{DashStep, DashTrajectory};

#[derive(Component, Debug, Clone, Default)]
pub struct MotionState {
    pub move_input: Vec2,
    pub is_grounded: bool,
    pub is_touching_wall: bool,
    pub is_climbing: bool,
    pub is_dashing: bool,
    pub coyote_timer: f32,
    pub jump_buffer_timer: f32,
    /// Total jumps performed since spawn.
    pub jumps_performed: u32,
    dash: Option<DashTrajectory>,
    /// Set by a jump, cleared on landing. A take-off exit must not re-grant coyote time.
    jumped_since_landing: bool,
}

impl MotionState {
    #[cfg(test)]
    pub fn dash(&self) -> Option<&DashTrajectory> {
        self.dash.as_ref()
    }

    pub fn on_ground_enter(&mut self, body: &mut impl MotionBody, tuning: &MovementTuning) {
        self.is_grounded = true;
        self.jumped_since_landing = false;

        // A dash owns the body until it ends; the buffered jump waits for the next free tick.
        if self.jump_buffer_timer > 0.0 && !self.is_dashing {
            debug!("Landed with buffered jump");
            self.perform_jump(body, tuning);
            self.jump_buffer_timer = 0.0;
        }
    }

    pub fn on_ground_exit(&mut self, tuning: &MovementTuning) {
        self.is_grounded = false;
        if !self.jumped_since_landing {
            self.coyote_timer = tuning.coyote_time;
        }
    }

    pub fn on_wall_enter(&mut self) {
        self.is_touching_wall = true;
        self.is_climbing = true;
        debug!("Wall contact: climbing");
    }

    pub fn on_wall_exit(&mut self) {
        self.is_touching_wall = false;
        self.is_climbing = false;
        debug!("Wall contact lost: climbing stopped");
    }

    pub fn on_move(&mut self, axis: Vec2) {
        self.move_input = axis;
    }

    pub fn on_jump(&mut self, tuning: &MovementTuning) {
        self.jump_buffer_timer = tuning.jump_buffer_time;
    }

    /// Start a dash unless one is running or the body is climbing.
    pub fn on_dash(&mut self, body: &mut impl MotionBody) -> bool {
        if self.is_dashing || self.is_climbing {
            return false;
        }

        let trajectory = DashTrajectory::begin(body.position(), body.forward());
        debug!(
            "Dash started: from={:?} forward={:?}",
            body.position(),
            trajectory.forward()
        );
        self.dash = Some(trajectory);
        self.is_dashing = true;
        body.set_velocity(Vec3::ZERO);
        body.set_gravity_enabled(false);
        true
    }

    /// Integrate one physics tick of length `dt`.
    pub fn tick(&mut self, dt: f32, body: &mut impl MotionBody, tuning: &MovementTuning) {
        // Timers. Both stop at zero; only their sign is ever read.
        if !self.is_grounded {
            self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        }
        self.jump_buffer_timer = (self.jump_buffer_timer - dt).max(0.0);

        if let Some(dash) = self.dash.as_mut() {
            match dash.advance(dt, tuning) {
                DashStep::Moving(target) => body.set_position(target),
                DashStep::Finished(end) => {
                    body.set_position(end);
                    debug!("Dash finished at {:?} after {:.3}s", end, dash.elapsed());
                    self.dash = None;
                    self.is_dashing = false;
                }
            }
            return;
        }

        if self.is_climbing {
            body.set_gravity_enabled(false);
            body.set_velocity(Vec3::new(0.0, self.move_input.y * tuning.climb_speed, 0.0));
            return;
        }

        body.set_gravity_enabled(true);
        self.walk(dt, body, tuning);

        if self.jump_buffer_timer > 0.0 && (self.is_grounded || self.coyote_timer > 0.0) {
            self.perform_jump(body, tuning);
            self.jump_buffer_timer = 0.0;
        }
    }

    fn walk(&self, dt: f32, body: &mut impl MotionBody, tuning: &MovementTuning) {
        let direction = Vec3::new(self.move_input.x, 0.0, -self.move_input.y);

        if direction.length() > tuning.move_dead_zone {
            let target = facing_rotation(direction);
            let blend = (tuning.rotation_speed * dt).min(1.0);
            body.set_rotation(body.rotation().slerp(target, blend));
            body.apply_force(direction * tuning.walk_force, ForceMode::Acceleration, dt);
        }

        // Exponential-style horizontal deceleration, applied every tick.
        let velocity = body.velocity();
        let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
        let bleed = (tuning.drag * dt).min(1.0);
        body.apply_force(-horizontal * bleed, ForceMode::VelocityChange, dt);
    }

    fn perform_jump(&mut self, body: &mut impl MotionBody, tuning: &MovementTuning) {
        body.set_gravity_enabled(true);
        body.set_velocity(body.velocity().with_y(tuning.jump_force));
        self.is_grounded = false;
        self.coyote_timer = 0.0;
        self.jumped_since_landing = true;
        self.jumps_performed += 1;
        debug!(
            "Jump: velocity_y={}, jumps_performed={}",
            tuning.jump_force, self.jumps_performed
        );
    }
}

/// Yaw-only rotation whose forward (-Z) points along `direction`.
pub fn facing_rotation(direction: Vec3) -> Quat {
    Quat::from_rotation_y(f32::atan2(-direction.x, -direction.z))
}

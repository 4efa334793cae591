//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::sample_contact_sensors;
pub(crate) use input::read_input;
pub(crate) use movement::{
    apply_contact_events, apply_input_signals, integrate_motion, validate_player_bodies,
};

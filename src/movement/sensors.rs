//! Movement domain: ray-cast contact sensors with edge-triggered events.

use avian3d::prelude::*;
use bevy::ecs::message::Message;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::GameLayer;

/// Contact transition reported by a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEdge {
    Enter,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Casts straight down against ground layers.
    Ground,
    /// Casts along the body's forward axis against wall layers.
    Wall,
}

/// Event fired when a sensor's contact flag flips.
#[derive(Debug, Clone, Copy)]
pub struct ContactEvent {
    /// Body the sensor is attached to.
    pub body: Entity,
    pub sensor: SensorKind,
    pub edge: ContactEdge,
}

impl Message for ContactEvent {}

/// Contact flag for the current and previous tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactState {
    pub is_in_contact: bool,
    pub was_in_contact: bool,
}

impl ContactState {
    /// Record this tick's contact and report the transition, if any.
    pub fn update(&mut self, in_contact: bool) -> Option<ContactEdge> {
        self.is_in_contact = in_contact;
        let edge = match (self.was_in_contact, in_contact) {
            (false, true) => Some(ContactEdge::Enter),
            (true, false) => Some(ContactEdge::Exit),
            _ => None,
        };
        self.was_in_contact = in_contact;
        edge
    }
}

/// Physics world query used by sensors.
pub trait RayCaster {
    /// True when the ray hits anything in `filter` within `max_distance`.
    fn cast_ray(&self, origin: Vec3, direction: Dir3, max_distance: f32, filter: LayerMask) -> bool;
}

impl RayCaster for SpatialQuery<'_, '_> {
    fn cast_ray(&self, origin: Vec3, direction: Dir3, max_distance: f32, filter: LayerMask) -> bool {
        SpatialQuery::cast_ray(
            self,
            origin,
            direction,
            max_distance,
            true,
            &SpatialQueryFilter::from_mask(filter),
        )
        .is_some()
    }
}

/// Where a sensor sits on the body and how far it reaches.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SensorProbe {
    /// Ray origin relative to the body.
    pub offset: [f32; 3],
    pub max_distance: f32,
}

impl SensorProbe {
    pub fn local_transform(&self) -> Transform {
        Transform::from_translation(Vec3::from_array(self.offset))
    }
}

/// A single ray probe attached to a body as a child entity.
#[derive(Component, Debug, Clone)]
pub struct ContactSensor {
    pub kind: SensorKind,
    pub max_distance: f32,
    pub layers: LayerMask,
    pub contact: ContactState,
}

impl ContactSensor {
    pub fn ground(max_distance: f32) -> Self {
        Self {
            kind: SensorKind::Ground,
            max_distance,
            layers: GameLayer::Ground.into(),
            contact: ContactState::default(),
        }
    }

    pub fn wall(max_distance: f32) -> Self {
        Self {
            kind: SensorKind::Wall,
            max_distance,
            layers: GameLayer::Wall.into(),
            contact: ContactState::default(),
        }
    }

    /// Ray direction for this sensor given the body's facing.
    pub fn direction(&self, forward: Vec3) -> Vec3 {
        match self.kind {
            SensorKind::Ground => Vec3::NEG_Y,
            SensorKind::Wall => forward,
        }
    }

    /// World-space ray origin and direction from the body's current pose and the
    /// sensor's mounting relative to it.
    pub fn ray(&self, body: &Transform, mount: &Transform) -> (Vec3, Vec3) {
        let origin = body.transform_point(mount.translation);
        let forward = body.rotation * mount.rotation * Vec3::NEG_Z;
        (origin, self.direction(forward))
    }

    /// Cast this tick's ray and emit an edge before returning if the flag flipped.
    ///
    /// A degenerate origin or direction counts as no contact.
    pub fn sample(
        &mut self,
        world: &impl RayCaster,
        origin: Vec3,
        direction: Vec3,
        mut emit: impl FnMut(ContactEdge),
    ) -> bool {
        let hit = match Dir3::new(direction) {
            Ok(dir) if origin.is_finite() => {
                world.cast_ray(origin, dir, self.max_distance, self.layers)
            }
            _ => false,
        };

        if let Some(edge) = self.contact.update(hit) {
            emit(edge);
        }
        hit
    }
}

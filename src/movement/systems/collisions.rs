//! Movement domain: ground and wall sensor sampling.

use avian3d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::{ContactEdge, ContactEvent, ContactSensor};

/// Cast every sensor's ray and publish contact edges for its body.
///
/// Rays are built from the body's `Transform`, which physics writes back every step.
/// `GlobalTransform` is only propagated once per frame and lags inside FixedUpdate.
pub(crate) fn sample_contact_sensors(
    spatial_query: SpatialQuery,
    bodies: Query<&Transform>,
    mut sensors: Query<(&ChildOf, &Transform, &mut ContactSensor)>,
    mut contact_events: MessageWriter<ContactEvent>,
) {
    for (child_of, mount, mut sensor) in &mut sensors {
        let body = child_of.parent();
        let Ok(body_transform) = bodies.get(body) else {
            continue;
        };
        let (origin, direction) = sensor.ray(body_transform, mount);
        let kind = sensor.kind;

        sensor.sample(&spatial_query, origin, direction, |edge| {
            match edge {
                ContactEdge::Enter => debug!("[{:?}] contact entered", kind),
                ContactEdge::Exit => debug!("[{:?}] contact exited", kind),
            }
            contact_events.write(ContactEvent {
                body,
                sensor: kind,
                edge,
            });
        });
    }
}

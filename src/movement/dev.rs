//! Movement domain: debug-only test level.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, Ground, Wall};

pub(crate) fn spawn_test_room(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_material = materials.add(Color::srgb(0.4, 0.5, 0.4));
    let platform_material = materials.add(Color::srgb(0.5, 0.4, 0.3));
    let wall_material = materials.add(Color::srgb(0.3, 0.3, 0.4));

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);

    let mut spawn_block = |marker_is_wall: bool, size: Vec3, at: Vec3| {
        let (material, layers) = if marker_is_wall {
            (wall_material.clone(), wall_layers)
        } else if at.y <= 0.0 {
            (ground_material.clone(), ground_layers)
        } else {
            (platform_material.clone(), ground_layers)
        };

        let mut block = commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(material),
            Transform::from_translation(at),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            layers,
        ));
        if marker_is_wall {
            block.insert(Wall);
        } else {
            block.insert(Ground);
        }
    };

    // Floor
    spawn_block(false, Vec3::new(40.0, 1.0, 40.0), Vec3::new(0.0, -0.5, 0.0));

    // Stepping platforms, each higher than the last
    spawn_block(false, Vec3::new(3.0, 0.5, 3.0), Vec3::new(4.0, 1.0, -4.0));
    spawn_block(false, Vec3::new(3.0, 0.5, 3.0), Vec3::new(8.0, 2.2, -8.0));
    spawn_block(false, Vec3::new(4.0, 0.5, 4.0), Vec3::new(3.0, 3.4, -13.0));

    // Climbing walls
    spawn_block(true, Vec3::new(6.0, 8.0, 1.0), Vec3::new(-6.0, 4.0, -10.0));
    spawn_block(true, Vec3::new(1.0, 5.0, 6.0), Vec3::new(-12.0, 2.5, 0.0));

    // Ledge on top of the first wall
    spawn_block(false, Vec3::new(6.0, 0.5, 4.0), Vec3::new(-6.0, 8.25, -12.5));
}

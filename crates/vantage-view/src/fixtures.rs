//! Procedural window fixtures for classroom interiors

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use tracing::debug;
use vantage_assets::{Asset, Material, MeshAsset, MeshPrimitive, Node};
use vantage_core::{BoundingVolume, Color, Transform};

const WINDOW_WIDTH: f32 = 2.0;
const WINDOW_HEIGHT: f32 = 1.5;
const FRAME_THICKNESS: f32 = 0.1;

/// Window placements as (offset from center in units of size, yaw)
const PLACEMENTS: [(Vec3, f32); 4] = [
    (Vec3::new(-0.25, 0.2, -0.5), 0.0),
    (Vec3::new(-0.5, 0.2, 0.0), FRAC_PI_2),
    (Vec3::new(0.5, 0.2, 0.0), -FRAC_PI_2),
    (Vec3::new(0.25, 0.2, -0.5), 0.0),
];

/// Add four framed, glazed windows to the walls of a placed asset.
///
/// `bounds` is the asset's world-space bounding volume and `unit` the length
/// of one metre in world units. The fixtures are parented under a single
/// group node so they move with the asset. Returns the group's node index.
///
/// The group undoes the asset's root transform as it is now, so call this
/// after [`placement::normalize`](crate::placement::normalize) and do not
/// change `asset.transform` afterwards.
pub fn add_windows(asset: &mut Asset, bounds: &BoundingVolume, unit: f32) -> usize {
    let frame_material = asset.add_material(Material::solid("WindowFrame", Color::from_hex(0x8B4513), false));
    let glass_material = asset.add_material(Material::solid(
        "WindowGlass",
        Color::from_hex(0x87CEEB).with_alpha(0.3),
        true,
    ));

    let width = WINDOW_WIDTH * unit;
    let height = WINDOW_HEIGHT * unit;
    let frame = FRAME_THICKNESS * unit;

    // Undo the asset's root transform so children can be laid out in world units
    let group_local = Transform::from_matrix(asset.transform.matrix().inverse());
    let group = asset.add_node(Node::group("Windows", None, group_local));

    let center = bounds.center();
    let size = bounds.size();
    for (i, (offset, yaw)) in PLACEMENTS.iter().enumerate() {
        let window = asset.add_node(Node::group(
            format!("Window{}", i + 1),
            Some(group),
            Transform {
                position: center + size * *offset,
                rotation: Quat::from_rotation_y(*yaw),
                scale: Vec3::ONE,
            },
        ));

        asset.add_node(Node::with_mesh(
            "Frame",
            Some(window),
            Transform::from_position(Vec3::new(0.0, 0.0, -frame / 2.0)),
            MeshAsset::single(
                "Frame",
                MeshPrimitive::cuboid(
                    Vec3::new(width + frame * 2.0, height + frame * 2.0, frame),
                    Some(frame_material),
                ),
            ),
        ));
        asset.add_node(Node::with_mesh(
            "InnerFrame",
            Some(window),
            Transform::from_position(Vec3::new(0.0, 0.0, -frame * 0.75)),
            MeshAsset::single(
                "InnerFrame",
                MeshPrimitive::cuboid(Vec3::new(width, height, frame * 0.5), Some(frame_material)),
            ),
        ));
        asset.add_node(Node::with_mesh(
            "Glass",
            Some(window),
            Transform::from_position(Vec3::new(0.0, 0.0, -frame * 0.25)),
            MeshAsset::single("Glass", MeshPrimitive::quad(width, height, Some(glass_material))),
        ));
    }

    debug!("Added {} window fixtures to {}", PLACEMENTS.len(), asset.name);
    group
}

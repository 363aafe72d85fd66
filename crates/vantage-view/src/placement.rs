//! Canonical placement of an asset on the ground plane
//!
//! Assets are assumed to be authored upright. No attempt is made to detect
//! the up axis; rotation is simply reset.

use glam::{Quat, Vec3};
use tracing::{debug, info};
use vantage_assets::Asset;
use vantage_core::BoundingVolume;

use crate::bounds;

/// Scale, un-rotate and translate the asset so its lowest point rests on
/// `ground_y` and its horizontal center sits at the world origin.
///
/// Returns the bounds recomputed after translation; those are the ones to
/// hand to eye-height estimation and viewpoint planning. Degenerate assets
/// only get the scale and rotation reset.
pub fn normalize(asset: &mut Asset, scale: f32, ground_y: f32) -> BoundingVolume {
    asset.transform.set_uniform_scale(scale);
    asset.transform.rotation = Quat::IDENTITY;

    let scaled = bounds::compute(asset);
    if scaled.is_degenerate() {
        debug!("Asset '{}' has no extent, using identity placement", asset.name);
        return scaled;
    }

    let center = scaled.center();
    asset
        .transform
        .translate(Vec3::new(-center.x, ground_y - scaled.min.y, -center.z));

    let placed = bounds::compute(asset);
    info!(
        "Placed '{}' at {:?} (scale {}, size {:?})",
        asset.name,
        asset.transform.position,
        scale,
        placed.size()
    );
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_assets::{MeshAsset, MeshPrimitive, Node};
    use vantage_core::Transform;

    const EPS: f32 = 1e-4;

    fn offset_box(size: Vec3, at: Vec3) -> Asset {
        let mut asset = Asset::new("box");
        asset.add_node(Node::with_mesh(
            "Box",
            None,
            Transform::from_position(at),
            MeshAsset::single("Box", MeshPrimitive::cuboid(size, None)),
        ));
        asset
    }

    #[test]
    fn rests_on_ground_and_is_centered() {
        let mut asset = offset_box(Vec3::new(2.0, 1.0, 4.0), Vec3::new(5.0, -7.0, 3.0));
        asset.transform.position = Vec3::new(100.0, 50.0, -20.0);
        asset.transform.rotation = Quat::from_rotation_y(1.0);

        let placed = normalize(&mut asset, 1.0, 0.0);
        let again = bounds::compute(&asset);

        assert_eq!(placed, again);
        assert!(placed.min.y.abs() < EPS);
        assert!(placed.center().x.abs() < EPS);
        assert!(placed.center().z.abs() < EPS);
        assert_eq!(asset.transform.rotation, Quat::IDENTITY);
    }

    #[test]
    fn respects_ground_height() {
        let mut asset = offset_box(Vec3::ONE, Vec3::new(0.0, 3.0, 0.0));
        let placed = normalize(&mut asset, 2.0, -1.5);
        assert!((placed.min.y + 1.5).abs() < EPS);
        assert!((placed.size().y - 2.0).abs() < EPS);
    }

    #[test]
    fn classroom_scale_example() {
        // 0.15 units tall as authored, 20x policy scale
        let mut asset = offset_box(Vec3::new(0.4, 0.15, 0.3), Vec3::new(0.1, 0.2, -0.05));
        let placed = normalize(&mut asset, 20.0, 0.0);
        assert!((placed.size().y - 3.0).abs() < EPS);
        assert!(placed.min.y.abs() < EPS);
    }

    #[test]
    fn empty_asset_is_identity_placement() {
        let mut asset = Asset::new("empty");
        asset.transform.rotation = Quat::from_rotation_x(0.5);
        let placed = normalize(&mut asset, 3.0, 0.0);
        assert!(placed.is_degenerate());
        assert_eq!(asset.transform.position, Vec3::ZERO);
        assert_eq!(asset.transform.scale, Vec3::splat(3.0));
        assert_eq!(asset.transform.rotation, Quat::IDENTITY);
    }
}

//! Bounding volume of an asset under its current transform

use vantage_assets::Asset;
use vantage_core::BoundingVolume;

/// Compute the world-space volume enclosing every renderable vertex of the
/// asset, with the asset's transform and node hierarchy applied.
///
/// An asset without renderable geometry yields the zero volume.
pub fn compute(asset: &Asset) -> BoundingVolume {
    let world = asset.node_world_matrices();
    BoundingVolume::from_points(asset.renderable_nodes().flat_map(|(index, node)| {
        let matrix = world[index];
        node.mesh
            .iter()
            .flat_map(|mesh| mesh.positions())
            .map(move |p| matrix.transform_point3(p))
    }))
}

use vantage_core::Vec3;

/// A loaded mesh (renderer-agnostic). Contains raw vertex data extracted
/// from a glTF file or generated procedurally.
#[derive(Debug, Clone)]
pub struct MeshAsset {
    pub name: String,
    pub primitives: Vec<MeshPrimitive>,
}

impl MeshAsset {
    /// A mesh with a single primitive
    pub fn single(name: impl Into<String>, primitive: MeshPrimitive) -> Self {
        Self {
            name: name.into(),
            primitives: vec![primitive],
        }
    }

    /// Iterate every vertex position across all primitives
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.primitives
            .iter()
            .flat_map(|p| p.positions.iter().map(|&v| Vec3::from_array(v)))
    }

    pub fn vertex_count(&self) -> usize {
        self.primitives.iter().map(|p| p.positions.len()).sum()
    }
}

/// A single draw primitive within a mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshPrimitive {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub tex_coords: Option<Vec<[f32; 2]>>,
    pub indices: Option<Vec<u32>>,
    /// Index into the owning asset's material list
    pub material: Option<usize>,
    /// Number of morph targets on this primitive
    pub morph_targets: usize,
}

impl MeshPrimitive {
    /// Generate an axis-aligned box centered on the origin
    pub fn cuboid(size: Vec3, material: Option<usize>) -> Self {
        let h = size * 0.5;
        // (normal, tangent u, tangent v) per face
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];

        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut tex_coords = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u, v) in faces {
            let base = positions.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let p = (normal + u * su + v * sv) * h;
                positions.push(p.to_array());
                normals.push(normal.to_array());
                tex_coords.push([(su + 1.0) * 0.5, (sv + 1.0) * 0.5]);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            positions,
            normals,
            tex_coords: Some(tex_coords),
            indices: Some(indices),
            material,
            morph_targets: 0,
        }
    }

    /// Generate a flat quad in the XY plane facing +Z
    pub fn quad(width: f32, height: f32, material: Option<usize>) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;

        Self {
            positions: vec![[-hw, -hh, 0.0], [hw, -hh, 0.0], [hw, hh, 0.0], [-hw, hh, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 4],
            tex_coords: Some(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
            indices: Some(vec![0, 1, 2, 0, 2, 3]),
            material,
            morph_targets: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_spans_its_size() {
        let prim = MeshPrimitive::cuboid(Vec3::new(2.0, 4.0, 6.0), None);
        assert_eq!(prim.positions.len(), 24);
        assert_eq!(prim.indices.as_ref().map(|i| i.len()), Some(36));

        let mesh = MeshAsset::single("box", prim);
        let max = mesh.positions().fold(Vec3::splat(f32::MIN), Vec3::max);
        let min = mesh.positions().fold(Vec3::splat(f32::MAX), Vec3::min);
        assert_eq!(max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(min, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn quad_is_flat() {
        let prim = MeshPrimitive::quad(2.0, 1.0, Some(3));
        assert!(prim.positions.iter().all(|p| p[2] == 0.0));
        assert_eq!(prim.material, Some(3));
    }
}

//! Loaded asset scene graph
//!
//! An [`Asset`] is a flattened node hierarchy with its own root transform,
//! a material table and animation clip metadata. Nodes reference their
//! parent by index; a parent always precedes its children.

use std::path::PathBuf;

use vantage_core::{Color, Mat4, Transform};

use crate::handle::{next_asset_id, AssetId};
use crate::mesh::MeshAsset;
use crate::texture::{TextureSlot, TextureState};

/// Morph target names and their current influence weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MorphTargets {
    pub names: Vec<String>,
    pub weights: Vec<f32>,
}

/// A node in the asset hierarchy.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parent: Option<usize>,
    pub local: Transform,
    pub mesh: Option<MeshAsset>,
    pub morph: Option<MorphTargets>,
}

impl Node {
    /// A transform-only grouping node
    pub fn group(name: impl Into<String>, parent: Option<usize>, local: Transform) -> Self {
        Self {
            name: name.into(),
            parent,
            local,
            mesh: None,
            morph: None,
        }
    }

    /// A node carrying geometry
    pub fn with_mesh(
        name: impl Into<String>,
        parent: Option<usize>,
        local: Transform,
        mesh: MeshAsset,
    ) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::group(name, parent, local)
        }
    }

    pub fn is_renderable(&self) -> bool {
        self.mesh.as_ref().is_some_and(|m| m.vertex_count() > 0)
    }
}

/// Surface description of a mesh primitive.
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub base_color: Color,
    pub double_sided: bool,
    pub texture: Option<TextureSlot>,
    /// False for procedural materials that are meant to stay untextured
    pub texturable: bool,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_color: Color::WHITE,
            double_sided: false,
            texture: None,
            texturable: true,
        }
    }

    /// A flat-colored material that texture recovery leaves alone
    pub fn solid(name: impl Into<String>, base_color: Color, double_sided: bool) -> Self {
        Self {
            base_color,
            double_sided,
            texturable: false,
            ..Self::new(name)
        }
    }
}

/// Animation clip metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    /// Length of the clip in seconds
    pub duration: f32,
}

/// Entry of the morph control surface: one node and its target weights.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphControl {
    pub node: usize,
    pub node_name: String,
    pub targets: Vec<(String, f32)>,
}

/// Resources released when an asset is disposed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisposeReport {
    pub meshes: usize,
    pub materials: usize,
    pub textures: usize,
    pub skins: usize,
}

/// A loaded 3D scene subtree representing the viewed subject.
#[derive(Debug)]
pub struct Asset {
    id: AssetId,
    pub name: String,
    pub source: Option<PathBuf>,
    pub transform: Transform,
    pub nodes: Vec<Node>,
    pub materials: Vec<Material>,
    pub animations: Vec<AnimationClip>,
    /// Number of skeletons bound to skinned meshes
    pub skins: usize,
}

impl Asset {
    /// Create an empty asset with a fresh identity
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: next_asset_id(),
            name: name.into(),
            source: None,
            transform: Transform::IDENTITY,
            nodes: Vec::new(),
            materials: Vec::new(),
            animations: Vec::new(),
            skins: 0,
        }
    }

    /// The unique ID of this asset.
    pub fn id(&self) -> AssetId {
        self.id
    }

    /// Append a node, returning its index. A parent index that does not
    /// precede the node is dropped and the node becomes a root.
    pub fn add_node(&mut self, mut node: Node) -> usize {
        let index = self.nodes.len();
        if node.parent.is_some_and(|p| p >= index) {
            node.parent = None;
        }
        self.nodes.push(node);
        index
    }

    /// Append a material, returning its index
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// World matrix of every node, including the asset's own transform.
    pub fn node_world_matrices(&self) -> Vec<Mat4> {
        let root = self.transform.matrix();
        let mut out: Vec<Mat4> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let parent = node.parent.map_or(root, |p| out[p]);
            out.push(parent * node.local.matrix());
        }
        out
    }

    /// Nodes that carry at least one vertex
    pub fn renderable_nodes(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_renderable())
    }

    /// Names of the meshes (and their nodes) that draw with a material
    pub fn mesh_names_for_material(&self, material: usize) -> Vec<&str> {
        let mut names = Vec::new();
        for node in &self.nodes {
            let Some(mesh) = &node.mesh else { continue };
            if mesh.primitives.iter().any(|p| p.material == Some(material)) {
                names.push(node.name.as_str());
                if mesh.name != node.name {
                    names.push(mesh.name.as_str());
                }
            }
        }
        names
    }

    /// Morph targets exposed for interactive control
    pub fn morph_controls(&self) -> Vec<MorphControl> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let morph = node.morph.as_ref()?;
                Some(MorphControl {
                    node: index,
                    node_name: node.name.clone(),
                    targets: morph
                        .names
                        .iter()
                        .cloned()
                        .zip(morph.weights.iter().copied())
                        .collect(),
                })
            })
            .collect()
    }

    /// Set a morph target influence, clamped to [0, 1]. Returns false if the
    /// node or target does not exist.
    pub fn set_morph_weight(&mut self, node: usize, target: usize, weight: f32) -> bool {
        let Some(slot) = self
            .nodes
            .get_mut(node)
            .and_then(|n| n.morph.as_mut())
            .and_then(|m| m.weights.get_mut(target))
        else {
            return false;
        };
        *slot = weight.clamp(0.0, 1.0);
        true
    }

    /// Release geometry, materials, textures and skeletal state.
    pub fn dispose(self) -> DisposeReport {
        let meshes = self.nodes.iter().filter(|n| n.mesh.is_some()).count();
        let textures = self
            .materials
            .iter()
            .filter(|m| {
                m.texture
                    .as_ref()
                    .is_some_and(|t| matches!(t.state, TextureState::Ready(_)))
            })
            .count();
        DisposeReport {
            meshes,
            materials: self.materials.len(),
            textures,
            skins: self.skins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshPrimitive;
    use vantage_core::Vec3;

    fn boxed(material: Option<usize>) -> MeshAsset {
        MeshAsset::single("Box", MeshPrimitive::cuboid(Vec3::ONE, material))
    }

    #[test]
    fn world_matrices_follow_hierarchy() {
        let mut asset = Asset::new("test");
        asset.transform = Transform::from_uniform_scale(2.0);
        let root = asset.add_node(Node::group(
            "root",
            None,
            Transform::from_position(Vec3::new(1.0, 0.0, 0.0)),
        ));
        asset.add_node(Node::with_mesh(
            "child",
            Some(root),
            Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
            boxed(None),
        ));

        let world = asset.node_world_matrices();
        let origin = world[1].transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(2.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn forward_parent_reference_becomes_root() {
        let mut asset = Asset::new("test");
        let idx = asset.add_node(Node::group("orphan", Some(5), Transform::IDENTITY));
        assert_eq!(asset.nodes[idx].parent, None);
    }

    #[test]
    fn assets_get_distinct_ids() {
        assert_ne!(Asset::new("a").id(), Asset::new("a").id());
    }

    #[test]
    fn mesh_names_for_material_lists_users() {
        let mut asset = Asset::new("test");
        let wall = asset.add_material(Material::new("mat0"));
        asset.add_node(Node::with_mesh("Pared_Norte", None, Transform::IDENTITY, boxed(Some(wall))));
        asset.add_node(Node::with_mesh("Desk", None, Transform::IDENTITY, boxed(None)));
        assert_eq!(asset.mesh_names_for_material(wall), vec!["Pared_Norte", "Box"]);
    }

    #[test]
    fn morph_weights_are_clamped() {
        let mut asset = Asset::new("test");
        let mut node = Node::with_mesh("Face", None, Transform::IDENTITY, boxed(None));
        node.morph = Some(MorphTargets {
            names: vec!["smile".into(), "blink".into()],
            weights: vec![0.0, 0.0],
        });
        let idx = asset.add_node(node);

        assert!(asset.set_morph_weight(idx, 1, 3.0));
        assert!(!asset.set_morph_weight(idx, 2, 0.5));
        assert!(!asset.set_morph_weight(99, 0, 0.5));

        let controls = asset.morph_controls();
        assert_eq!(controls.len(), 1);
        assert_eq!(controls[0].targets[1], ("blink".to_string(), 1.0));
    }

    #[test]
    fn dispose_counts_resources() {
        let mut asset = Asset::new("test");
        asset.add_material(Material::new("a"));
        asset.add_node(Node::with_mesh("m", None, Transform::IDENTITY, boxed(Some(0))));
        asset.skins = 1;
        let report = asset.dispose();
        assert_eq!(
            report,
            DisposeReport {
                meshes: 1,
                materials: 1,
                textures: 0,
                skins: 1
            }
        );
    }
}

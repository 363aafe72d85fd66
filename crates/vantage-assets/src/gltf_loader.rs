use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use vantage_core::{Quat, Transform, Vec3};

use crate::error::AssetError;
use crate::mesh::{MeshAsset, MeshPrimitive};
use crate::scene::{AnimationClip, Asset, Material, MorphTargets, Node};
use crate::texture::{decode_texture, TextureReference, TextureSlot, TextureState};

/// Load a glTF 2.0 file (.gltf or .glb) into an [`Asset`].
///
/// Embedded images are decoded immediately. Images referenced by URI are
/// left [`TextureState::Pending`] so the caller can decode them off the
/// load path; a missing texture file never fails the asset load.
pub fn load_gltf(path: &Path, name: &str) -> Result<Asset, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    if !matches!(extension.as_deref(), Some("glb" | "gltf")) {
        return Err(AssetError::UnsupportedFormat(path.to_path_buf()));
    }

    let gltf::Gltf { document, blob } = gltf::Gltf::open(path)
        .map_err(|e| AssetError::GltfLoadFailed(path.to_path_buf(), e.to_string()))?;
    let base = path.parent();
    let buffers = gltf::import_buffers(&document, base, blob)
        .map_err(|e| AssetError::GltfLoadFailed(path.to_path_buf(), e.to_string()))?;

    let mut asset = Asset::new(name);
    asset.source = Some(path.to_path_buf());

    // Images, decoded once and shared between materials.
    let mut images: HashMap<usize, TextureSlot> = HashMap::new();
    for image in document.images() {
        let label = path.join(format!("#image{}", image.index()));
        let slot = match image.source() {
            gltf::image::Source::View { view, .. } => {
                let data = &buffers[view.buffer().index()];
                let bytes = data.get(view.offset()..view.offset() + view.length());
                let state = match bytes.map(|b| decode_texture(&label, b)) {
                    Some(Ok(tex)) => TextureState::Ready(Arc::new(tex)),
                    Some(Err(e)) => {
                        debug!("Embedded image {} failed to decode: {}", image.index(), e);
                        TextureState::Failed
                    }
                    None => TextureState::Failed,
                };
                TextureSlot {
                    state,
                    ..TextureSlot::pending(TextureReference::Embedded)
                }
            }
            gltf::image::Source::Uri { uri, .. } if uri.starts_with("data:") => {
                debug!("Data URI image {} is not decoded", image.index());
                TextureSlot {
                    state: TextureState::Failed,
                    ..TextureSlot::pending(TextureReference::Embedded)
                }
            }
            gltf::image::Source::Uri { uri, .. } => {
                let file = base.map_or_else(|| Path::new(uri).to_path_buf(), |b| b.join(uri));
                TextureSlot::pending(TextureReference::File(file))
            }
        };
        images.insert(image.index(), slot);
    }

    // Materials. glTF primitives without a material get a shared default
    // appended after the authored ones.
    for material in document.materials() {
        let pbr = material.pbr_metallic_roughness();
        let texture = pbr.base_color_texture().and_then(|info| {
            let tex = info.texture();
            let sampler = tex.sampler();
            images.get(&tex.source().index()).map(|slot| TextureSlot {
                wrap_s: sampler.wrap_s().into(),
                wrap_t: sampler.wrap_t().into(),
                ..slot.clone()
            })
        });
        asset.add_material(Material {
            base_color: pbr.base_color_factor().into(),
            double_sided: material.double_sided(),
            texture,
            ..Material::new(
                material
                    .name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("material_{}", material.index().unwrap_or(0))),
            )
        });
    }
    let mut default_material = None;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| AssetError::GltfLoadFailed(path.to_path_buf(), "no scenes found".into()))?;

    let mut stack: Vec<(gltf::Node, Option<usize>)> =
        scene.nodes().map(|n| (n, None)).collect::<Vec<_>>();
    stack.reverse();

    while let Some((node, parent)) = stack.pop() {
        let (t, r, s) = node.transform().decomposed();
        let local = Transform {
            position: Vec3::from_array(t),
            rotation: Quat::from_array(r),
            scale: Vec3::from_array(s),
        };
        let name = node
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("node_{}", node.index()));

        let mut morph = None;
        let mesh = node.mesh().map(|mesh| {
            let mut primitives = Vec::new();
            for primitive in mesh.primitives() {
                let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

                let positions: Vec<[f32; 3]> = reader
                    .read_positions()
                    .map(|iter| iter.collect())
                    .unwrap_or_default();

                let normals: Vec<[f32; 3]> = reader
                    .read_normals()
                    .map(|iter| iter.collect())
                    .unwrap_or_default();

                let tex_coords: Option<Vec<[f32; 2]>> = reader
                    .read_tex_coords(0)
                    .map(|tc| tc.into_f32().collect());

                let indices: Option<Vec<u32>> = reader
                    .read_indices()
                    .map(|idx| idx.into_u32().collect());

                let material = match primitive.material().index() {
                    Some(i) => Some(i),
                    None => Some(*default_material.get_or_insert_with(|| {
                        asset.add_material(Material::new("default"))
                    })),
                };

                primitives.push(MeshPrimitive {
                    positions,
                    normals,
                    tex_coords,
                    indices,
                    material,
                    morph_targets: primitive.morph_targets().count(),
                });
            }

            let targets = primitives.iter().map(|p| p.morph_targets).max().unwrap_or(0);
            if targets > 0 {
                let mut weights = node
                    .weights()
                    .or_else(|| mesh.weights())
                    .map(<[f32]>::to_vec)
                    .unwrap_or_default();
                weights.resize(targets, 0.0);
                morph = Some(MorphTargets {
                    names: (0..targets).map(|i| format!("target_{}", i)).collect(),
                    weights,
                });
            }

            let mesh_name = mesh.name().unwrap_or("unnamed").to_string();
            debug!("Loaded mesh '{}' with {} primitives", mesh_name, primitives.len());
            MeshAsset {
                name: mesh_name,
                primitives,
            }
        });

        let index = asset.add_node(Node {
            name,
            parent,
            local,
            mesh,
            morph,
        });

        let children: Vec<_> = node.children().collect();
        for child in children.into_iter().rev() {
            stack.push((child, Some(index)));
        }
    }

    for animation in document.animations() {
        let duration = animation
            .channels()
            .filter_map(|channel| {
                let reader = channel.reader(|buffer| Some(&buffers[buffer.index()]));
                reader.read_inputs().map(|inputs| inputs.fold(0.0f32, f32::max))
            })
            .fold(0.0f32, f32::max);
        asset.animations.push(AnimationClip {
            name: animation
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("animation_{}", animation.index())),
            duration,
        });
    }
    asset.skins = document.skins().count();

    debug!(
        "glTF '{}': {} nodes, {} materials, {} animations",
        path.display(),
        asset.nodes.len(),
        asset.materials.len(),
        asset.animations.len()
    );

    Ok(asset)
}

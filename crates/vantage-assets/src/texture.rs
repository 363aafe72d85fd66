use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Pixel format of a loaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    Rgba8,
}

/// A loaded texture asset with raw pixel data.
#[derive(Debug, Clone)]
pub struct TextureAsset {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub format: TextureFormat,
}

impl TextureAsset {
    /// True when the image carries at least one pixel
    pub fn is_loaded(&self) -> bool {
        self.width > 0 && self.height > 0 && !self.data.is_empty()
    }
}

/// Load an image file and return it as an RGBA8 TextureAsset.
pub fn load_texture(path: &Path) -> Result<TextureAsset, AssetError> {
    let img = image::open(path)
        .map_err(|e| AssetError::ImageLoadFailed(path.to_path_buf(), e.to_string()))?;
    rgba_texture(path, img)
}

/// Decode an in-memory image (e.g. embedded in a glb buffer view).
pub fn decode_texture(label: &Path, bytes: &[u8]) -> Result<TextureAsset, AssetError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| AssetError::ImageLoadFailed(label.to_path_buf(), e.to_string()))?;
    rgba_texture(label, img)
}

fn rgba_texture(path: &Path, img: image::DynamicImage) -> Result<TextureAsset, AssetError> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let tex = TextureAsset {
        width,
        height,
        data: rgba.into_raw(),
        format: TextureFormat::Rgba8,
    };
    if !tex.is_loaded() {
        return Err(AssetError::EmptyImage(path.to_path_buf()));
    }
    Ok(tex)
}

/// Texture coordinate wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    ClampToEdge,
    MirroredRepeat,
    #[default]
    Repeat,
}

impl From<gltf::texture::WrappingMode> for WrapMode {
    fn from(mode: gltf::texture::WrappingMode) -> Self {
        match mode {
            gltf::texture::WrappingMode::ClampToEdge => WrapMode::ClampToEdge,
            gltf::texture::WrappingMode::MirroredRepeat => WrapMode::MirroredRepeat,
            gltf::texture::WrappingMode::Repeat => WrapMode::Repeat,
        }
    }
}

/// Where a texture slot's image came from.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureReference {
    /// A file path as authored (resolved against the asset's directory)
    File(PathBuf),
    /// Bytes embedded in the asset; there is no filename to repair against
    Embedded,
}

impl TextureReference {
    /// The authored file name without any directory component. Both `/` and
    /// backslash are separators.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            TextureReference::File(path) => path
                .to_str()?
                .rsplit(['/', '\\'])
                .next()
                .filter(|name| !name.is_empty()),
            TextureReference::Embedded => None,
        }
    }
}

/// Decode state of a texture slot's image.
#[derive(Debug, Clone)]
pub enum TextureState {
    /// Decode requested, not yet completed
    Pending,
    Ready(Arc<TextureAsset>),
    Failed,
}

/// A material's texture binding: the reference, the image it resolved to
/// and the sampling flags.
#[derive(Debug, Clone)]
pub struct TextureSlot {
    pub reference: TextureReference,
    pub state: TextureState,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub flip_y: bool,
}

impl TextureSlot {
    /// A slot whose image is still being decoded
    pub fn pending(reference: TextureReference) -> Self {
        Self {
            reference,
            state: TextureState::Pending,
            wrap_s: WrapMode::default(),
            wrap_t: WrapMode::default(),
            flip_y: false,
        }
    }

    /// A slot with an already-decoded image
    pub fn ready(reference: TextureReference, image: Arc<TextureAsset>) -> Self {
        Self {
            state: TextureState::Ready(image),
            ..Self::pending(reference)
        }
    }

    /// The decoded image, if it holds pixels
    pub fn image(&self) -> Option<&Arc<TextureAsset>> {
        match &self.state {
            TextureState::Ready(image) if image.is_loaded() => Some(image),
            _ => None,
        }
    }
}

//! Vantage Assets - Asset loading and the loaded scene graph
//!
//! Provides glTF 2.0 loading into an [`Asset`] scene graph, texture decoding,
//! and a background [`AssetServer`] whose results arrive through
//! [`PendingLoad`] handles polled once per frame.

mod error;
mod gltf_loader;
mod handle;
mod mesh;
mod pending;
mod scene;
mod server;
mod texture;

pub use error::AssetError;
pub use gltf_loader::load_gltf;
pub use handle::AssetId;
pub use mesh::{MeshAsset, MeshPrimitive};
pub use pending::{LoadSender, PendingLoad};
pub use scene::{AnimationClip, Asset, DisposeReport, Material, MorphControl, MorphTargets, Node};
pub use server::{AssetServer, AssetSource};
pub use texture::{
    decode_texture, load_texture, TextureAsset, TextureFormat, TextureReference, TextureSlot,
    TextureState, WrapMode,
};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::AssetError;
use crate::gltf_loader;
use crate::pending::PendingLoad;
use crate::scene::Asset;
use crate::texture::{self, TextureAsset};

/// Asynchronous asset and texture loading, as seen by the viewer.
///
/// Every request returns immediately; the result arrives later through the
/// returned [`PendingLoad`]. Failure is an ordinary outcome.
pub trait AssetSource {
    /// Load the asset registered under `identifier`
    fn request_asset(&self, identifier: &str) -> PendingLoad<Asset>;

    /// Decode an image file. Paths are used as given (the glTF loader already
    /// resolves URIs against the asset's directory).
    fn request_texture(&self, path: &Path) -> PendingLoad<Arc<TextureAsset>>;

    /// Drop cached images that nothing else holds any more, returning how
    /// many were released. Called after an asset is disposed.
    fn release_unused(&self) -> usize {
        0
    }
}

/// Filesystem asset server. Owns a background tokio runtime and decodes
/// assets and textures on its blocking pool.
pub struct AssetServer {
    runtime: tokio::runtime::Runtime,
    base_path: PathBuf,
    textures: Arc<Mutex<HashMap<PathBuf, Arc<TextureAsset>>>>,
}

impl AssetServer {
    /// Create a new AssetServer rooted at the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let base_path = base_path.into();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("vantage-loader")
            .enable_all()
            .build()
            .map_err(|e| AssetError::Io(base_path.clone(), e))?;

        info!("AssetServer created with base path: {}", base_path.display());
        Ok(Self {
            runtime,
            base_path,
            textures: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// File backing an asset identifier: `<base>/<identifier>.glb`, or
    /// `.gltf` when only that exists.
    pub fn asset_path(&self, identifier: &str) -> PathBuf {
        let glb = self.base_path.join(format!("{identifier}.glb"));
        if glb.exists() {
            return glb;
        }
        let gltf = self.base_path.join(format!("{identifier}.gltf"));
        if gltf.exists() {
            gltf
        } else {
            glb
        }
    }

    /// Directory holding the asset files.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Number of decoded textures held in the cache
    pub fn cached_textures(&self) -> usize {
        self.textures.lock().len()
    }
}

impl AssetSource for AssetServer {
    fn request_asset(&self, identifier: &str) -> PendingLoad<Asset> {
        let (tx, pending) = PendingLoad::pair();
        let path = self.asset_path(identifier);
        let name = identifier.to_string();

        self.runtime.spawn_blocking(move || {
            debug!("Loading asset '{}' from {}", name, path.display());
            let _ = tx.send(gltf_loader::load_gltf(&path, &name));
        });

        pending
    }

    fn request_texture(&self, path: &Path) -> PendingLoad<Arc<TextureAsset>> {
        let full_path = path.to_path_buf();

        // Deduplication: return the cached image if already decoded.
        if let Some(tex) = self.textures.lock().get(&full_path) {
            return PendingLoad::ready(Ok(Arc::clone(tex)));
        }

        let (tx, pending) = PendingLoad::pair();
        let cache = Arc::clone(&self.textures);

        self.runtime.spawn_blocking(move || {
            let result = if full_path.exists() {
                texture::load_texture(&full_path).map(Arc::new)
            } else {
                Err(AssetError::NotFound(full_path.clone()))
            };
            if let Ok(tex) = &result {
                cache.lock().insert(full_path, Arc::clone(tex));
            }
            let _ = tx.send(result);
        });

        pending
    }

    fn release_unused(&self) -> usize {
        let mut cache = self.textures.lock();
        let before = cache.len();
        cache.retain(|_, texture| Arc::strong_count(texture) > 1);
        let released = before - cache.len();
        if released > 0 {
            debug!("Released {} cached textures", released);
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_asset_returns_error() {
        let server = AssetServer::new("/nonexistent").unwrap();
        let result = server.request_asset("does_not_exist").wait();
        match result.unwrap_err() {
            AssetError::NotFound(_) => {}
            other => panic!("expected NotFound, got: {:?}", other),
        }
    }

    #[test]
    fn missing_texture_returns_error() {
        let server = AssetServer::new("/nonexistent").unwrap();
        let result = server.request_texture(Path::new("does_not_exist.png")).wait();
        assert!(result.is_err());
        assert_eq!(server.cached_textures(), 0);
    }

    #[test]
    fn unused_textures_are_released() {
        let dir = std::env::temp_dir().join(format!("vantage-cache-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("wall.png");
        image::RgbaImage::new(2, 2).save(&path).unwrap();

        let server = AssetServer::new(&dir).unwrap();
        let texture = server.request_texture(&path).wait().unwrap();
        assert_eq!(server.cached_textures(), 1);

        assert_eq!(server.release_unused(), 0, "texture still bound");
        assert_eq!(server.cached_textures(), 1);

        drop(texture);
        assert_eq!(server.release_unused(), 1);
        assert_eq!(server.cached_textures(), 0);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn asset_path_defaults_to_glb() {
        let server = AssetServer::new("/home/user/assets").unwrap();
        assert_eq!(
            server.asset_path("Aula1"),
            PathBuf::from("/home/user/assets/Aula1.glb")
        );
    }
}

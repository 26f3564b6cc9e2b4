use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::AssetError;
use crate::handle::{AssetHandle, AssetId};
use crate::texture::{self, TextureAsset, TextureHandle};

/// Owns every texture of a running game and hands out handles to them.
///
/// Textures are never evicted, so a handle stays valid for as long as the
/// server lives.
pub struct AssetServer {
    base_path: PathBuf,
    textures: HashMap<AssetId, TextureAsset>,
    path_to_texture: HashMap<PathBuf, TextureHandle>,
    next_id: AssetId,
}

impl AssetServer {
    /// Create a server resolving relative paths against `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        info!("AssetServer created with base path: {}", base_path.display());
        Self {
            base_path,
            textures: HashMap::new(),
            path_to_texture: HashMap::new(),
            next_id: 1,
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    fn allocate<T>(&mut self) -> AssetHandle<T> {
        let id = self.next_id;
        self.next_id += 1;
        AssetHandle::new(id)
    }

    /// Load an image file as a texture. Loading the same path twice returns
    /// the cached handle.
    pub fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, AssetError> {
        let full_path = self.resolve(path);

        if let Some(&handle) = self.path_to_texture.get(&full_path) {
            return Ok(handle);
        }

        let tex = self.decode(&full_path)?;
        debug!(
            "Loaded texture '{}' ({}x{})",
            full_path.display(),
            tex.width,
            tex.height
        );
        let handle = self.insert_texture(tex);
        self.path_to_texture.insert(full_path, handle);
        Ok(handle)
    }

    /// Decode an image without keeping it in the cache, for callers that
    /// only need to read its pixels once.
    pub fn load_image(&self, path: &Path) -> Result<TextureAsset, AssetError> {
        self.decode(&self.resolve(path))
    }

    fn decode(&self, full_path: &Path) -> Result<TextureAsset, AssetError> {
        if !full_path.exists() {
            return Err(AssetError::NotFound(full_path.to_path_buf()));
        }
        texture::load_texture(full_path)
    }

    /// Store an already decoded texture.
    pub fn insert_texture(&mut self, tex: TextureAsset) -> TextureHandle {
        let handle = self.allocate();
        self.textures.insert(handle.id(), tex);
        handle
    }

    pub fn get_texture(&self, handle: TextureHandle) -> Option<&TextureAsset> {
        self.textures.get(&handle.id())
    }

    /// Pixel dimensions of a loaded texture.
    pub fn texture_size(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.get_texture(handle).map(|tex| (tex.width, tex.height))
    }

    pub fn is_texture_loaded(&self, handle: TextureHandle) -> bool {
        self.textures.contains_key(&handle.id())
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32) -> TextureAsset {
        TextureAsset::from_rgba(width, height, vec![255; (width * height * 4) as usize]).unwrap()
    }

    #[test]
    fn missing_texture_returns_not_found() {
        let mut server = AssetServer::new("/nonexistent");
        match server.load_texture(Path::new("dough.png")) {
            Err(AssetError::NotFound(path)) => {
                assert_eq!(path, PathBuf::from("/nonexistent/dough.png"));
            }
            other => panic!("expected NotFound, got: {:?}", other),
        }
    }

    #[test]
    fn missing_image_returns_not_found() {
        let server = AssetServer::new("/nonexistent");
        assert!(matches!(
            server.load_image(Path::new("map.png")),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn inserted_textures_get_distinct_handles() {
        let mut server = AssetServer::new("assets");
        let a = server.insert_texture(solid(2, 2));
        let b = server.insert_texture(solid(4, 1));
        assert_ne!(a, b);
        assert_eq!(server.texture_size(a), Some((2, 2)));
        assert_eq!(server.texture_size(b), Some((4, 1)));
        assert_eq!(server.texture_count(), 2);
        assert!(!server.is_texture_loaded(TextureHandle::from_raw(99)));
    }

    #[test]
    fn resolve_relative_and_absolute_paths() {
        let server = AssetServer::new("/home/user/assets");
        assert_eq!(
            server.resolve(Path::new("tiles.png")),
            PathBuf::from("/home/user/assets/tiles.png")
        );
        assert_eq!(
            server.resolve(Path::new("/abs/tiles.png")),
            PathBuf::from("/abs/tiles.png")
        );
    }
}

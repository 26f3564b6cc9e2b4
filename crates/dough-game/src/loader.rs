use std::path::Path;

use dough_assets::{AssetError, AssetServer, TextureAsset, TextureHandle};

/// What setup systems need from the platform to get at image files.
pub trait TextureLoader {
    /// Load an image as a drawable texture.
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, AssetError>;

    /// Pixel size of a texture previously returned by `load_texture`.
    fn texture_size(&self, handle: TextureHandle) -> Option<(u32, u32)>;

    /// Decode an image for reading its pixels.
    fn load_image(&mut self, path: &Path) -> Result<TextureAsset, AssetError>;
}

impl TextureLoader for AssetServer {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, AssetError> {
        AssetServer::load_texture(self, path)
    }

    fn texture_size(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        AssetServer::texture_size(self, handle)
    }

    fn load_image(&mut self, path: &Path) -> Result<TextureAsset, AssetError> {
        AssetServer::load_image(self, path)
    }
}

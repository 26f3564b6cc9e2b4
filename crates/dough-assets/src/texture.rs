use std::path::Path;

use crate::error::AssetError;
use crate::handle::AssetHandle;

/// Handle to a texture stored in an [`AssetServer`](crate::AssetServer).
pub type TextureHandle = AssetHandle<TextureAsset>;

/// A decoded RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureAsset {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA bytes, four per pixel.
    pub data: Vec<u8>,
}

impl TextureAsset {
    /// Wrap raw RGBA bytes, checking they cover `width * height` pixels.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AssetError> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(AssetError::InvalidDimensions {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a texture from packed `0xAARRGGBB` pixels.
    pub fn from_argb_pixels(width: u32, height: u32, pixels: &[u32]) -> Result<Self, AssetError> {
        let data = pixels
            .iter()
            .flat_map(|&p| {
                [
                    (p >> 16) as u8,
                    (p >> 8) as u8,
                    p as u8,
                    (p >> 24) as u8,
                ]
            })
            .collect();
        Self::from_rgba(width, height, data)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw pixel by row-major linear index, packed as `0xAARRGGBB`.
    pub fn pixel(&self, index: usize) -> Option<u32> {
        let offset = index.checked_mul(4)?;
        let bytes = self.data.get(offset..offset.checked_add(4)?)?;
        Some(
            (bytes[3] as u32) << 24
                | (bytes[0] as u32) << 16
                | (bytes[1] as u32) << 8
                | bytes[2] as u32,
        )
    }

    /// RGBA bytes of the pixel at `(x, y)`.
    pub fn rgba_at(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let bytes = self.data.get(offset..offset + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

/// Load an image file and return it as an RGBA8 texture.
pub fn load_texture(path: &Path) -> Result<TextureAsset, AssetError> {
    let img = image::open(path)
        .map_err(|e| AssetError::ImageLoadFailed(path.to_path_buf(), e.to_string()))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    TextureAsset::from_rgba(width, height, rgba.into_raw())
}

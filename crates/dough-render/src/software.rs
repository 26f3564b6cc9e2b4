use std::path::Path;

use dough_assets::{AssetServer, TextureAsset, TextureHandle};
use dough_core::{Color, Rect};
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::error::RenderError;
use crate::surface::Surface;

/// CPU compositor drawing into an in-memory RGBA frame.
///
/// Owns the [`AssetServer`] its textures come from, so it plays the role of
/// both texture loader and drawing surface for headless runs.
pub struct SoftwareSurface {
    assets: AssetServer,
    frame: RgbaImage,
    presented: u64,
}

impl SoftwareSurface {
    pub fn new(width: u32, height: u32, assets: AssetServer) -> Self {
        Self {
            assets,
            frame: RgbaImage::from_pixel(width, height, Rgba(Color::BLACK.to_bytes())),
            presented: 0,
        }
    }

    pub fn assets(&self) -> &AssetServer {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetServer {
        &mut self.assets
    }

    /// The frame as composited so far.
    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Write the current frame to an image file; the format follows the
    /// extension.
    pub fn save_frame(&self, path: &Path) -> Result<(), RenderError> {
        self.frame
            .save(path)
            .map_err(|e| RenderError::SaveFailed(path.to_path_buf(), e.to_string()))
    }
}

/// Source-over blend of one texel onto the frame.
fn blend_pixel(frame: &mut RgbaImage, x: u32, y: u32, src: [u8; 4]) {
    let alpha = src[3] as u32;
    if alpha == 0 {
        return;
    }
    let dst = frame.get_pixel_mut(x, y);
    if alpha == 255 {
        *dst = Rgba(src);
        return;
    }
    for channel in 0..3 {
        let blended = (src[channel] as u32 * alpha + dst.0[channel] as u32 * (255 - alpha)) / 255;
        dst.0[channel] = blended as u8;
    }
    dst.0[3] = 255;
}

/// Nearest-neighbour texel for destination offset `(dx, dy)` inside `dst`.
fn sample(tex: &TextureAsset, src: Rect, dst: Rect, dx: i32, dy: i32) -> Option<[u8; 4]> {
    let sx = src.x as i64 + dx as i64 * src.w as i64 / dst.w as i64;
    let sy = src.y as i64 + dy as i64 * src.h as i64 / dst.h as i64;
    if sx < 0 || sy < 0 {
        return None;
    }
    tex.rgba_at(u32::try_from(sx).ok()?, u32::try_from(sy).ok()?)
}

impl Surface for SoftwareSurface {
    fn size(&self) -> (u32, u32) {
        self.frame.dimensions()
    }

    fn clear(&mut self, color: Color) {
        let fill = Rgba(color.to_bytes());
        for pixel in self.frame.pixels_mut() {
            *pixel = fill;
        }
    }

    fn copy(&mut self, texture: TextureHandle, src: Rect, dst: Rect) -> Result<(), RenderError> {
        if src.is_empty() || dst.is_empty() {
            return Ok(());
        }
        let bounds = self.bounds();
        if !bounds.intersects(&dst) {
            return Ok(());
        }

        let tex = self
            .assets
            .get_texture(texture)
            .ok_or(RenderError::MissingTexture(texture))?;

        let x0 = dst.x.max(0);
        let y0 = dst.y.max(0);
        let x1 = dst.right().min(bounds.right());
        let y1 = dst.bottom().min(bounds.bottom());
        for y in y0..y1 {
            for x in x0..x1 {
                // Source texels outside the texture are skipped, not errors.
                if let Some(texel) = sample(tex, src, dst, x - dst.x, y - dst.y) {
                    blend_pixel(&mut self.frame, x as u32, y as u32, texel);
                }
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.presented += 1;
        debug!("Presented frame {}", self.presented);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xFFFF_0000;
    const BLUE: u32 = 0xFF00_00FF;

    fn surface_with_checker() -> (SoftwareSurface, TextureHandle) {
        let mut assets = AssetServer::new("assets");
        // 2x1 texture: red then blue.
        let tex = TextureAsset::from_argb_pixels(2, 1, &[RED, BLUE]).unwrap();
        let handle = assets.insert_texture(tex);
        (SoftwareSurface::new(8, 4, assets), handle)
    }

    fn pixel(surface: &SoftwareSurface, x: u32, y: u32) -> Color {
        let [r, g, b, a] = surface.frame().get_pixel(x, y).0;
        Color::rgba(r, g, b, a)
    }

    #[test]
    fn copy_scales_source_into_destination() {
        let (mut surface, tex) = surface_with_checker();
        surface.clear(Color::WHITE);
        surface
            .copy(tex, Rect::new(0, 0, 2, 1), Rect::new(0, 0, 8, 4))
            .unwrap();

        assert_eq!(pixel(&surface, 0, 0), Color::from_argb(RED));
        assert_eq!(pixel(&surface, 3, 3), Color::from_argb(RED));
        assert_eq!(pixel(&surface, 4, 0), Color::from_argb(BLUE));
        assert_eq!(pixel(&surface, 7, 3), Color::from_argb(BLUE));
    }

    #[test]
    fn copy_clips_against_surface_edges() {
        let (mut surface, tex) = surface_with_checker();
        surface.clear(Color::WHITE);
        surface
            .copy(tex, Rect::new(1, 0, 1, 1), Rect::new(-2, -2, 4, 4))
            .unwrap();

        assert_eq!(pixel(&surface, 0, 0), Color::from_argb(BLUE));
        assert_eq!(pixel(&surface, 1, 1), Color::from_argb(BLUE));
        assert_eq!(pixel(&surface, 2, 0), Color::WHITE);
        assert_eq!(pixel(&surface, 0, 2), Color::WHITE);
    }

    #[test]
    fn transparent_texels_leave_background() {
        let mut assets = AssetServer::new("assets");
        let tex = assets.insert_texture(TextureAsset::from_argb_pixels(1, 1, &[0x0000_00FF]).unwrap());
        let mut surface = SoftwareSurface::new(2, 2, assets);
        surface.clear(Color::WHITE);
        surface.copy(tex, Rect::square(0, 0, 1), Rect::square(0, 0, 2)).unwrap();
        assert_eq!(pixel(&surface, 1, 1), Color::WHITE);
    }

    #[test]
    fn unknown_texture_is_an_error() {
        let (mut surface, _) = surface_with_checker();
        let result = surface.copy(
            TextureHandle::from_raw(404),
            Rect::square(0, 0, 1),
            Rect::square(0, 0, 1),
        );
        assert!(matches!(result, Err(RenderError::MissingTexture(_))));
    }

    #[test]
    fn offscreen_copy_is_skipped() {
        let (mut surface, _) = surface_with_checker();
        // Even an unknown texture is fine when nothing would be drawn.
        let result = surface.copy(
            TextureHandle::from_raw(404),
            Rect::square(0, 0, 1),
            Rect::square(100, 100, 4),
        );
        assert!(result.is_ok());
        surface.present().unwrap();
        assert_eq!(surface.presented(), 1);
    }
}

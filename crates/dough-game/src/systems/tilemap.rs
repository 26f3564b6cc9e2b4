//! Tile map: decoded once at setup, drawn every frame
//!
//! A map is authored as an image. Each pixel selects one 16x16 cell of the
//! atlas: red is the column, green the row. Blue and alpha are ignored.

use std::path::PathBuf;
use std::sync::Arc;

use dough_assets::{TextureAsset, TextureHandle};
use dough_core::Rect;
use dough_render::Surface;
use tracing::{debug, info};

use crate::components::{Camera, Transform};
use crate::config::TileMapSettings;
use crate::error::SceneError;
use crate::loader::TextureLoader;
use crate::scene::SceneContext;
use crate::system::{RenderSystem, SetupSystem};

/// Edge length of one atlas cell, in texels.
pub const TILE_SIZE: i32 = 16;

/// Decoded tile map, shared between setup and render through a world
/// resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    /// Columns
    pub width: u32,
    /// Rows
    pub height: u32,
    pub atlas: TextureHandle,
    /// Atlas source rectangle per cell, row-major
    pub tiles: Vec<Rect>,
}

impl TileMap {
    /// Source rectangle of the cell at `(col, row)`.
    pub fn tile(&self, col: u32, row: u32) -> Option<Rect> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.tiles
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }
}

/// Map every pixel of `map` to its atlas source rectangle, row-major.
pub fn decode_tiles(map: &TextureAsset) -> Vec<Rect> {
    (0..map.pixel_count())
        .filter_map(|i| map.pixel(i))
        .map(|p| {
            let red = ((p >> 16) & 0xff) as i32;
            let green = ((p >> 8) & 0xff) as i32;
            Rect::square(red * TILE_SIZE, green * TILE_SIZE, TILE_SIZE)
        })
        .collect()
}

/// Loads the atlas and decodes the map image into a [`TileMap`] resource.
#[derive(Debug, Clone)]
pub struct TileMapSetupSystem {
    atlas_path: PathBuf,
    map_path: PathBuf,
}

impl TileMapSetupSystem {
    pub fn new(atlas_path: impl Into<PathBuf>, map_path: impl Into<PathBuf>) -> Self {
        Self {
            atlas_path: atlas_path.into(),
            map_path: map_path.into(),
        }
    }

    pub fn from_settings(settings: &TileMapSettings) -> Self {
        Self::new(settings.atlas.clone(), settings.map.clone())
    }
}

impl SetupSystem for TileMapSetupSystem {
    fn setup(
        &mut self,
        ctx: &mut SceneContext,
        loader: &mut dyn TextureLoader,
    ) -> Result<(), SceneError> {
        let atlas = loader.load_texture(&self.atlas_path)?;
        let map = loader.load_image(&self.map_path)?;

        let tile_map = TileMap {
            width: map.width,
            height: map.height,
            atlas,
            tiles: decode_tiles(&map),
        };
        info!(
            "Tile map '{}' decoded: {}x{} tiles",
            self.map_path.display(),
            tile_map.width,
            tile_map.height
        );
        ctx.world.insert_resource(Arc::new(tile_map));
        Ok(())
    }
}

/// Draws the tile map under the main camera.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileMapRenderSystem;

impl TileMapRenderSystem {
    pub fn new() -> Self {
        Self
    }
}

impl RenderSystem for TileMapRenderSystem {
    fn render(&mut self, ctx: &SceneContext, surface: &mut dyn Surface) -> Result<(), SceneError> {
        let tile_map = ctx
            .world
            .resource::<Arc<TileMap>>()
            .ok_or(SceneError::MissingTileMap)?;
        let camera_entity = ctx.main_camera()?;
        let camera = ctx.world.component::<Camera>(camera_entity)?;
        let origin = ctx.world.component::<Transform>(camera_entity)?;

        let step = TILE_SIZE * camera.zoom;
        let viewport = surface.bounds();
        let mut drawn = 0usize;
        for row in 0..tile_map.height {
            for col in 0..tile_map.width {
                let Some(src) = tile_map.tile(col, row) else {
                    continue;
                };
                let dst = Rect::square(
                    -origin.x + col as i32 * step,
                    -origin.y + row as i32 * step,
                    step,
                );
                if !viewport.intersects(&dst) {
                    continue;
                }
                surface.copy(tile_map.atlas, src, dst)?;
                drawn += 1;
            }
        }
        debug!("Drew {} of {} tiles", drawn, tile_map.tiles.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dough_render::RecordingSurface;

    use super::*;
    use crate::loader::testing::MemoryLoader;
    use crate::systems::CameraSetupSystem;

    #[test]
    fn decode_uses_red_and_green_only() {
        // pixel 0: r=1 g=0, pixel 1: r=0 g=2, with noise in blue and alpha
        let map = TextureAsset::from_argb_pixels(2, 1, &[0xFF01_00AB, 0x1200_02FF]).unwrap();
        assert_eq!(
            decode_tiles(&map),
            [Rect::new(16, 0, 16, 16), Rect::new(0, 32, 16, 16)]
        );
    }

    #[test]
    fn decode_large_channel_values() {
        let map = TextureAsset::from_argb_pixels(1, 1, &[0xFFFF_FF00]).unwrap();
        assert_eq!(decode_tiles(&map), [Rect::new(255 * 16, 255 * 16, 16, 16)]);
    }

    #[test]
    fn tile_lookup_is_row_major() {
        let map = TileMap {
            width: 2,
            height: 2,
            atlas: TextureHandle::from_raw(1),
            tiles: vec![
                Rect::square(0, 0, 16),
                Rect::square(16, 0, 16),
                Rect::square(0, 16, 16),
                Rect::square(16, 16, 16),
            ],
        };
        assert_eq!(map.tile(1, 0), Some(Rect::square(16, 0, 16)));
        assert_eq!(map.tile(0, 1), Some(Rect::square(0, 16, 16)));
        assert_eq!(map.tile(2, 0), None);
    }

    fn loaded_scene(map_pixels: &[u32], width: u32, height: u32) -> (SceneContext, MemoryLoader) {
        let mut loader = MemoryLoader::new()
            .with_argb("tiles.png", 64, 64, &vec![0xFFFF_FFFF; 64 * 64])
            .with_argb("map.png", width, height, map_pixels);
        let mut ctx = SceneContext::new();
        CameraSetupSystem::new(4, 128, 64, 1536, 1216)
            .setup(&mut ctx, &mut loader)
            .unwrap();
        TileMapSetupSystem::new("tiles.png", "map.png")
            .setup(&mut ctx, &mut loader)
            .unwrap();
        (ctx, loader)
    }

    #[test]
    fn setup_publishes_decoded_map() {
        let (ctx, loader) = loaded_scene(&[0xFF01_0000, 0xFF00_0200], 2, 1);
        let map = ctx.world.resource::<Arc<TileMap>>().unwrap();
        assert_eq!((map.width, map.height), (2, 1));
        assert_eq!(map.atlas, loader.handle("tiles.png").unwrap());
        assert_eq!(map.tiles, [Rect::new(16, 0, 16, 16), Rect::new(0, 32, 16, 16)]);
    }

    #[test]
    fn setup_fails_on_missing_map() {
        let mut loader = MemoryLoader::new().with_argb("tiles.png", 1, 1, &[0]);
        let mut ctx = SceneContext::new();
        let result = TileMapSetupSystem::new("tiles.png", "map.png").setup(&mut ctx, &mut loader);
        assert!(matches!(result, Err(SceneError::Asset(_))));
        assert!(ctx.world.resource::<Arc<TileMap>>().is_none());
    }

    #[test]
    fn render_offsets_by_camera_and_scales_by_zoom() {
        let (mut ctx, _) = loaded_scene(&[0xFF01_0000, 0xFF00_0200], 2, 1);
        let camera = ctx.main_camera().unwrap();
        *ctx.world.get_mut::<Transform>(camera).unwrap() = Transform::new(10, 5);

        let mut surface = RecordingSurface::new(128, 64);
        TileMapRenderSystem::new().render(&ctx, &mut surface).unwrap();

        let calls = surface.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].src, Rect::new(16, 0, 16, 16));
        assert_eq!(calls[0].dst, Rect::new(-10, -5, 64, 64));
        assert_eq!(calls[1].src, Rect::new(0, 32, 16, 16));
        assert_eq!(calls[1].dst, Rect::new(54, -5, 64, 64));
    }

    #[test]
    fn render_culls_tiles_outside_viewport() {
        // 4x3 map of 64px tiles seen through a 128x64 viewport
        let (mut ctx, _) = loaded_scene(&[0xFF00_0000; 12], 4, 3);
        let camera = ctx.main_camera().unwrap();
        *ctx.world.get_mut::<Transform>(camera).unwrap() = Transform::new(64, 64);

        let mut surface = RecordingSurface::new(128, 64);
        TileMapRenderSystem::new().render(&ctx, &mut surface).unwrap();

        let dsts: Vec<Rect> = surface.calls().iter().map(|call| call.dst).collect();
        assert_eq!(dsts, [Rect::new(0, 0, 64, 64), Rect::new(64, 0, 64, 64)]);
    }

    #[test]
    fn render_without_map_is_an_error() {
        let mut ctx = SceneContext::new();
        CameraSetupSystem::new(4, 128, 64, 1536, 1216)
            .setup(&mut ctx, &mut MemoryLoader::new())
            .unwrap();
        let mut surface = RecordingSurface::new(128, 64);
        let result = TileMapRenderSystem::new().render(&ctx, &mut surface);
        assert!(matches!(result, Err(SceneError::MissingTileMap)));
    }
}

//! Game configuration
//!
//! Every field has a default, so a settings file only needs the values it
//! changes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::systems::TILE_SIZE;

/// Top-level runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowSettings,
    /// Target frames per second (0 = unpaced)
    pub fps: u32,
    pub camera: CameraSettings,
    pub play_area: PlayArea,
    pub player: PlayerSettings,
    pub tile_map: TileMapSettings,
    /// Directory relative asset paths are resolved against
    pub asset_root: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            fps: 60,
            camera: CameraSettings::default(),
            play_area: PlayArea::default(),
            player: PlayerSettings::default(),
            tile_map: TileMapSettings::default(),
            asset_root: PathBuf::from("assets"),
        }
    }
}

/// Drawing surface settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Dough".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Camera and world extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub zoom: i32,
    /// Full scrollable world width in screen pixels
    pub world_width: i32,
    /// Full scrollable world height in screen pixels
    pub world_height: i32,
    /// Player-centering offset in unzoomed pixels
    pub follow_offset: i32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        let zoom = 4;
        Self {
            zoom,
            world_width: 24 * TILE_SIZE * zoom,
            world_height: 19 * TILE_SIZE * zoom,
            follow_offset: 12,
        }
    }
}

/// Open rectangle a moving entity must stay strictly inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayArea {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl PlayArea {
    pub fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Whether `(x, y)` lies strictly inside the bounds.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.min_x < x && x < self.max_x && self.min_y < y && y < self.max_y
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::new(130, 1200, 245, 890)
    }
}

/// Player character settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Sprite sheet, relative to the asset root
    pub sprite: PathBuf,
    pub sprite_size: i32,
    pub spawn_x: i32,
    pub spawn_y: i32,
    /// Walking speed in world units per second
    pub speed: i32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            sprite: PathBuf::from("dough.png"),
            sprite_size: 50,
            spawn_x: 200,
            spawn_y: 250,
            speed: 400,
        }
    }
}

/// Tile map image files, relative to the asset root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileMapSettings {
    pub atlas: PathBuf,
    pub map: PathBuf,
}

impl Default for TileMapSettings {
    fn default() -> Self {
        Self {
            atlas: PathBuf::from("tiles.png"),
            map: PathBuf::from("map.png"),
        }
    }
}

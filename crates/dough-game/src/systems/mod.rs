//! Concrete systems for the top-down walking game

mod camera;
mod character;
mod follow;
mod input;
mod movement;
mod sprite;
mod tilemap;

pub use camera::CameraSetupSystem;
pub use character::CharacterSetupSystem;
pub use follow::CameraFollowUpdateSystem;
pub use input::PlayerInputSystem;
pub use movement::MovementUpdateSystem;
pub use sprite::SpriteRenderSystem;
pub use tilemap::{decode_tiles, TileMap, TileMapRenderSystem, TileMapSetupSystem, TILE_SIZE};

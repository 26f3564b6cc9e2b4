//! Dough Game - Scene, systems and the game loop
//!
//! A [`Scene`] owns a [`World`](dough_ecs::World) and four ordered lists of
//! systems (setup, input, update, render). The [`Game`] driver paces frames
//! and feeds each phase in turn.

pub mod components;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod loader;
pub mod scene;
pub mod system;
pub mod systems;

pub use components::{Camera, Movement, Name, Sprite, Transform};
pub use config::{
    CameraSettings, GameConfig, PlayArea, PlayerSettings, TileMapSettings, WindowSettings,
};
pub use error::SceneError;
pub use game::Game;
pub use input::{EventSource, InputEvent};
pub use loader::TextureLoader;
pub use scene::{Scene, SceneContext};
pub use system::{InputSystem, RenderSystem, SetupSystem, UpdateSystem};
pub use systems::{
    CameraFollowUpdateSystem, CameraSetupSystem, CharacterSetupSystem, MovementUpdateSystem,
    PlayerInputSystem, SpriteRenderSystem, TileMap, TileMapRenderSystem, TileMapSetupSystem,
};

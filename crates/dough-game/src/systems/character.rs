use std::path::PathBuf;

use tracing::{debug, warn};

use crate::components::{Movement, Sprite};
use crate::config::PlayerSettings;
use crate::error::SceneError;
use crate::loader::TextureLoader;
use crate::scene::SceneContext;
use crate::system::SetupSystem;

/// Loads the player sprite and spawns the player entity.
///
/// Must run after [`CameraSetupSystem`](super::CameraSetupSystem): a player
/// without a camera to follow it is a configuration error.
#[derive(Debug, Clone)]
pub struct CharacterSetupSystem {
    sprite_path: PathBuf,
    sprite_size: i32,
    spawn: (i32, i32),
}

impl CharacterSetupSystem {
    pub fn new(sprite_path: impl Into<PathBuf>, spawn: (i32, i32), sprite_size: i32) -> Self {
        Self {
            sprite_path: sprite_path.into(),
            sprite_size,
            spawn,
        }
    }

    pub fn from_settings(player: &PlayerSettings) -> Self {
        Self::new(
            player.sprite.clone(),
            (player.spawn_x, player.spawn_y),
            player.sprite_size,
        )
    }
}

impl SetupSystem for CharacterSetupSystem {
    fn setup(
        &mut self,
        ctx: &mut SceneContext,
        loader: &mut dyn TextureLoader,
    ) -> Result<(), SceneError> {
        ctx.main_camera()?;
        let size = u32::try_from(self.sprite_size)
            .ok()
            .filter(|&size| size > 0)
            .ok_or(SceneError::InvalidSpriteSize(self.sprite_size))?;

        let texture = loader.load_texture(&self.sprite_path)?;
        if let Some((width, height)) = loader.texture_size(texture) {
            if width < size || height < size {
                warn!(
                    "Player sprite '{}' is {}x{}, smaller than the {}px frame",
                    self.sprite_path.display(),
                    width,
                    height,
                    size
                );
            }
        }

        let (x, y) = self.spawn;
        let player = ctx
            .create_entity("PLAYER", x, y)
            .with(Movement::new(0, 0))
            .with(Sprite::new(0, 0, self.sprite_size, texture))
            .id();
        ctx.player = Some(player);
        debug!("Player {} spawned at ({}, {})", player, x, y);
        Ok(())
    }
}

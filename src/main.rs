//! Dough - a small top-down 2D game on an ECS runtime
//!
//! Runs the walking scene headless: input comes from a script in the
//! settings file and the final frame is written out as an image.
//!
//! Usage: `dough [SETTINGS]` or `dough --write-settings [SETTINGS]`

mod script;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use dough_assets::AssetServer;
use dough_game::{
    CameraFollowUpdateSystem, CameraSetupSystem, CharacterSetupSystem, Game, GameConfig,
    MovementUpdateSystem, PlayerInputSystem, Scene, SpriteRenderSystem, TileMapRenderSystem,
    TileMapSetupSystem,
};
use dough_render::SoftwareSurface;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::script::ScriptedEvents;
use crate::settings::Settings;

/// Build the walking scene. Registration order matters: the camera must
/// exist before the player, movement runs before the camera follows, and
/// tiles are drawn under sprites.
fn build_scene(config: &GameConfig) -> Scene {
    Scene::new(config.window.title.clone())
        .with_setup_system(CameraSetupSystem::from_settings(&config.window, &config.camera))
        .with_setup_system(TileMapSetupSystem::from_settings(&config.tile_map))
        .with_setup_system(CharacterSetupSystem::from_settings(&config.player))
        .with_input_system(PlayerInputSystem::new(config.player.speed))
        .with_update_system(MovementUpdateSystem::new(config.play_area))
        .with_update_system(CameraFollowUpdateSystem::new(config.camera.follow_offset))
        .with_render_system(TileMapRenderSystem::new())
        .with_render_system(SpriteRenderSystem::new())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Invalid log level")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut write_settings = false;
    let mut settings_path: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        if arg == "--write-settings" {
            write_settings = true;
        } else {
            settings_path = Some(PathBuf::from(arg));
        }
    }

    let (settings, origin) = Settings::load(settings_path.as_deref());
    init_logging(&settings.log_level)?;
    origin.report();

    if write_settings {
        let path = settings_path
            .or_else(Settings::default_path)
            .context("Could not determine config directory")?;
        return settings.save(&path);
    }

    let config = &settings.game;
    info!(
        "Starting Dough: {}x{} at {} fps",
        config.window.width, config.window.height, config.fps
    );

    let assets = AssetServer::new(&config.asset_root);
    let mut surface = SoftwareSurface::new(config.window.width, config.window.height, assets);

    let mut scene = build_scene(config);
    scene
        .setup(surface.assets_mut())
        .context("Failed to set up scene")?;

    let mut events = ScriptedEvents::new(&settings.headless.script);
    let mut game = Game::new(config.fps);
    if settings.headless.frames > 0 {
        game = game.with_frame_limit(settings.headless.frames);
    }
    game.run(&mut scene, &mut events, &mut surface)
        .context("Game loop failed")?;

    if let Some(path) = &settings.headless.screenshot {
        surface
            .save_frame(path)
            .with_context(|| format!("Failed to save screenshot to {:?}", path))?;
        info!("Saved last frame to {:?}", path);
    }

    info!("Dough shutting down");
    Ok(())
}

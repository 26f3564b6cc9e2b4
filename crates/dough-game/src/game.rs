//! Fixed-FPS game loop

use dough_core::{Clock, Color, FramePacer, SystemClock};
use dough_render::Surface;
use tracing::{error, info};

use crate::error::SceneError;
use crate::input::EventSource;
use crate::scene::Scene;

/// Drives a scene frame by frame: input, update, render, then sleep out the
/// rest of the frame.
///
/// Owns nothing but the pacer; the scene, the event source and the surface
/// are passed in by the caller.
pub struct Game<C: Clock = SystemClock> {
    pacer: FramePacer<C>,
    frame_limit: Option<u64>,
}

/// Background every frame starts from.
const CLEAR_COLOR: Color = Color::WHITE;

impl Game<SystemClock> {
    pub fn new(fps: u32) -> Self {
        Self::with_pacer(FramePacer::new(fps))
    }
}

impl<C: Clock> Game<C> {
    pub fn with_clock(fps: u32, clock: C) -> Self {
        Self::with_pacer(FramePacer::with_clock(fps, clock))
    }

    fn with_pacer(pacer: FramePacer<C>) -> Self {
        Self {
            pacer,
            frame_limit: None,
        }
    }

    /// Stop after `frames` frames even without a quit event.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    pub fn pacer(&self) -> &FramePacer<C> {
        &self.pacer
    }

    /// Run until a quit event arrives or the frame limit is reached.
    ///
    /// Input and update errors end the loop and are returned. A render
    /// error that only concerns drawing drops the current frame; any other
    /// render error ends the loop like an update error.
    pub fn run(
        &mut self,
        scene: &mut Scene,
        events: &mut dyn EventSource,
        surface: &mut dyn Surface,
    ) -> Result<(), SceneError> {
        info!(
            "Running scene '{}' at {:.1} ms per frame",
            scene.name(),
            self.pacer.target_frame_duration().as_secs_f64() * 1000.0
        );

        loop {
            let keep_running = self.frame(scene, events, surface)?;
            let limit_reached = self
                .frame_limit
                .is_some_and(|limit| self.pacer.frame_count() >= limit);
            if !keep_running || limit_reached {
                break;
            }
        }

        info!("Stopped after {} frames", self.pacer.frame_count());
        Ok(())
    }

    /// Run a single frame. Returns `false` once a quit event was seen; the
    /// frame that saw it still completes.
    pub fn frame(
        &mut self,
        scene: &mut Scene,
        events: &mut dyn EventSource,
        surface: &mut dyn Surface,
    ) -> Result<bool, SceneError> {
        let dt = self.pacer.frame_start();

        let mut keep_running = true;
        while let Some(event) = events.poll_event() {
            scene.input(&event)?;
            if event.is_quit() {
                keep_running = false;
                break;
            }
        }

        scene.update(dt)?;

        surface.clear(CLEAR_COLOR);
        match scene.render(surface) {
            Ok(()) => {
                if let Err(e) = surface.present() {
                    error!("Failed to present frame {}: {}", self.pacer.frame_count(), e);
                }
            }
            Err(e) if e.drops_frame() => {
                error!("Frame {} dropped: {}", self.pacer.frame_count(), e)
            }
            Err(e) => return Err(e),
        }

        self.pacer.frame_end();
        Ok(keep_running)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use dough_assets::TextureHandle;
    use dough_core::ManualClock;
    use dough_render::{RecordingSurface, RenderError, SoftwareSurface};
    use winit::keyboard::KeyCode;

    use super::*;
    use crate::components::Transform;
    use crate::config::PlayArea;
    use crate::input::InputEvent;
    use crate::loader::testing::MemoryLoader;
    use crate::scene::SceneContext;
    use crate::systems::*;

    fn manual_game(fps: u32) -> Game<ManualClock> {
        Game::with_clock(fps, ManualClock::new())
    }

    fn no_events() -> VecDeque<InputEvent> {
        VecDeque::new()
    }

    #[test]
    fn frames_are_paced_to_target() {
        let dts = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&dts);
        let mut scene = Scene::new("paced");
        scene.add_update_system(move |_: &mut SceneContext, dt: f64| -> Result<(), SceneError> {
            seen.borrow_mut().push(dt);
            Ok(())
        });

        let mut game = manual_game(50).with_frame_limit(3);
        let mut surface = RecordingSurface::new(16, 16);
        game.run(&mut scene, &mut no_events(), &mut surface).unwrap();

        let target = game.pacer().target_frame_duration();
        assert_eq!(game.pacer().frame_count(), 3);
        assert_eq!(game.pacer().clock().total_slept(), target * 3);
        assert_eq!(surface.presented(), 3);
        assert_eq!(surface.clear_color(), Some(Color::WHITE));

        let dts = dts.borrow();
        assert_eq!(dts[0], 0.0);
        assert!((dts[1] - 0.02).abs() < 1e-9);
        assert!((dts[2] - 0.02).abs() < 1e-9);
        assert_eq!(game.pacer().delta_time(), dts[2]);
    }

    #[test]
    fn quit_event_stops_the_loop() {
        let keys = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&keys);
        let mut scene = Scene::new("quit");
        scene.add_input_system(
            move |_: &mut SceneContext, event: &InputEvent| -> Result<(), SceneError> {
                seen.borrow_mut().push(*event);
                Ok(())
            },
        );

        let mut events: VecDeque<InputEvent> = [
            InputEvent::KeyDown(KeyCode::KeyD),
            InputEvent::Quit,
            InputEvent::KeyUp(KeyCode::KeyD),
        ]
        .into_iter()
        .collect();
        let mut game = manual_game(60);
        let mut surface = RecordingSurface::new(16, 16);
        game.run(&mut scene, &mut events, &mut surface).unwrap();

        assert_eq!(game.pacer().frame_count(), 1);
        assert_eq!(
            *keys.borrow(),
            [InputEvent::KeyDown(KeyCode::KeyD), InputEvent::Quit]
        );
        // The frame that saw the quit still renders.
        assert_eq!(surface.presented(), 1);
    }

    #[test]
    fn render_error_drops_frame_and_continues() {
        let mut scene = Scene::new("broken render");
        scene.add_render_system(
            |_: &SceneContext, _: &mut dyn Surface| -> Result<(), SceneError> {
                Err(RenderError::MissingTexture(TextureHandle::from_raw(9)).into())
            },
        );

        let mut game = manual_game(60).with_frame_limit(2);
        let mut surface = RecordingSurface::new(16, 16);
        game.run(&mut scene, &mut no_events(), &mut surface).unwrap();

        assert_eq!(game.pacer().frame_count(), 2);
        assert_eq!(surface.presented(), 0);
    }

    #[test]
    fn broken_render_contract_ends_the_run() {
        use dough_ecs::EcsError;

        // A main camera with a position but no Camera component.
        let mut scene = Scene::new("camera without lens")
            .with_render_system(SpriteRenderSystem::new());
        let camera = scene.context_mut().world.spawn_mut().with(Transform::new(0, 0)).id();
        scene.context_mut().main_camera = Some(camera);

        let mut game = manual_game(60).with_frame_limit(5);
        let mut surface = RecordingSurface::new(16, 16);
        let result = game.run(&mut scene, &mut no_events(), &mut surface);

        assert!(matches!(
            result,
            Err(SceneError::Ecs(EcsError::MissingComponent { component: "Camera", .. }))
        ));
        assert!(game.pacer().frame_count() < 5);
        assert_eq!(surface.presented(), 0);
    }

    #[test]
    fn update_error_ends_the_run() {
        let mut scene = Scene::new("broken update");
        scene.add_update_system(|_: &mut SceneContext, _: f64| -> Result<(), SceneError> {
            Err(SceneError::MissingPlayer)
        });

        let mut game = manual_game(60).with_frame_limit(5);
        let mut surface = RecordingSurface::new(16, 16);
        let result = game.run(&mut scene, &mut no_events(), &mut surface);

        assert!(matches!(result, Err(SceneError::MissingPlayer)));
        assert_eq!(surface.presented(), 0);
    }

    const RED: u32 = 0xFFFF_0000;
    const BLUE: u32 = 0xFF00_00FF;

    /// The walking scene, set up against in-memory assets: a red player
    /// sprite standing on a map of blue tiles.
    fn walking_scene(sprites_on_top: bool) -> (Scene, SoftwareSurface) {
        let mut loader = MemoryLoader::new()
            .with_argb("dough.png", 50, 50, &[RED; 50 * 50])
            .with_argb("tiles.png", 16, 16, &[BLUE; 16 * 16])
            .with_argb("map.png", 24, 19, &[0xFF00_0000; 24 * 19]);
        let mut scene = Scene::new("walk")
            .with_setup_system(CameraSetupSystem::new(4, 320, 180, 1536, 1216))
            .with_setup_system(TileMapSetupSystem::new("tiles.png", "map.png"))
            .with_setup_system(CharacterSetupSystem::new("dough.png", (200, 250), 50))
            .with_input_system(PlayerInputSystem::new(400))
            .with_update_system(MovementUpdateSystem::new(PlayArea::default()))
            .with_update_system(CameraFollowUpdateSystem::new(12));
        if sprites_on_top {
            scene.add_render_system(TileMapRenderSystem::new());
            scene.add_render_system(SpriteRenderSystem::new());
        } else {
            scene.add_render_system(SpriteRenderSystem::new());
            scene.add_render_system(TileMapRenderSystem::new());
        }
        scene.setup(&mut loader).unwrap();
        (scene, SoftwareSurface::new(320, 180, loader.into_server()))
    }

    #[test]
    fn walking_scene_end_to_end() {
        let (mut scene, mut surface) = walking_scene(true);
        let mut events: VecDeque<InputEvent> =
            [InputEvent::KeyDown(KeyCode::KeyD)].into_iter().collect();
        let mut game = manual_game(50).with_frame_limit(3);
        game.run(&mut scene, &mut events, &mut surface).unwrap();

        // dt is 0, 0.02, 0.02: two steps of 8px
        let ctx = scene.context();
        let player = ctx.world.get::<Transform>(ctx.player.unwrap()).copied();
        let camera = ctx.world.get::<Transform>(ctx.main_camera.unwrap()).copied();
        assert_eq!(player, Some(Transform::new(216, 250)));
        // 216 - 160 + 48, 250 - 90 + 48
        assert_eq!(camera, Some(Transform::new(104, 208)));

        // Sprite lands at (112, 42) on screen, over the tiles.
        let frame = surface.frame();
        assert_eq!(frame.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(frame.get_pixel(120, 50).0, [255, 0, 0, 255]);
        assert_eq!(surface.presented(), 3);
    }

    #[test]
    fn sprites_registered_before_tiles_are_painted_over() {
        let (mut scene, mut surface) = walking_scene(false);
        let mut game = manual_game(50).with_frame_limit(1);
        game.run(&mut scene, &mut no_events(), &mut surface).unwrap();

        // The player still stands at (112, 42) on screen, but under the tiles.
        let ctx = scene.context();
        let camera = ctx.world.get::<Transform>(ctx.main_camera.unwrap()).copied();
        assert_eq!(camera, Some(Transform::new(88, 208)));
        assert_eq!(surface.frame().get_pixel(120, 50).0, [0, 0, 255, 255]);
        assert_eq!(surface.presented(), 1);
    }
}

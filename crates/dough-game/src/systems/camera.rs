use tracing::debug;

use crate::components::Camera;
use crate::config::{CameraSettings, WindowSettings};
use crate::error::SceneError;
use crate::loader::TextureLoader;
use crate::scene::SceneContext;
use crate::system::SetupSystem;

/// Creates the scene's main camera at the world origin.
#[derive(Debug, Clone, Copy)]
pub struct CameraSetupSystem {
    camera: Camera,
}

impl CameraSetupSystem {
    pub fn new(zoom: i32, vw: i32, vh: i32, ww: i32, wh: i32) -> Self {
        Self {
            camera: Camera::new(zoom, vw, vh, ww, wh),
        }
    }

    pub fn from_settings(window: &WindowSettings, camera: &CameraSettings) -> Self {
        Self::new(
            camera.zoom,
            window.width as i32,
            window.height as i32,
            camera.world_width,
            camera.world_height,
        )
    }
}

impl SetupSystem for CameraSetupSystem {
    fn setup(&mut self, ctx: &mut SceneContext, _: &mut dyn TextureLoader) -> Result<(), SceneError> {
        let camera = ctx.create_entity("CAMERA", 0, 0).with(self.camera).id();
        ctx.main_camera = Some(camera);
        debug!("Camera {} with viewport {}x{}", camera, self.camera.vw, self.camera.vh);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Name, Transform};
    use crate::loader::testing::MemoryLoader;

    #[test]
    fn creates_camera_at_origin() {
        let mut ctx = SceneContext::new();
        let mut system = CameraSetupSystem::new(4, 1280, 720, 1536, 1216);
        system.setup(&mut ctx, &mut MemoryLoader::new()).unwrap();

        let camera = ctx.main_camera().unwrap();
        assert_eq!(ctx.world.get::<Transform>(camera), Some(&Transform::new(0, 0)));
        assert_eq!(
            ctx.world.get::<Camera>(camera),
            Some(&Camera::new(4, 1280, 720, 1536, 1216))
        );
        assert_eq!(ctx.world.get::<Name>(camera).map(Name::as_str), Some("CAMERA"));
    }

    #[test]
    fn settings_fill_viewport_from_window() {
        let system =
            CameraSetupSystem::from_settings(&WindowSettings::default(), &CameraSettings::default());
        assert_eq!(system.camera, Camera::new(4, 1280, 720, 1536, 1216));
    }
}

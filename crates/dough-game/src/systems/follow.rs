use crate::components::{Camera, Transform};
use crate::error::SceneError;
use crate::scene::SceneContext;
use crate::system::UpdateSystem;

/// Keeps the main camera centred on the player.
///
/// Each axis is clamped on its own: when the centred position would show
/// past the world edge on one axis, the camera holds that axis and still
/// tracks the other. Register after [`MovementUpdateSystem`](super::MovementUpdateSystem)
/// so the camera sees this frame's position.
#[derive(Debug, Clone, Copy)]
pub struct CameraFollowUpdateSystem {
    /// Player-centering offset in unzoomed pixels
    offset: i32,
}

impl CameraFollowUpdateSystem {
    pub fn new(offset: i32) -> Self {
        Self { offset }
    }
}

impl Default for CameraFollowUpdateSystem {
    fn default() -> Self {
        Self::new(12)
    }
}

/// Accept `target` when it keeps the viewport inside `[0, world - view]`.
fn clamp_axis(current: i32, target: i32, view: i32, world: i32) -> i32 {
    if (0..=world - view).contains(&target) {
        target
    } else {
        current
    }
}

impl UpdateSystem for CameraFollowUpdateSystem {
    fn update(&mut self, ctx: &mut SceneContext, _dt: f64) -> Result<(), SceneError> {
        let player = ctx.player()?;
        let camera_entity = ctx.main_camera()?;

        let target = *ctx.world.component::<Transform>(player)?;
        let camera = *ctx.world.component::<Camera>(camera_entity)?;
        let position = ctx.world.component_mut::<Transform>(camera_entity)?;

        let shift = self.offset * camera.zoom;
        let px = target.x - camera.vw / 2 + shift;
        let py = target.y - camera.vh / 2 + shift;
        position.x = clamp_axis(position.x, px, camera.vw, camera.ww);
        position.y = clamp_axis(position.y, py, camera.vh, camera.wh);
        Ok(())
    }
}

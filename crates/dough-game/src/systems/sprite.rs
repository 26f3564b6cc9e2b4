use dough_core::Rect;
use dough_render::Surface;

use crate::components::{Camera, Sprite, Transform};
use crate::error::SceneError;
use crate::scene::SceneContext;
use crate::system::RenderSystem;

/// Draws every sprite relative to the main camera, scaled by its zoom.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteRenderSystem;

impl SpriteRenderSystem {
    pub fn new() -> Self {
        Self
    }
}

impl RenderSystem for SpriteRenderSystem {
    fn render(&mut self, ctx: &SceneContext, surface: &mut dyn Surface) -> Result<(), SceneError> {
        let camera_entity = ctx.main_camera()?;
        let camera = ctx.world.component::<Camera>(camera_entity)?;
        let origin = ctx.world.component::<Transform>(camera_entity)?;

        for (_, (transform, sprite)) in ctx.world.query::<(&Transform, &Sprite)>() {
            let src = Rect::square(sprite.x, sprite.y, sprite.size);
            let dst = Rect::square(
                transform.x - origin.x,
                transform.y - origin.y,
                camera.zoom * sprite.size,
            );
            surface.copy(sprite.texture, src, dst)?;
        }
        Ok(())
    }
}

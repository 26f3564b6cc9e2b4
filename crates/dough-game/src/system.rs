//! System traits, one per pipeline phase
//!
//! A scene holds each category in its own ordered list and runs them in
//! registration order. Closures with the matching signature are systems too.

use dough_render::Surface;

use crate::error::SceneError;
use crate::input::InputEvent;
use crate::loader::TextureLoader;
use crate::scene::SceneContext;

/// Runs once when the scene is set up, before the first frame.
pub trait SetupSystem {
    fn setup(
        &mut self,
        ctx: &mut SceneContext,
        loader: &mut dyn TextureLoader,
    ) -> Result<(), SceneError>;
}

/// Runs once for every input event.
pub trait InputSystem {
    fn input(&mut self, ctx: &mut SceneContext, event: &InputEvent) -> Result<(), SceneError>;
}

/// Runs once per frame with the elapsed time in seconds.
pub trait UpdateSystem {
    fn update(&mut self, ctx: &mut SceneContext, dt: f64) -> Result<(), SceneError>;
}

/// Runs once per frame to draw. Sees the scene read-only.
pub trait RenderSystem {
    fn render(&mut self, ctx: &SceneContext, surface: &mut dyn Surface) -> Result<(), SceneError>;
}

impl<F> SetupSystem for F
where
    F: FnMut(&mut SceneContext, &mut dyn TextureLoader) -> Result<(), SceneError>,
{
    fn setup(
        &mut self,
        ctx: &mut SceneContext,
        loader: &mut dyn TextureLoader,
    ) -> Result<(), SceneError> {
        (self)(ctx, loader)
    }
}

impl<F> InputSystem for F
where
    F: FnMut(&mut SceneContext, &InputEvent) -> Result<(), SceneError>,
{
    fn input(&mut self, ctx: &mut SceneContext, event: &InputEvent) -> Result<(), SceneError> {
        (self)(ctx, event)
    }
}

impl<F> UpdateSystem for F
where
    F: FnMut(&mut SceneContext, f64) -> Result<(), SceneError>,
{
    fn update(&mut self, ctx: &mut SceneContext, dt: f64) -> Result<(), SceneError> {
        (self)(ctx, dt)
    }
}

impl<F> RenderSystem for F
where
    F: FnMut(&SceneContext, &mut dyn Surface) -> Result<(), SceneError>,
{
    fn render(&mut self, ctx: &SceneContext, surface: &mut dyn Surface) -> Result<(), SceneError> {
        (self)(ctx, surface)
    }
}

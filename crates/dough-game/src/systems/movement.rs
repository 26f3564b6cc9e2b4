use tracing::trace;

use crate::components::{Movement, Transform};
use crate::config::PlayArea;
use crate::error::SceneError;
use crate::scene::SceneContext;
use crate::system::UpdateSystem;

/// Integrates velocity into position, keeping every moving entity strictly
/// inside the play area.
///
/// A step is all-or-nothing: if either coordinate of the target would leave
/// the play area, neither coordinate changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementUpdateSystem {
    bounds: PlayArea,
}

impl MovementUpdateSystem {
    pub fn new(bounds: PlayArea) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> PlayArea {
        self.bounds
    }
}

/// Target position after `dt` seconds, truncated toward zero.
fn step(transform: &Transform, movement: &Movement, dt: f64) -> (i32, i32) {
    let x = transform.x as f64 + movement.vx as f64 * dt;
    let y = transform.y as f64 + movement.vy as f64 * dt;
    (x as i32, y as i32)
}

impl UpdateSystem for MovementUpdateSystem {
    fn update(&mut self, ctx: &mut SceneContext, dt: f64) -> Result<(), SceneError> {
        for (entity, (transform, movement)) in
            ctx.world.query_mut::<(&mut Transform, &Movement)>()
        {
            let (nx, ny) = step(transform, movement, dt);
            if self.bounds.contains(nx, ny) {
                transform.x = nx;
                transform.y = ny;
            } else {
                trace!("{} blocked at ({}, {})", entity, transform.x, transform.y);
            }
        }
        Ok(())
    }
}

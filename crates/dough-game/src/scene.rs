//! Scene: a registry plus the system pipeline that runs on it

use dough_ecs::{Entity, EntityMut, World};
use dough_render::Surface;
use tracing::{debug, info};

use crate::components::{Name, Transform};
use crate::error::SceneError;
use crate::input::InputEvent;
use crate::loader::TextureLoader;
use crate::system::{InputSystem, RenderSystem, SetupSystem, UpdateSystem};

/// State every system sees: the registry and the two distinguished
/// entities.
#[derive(Default)]
pub struct SceneContext {
    pub world: World,
    pub player: Option<Entity>,
    pub main_camera: Option<Entity>,
}

impl SceneContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an entity with a [`Name`] and a [`Transform`] at `(x, y)`.
    pub fn create_entity(&mut self, name: &str, x: i32, y: i32) -> EntityMut<'_> {
        self.world
            .spawn_mut()
            .with(Name::from(name))
            .with(Transform::new(x, y))
    }

    pub fn player(&self) -> Result<Entity, SceneError> {
        self.player.ok_or(SceneError::MissingPlayer)
    }

    pub fn main_camera(&self) -> Result<Entity, SceneError> {
        self.main_camera.ok_or(SceneError::MissingCamera)
    }
}

/// How far a scene got through [`Scene::setup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupState {
    Pending,
    Done,
    /// A setup system failed; the context may hold a partial scene.
    Failed,
}

/// A named scene owning its registry and systems.
pub struct Scene {
    name: String,
    ctx: SceneContext,
    setup_systems: Vec<Box<dyn SetupSystem>>,
    input_systems: Vec<Box<dyn InputSystem>>,
    update_systems: Vec<Box<dyn UpdateSystem>>,
    render_systems: Vec<Box<dyn RenderSystem>>,
    setup_state: SetupState,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug!("Created scene '{}'", name);
        Self {
            name,
            ctx: SceneContext::new(),
            setup_systems: Vec::new(),
            input_systems: Vec::new(),
            update_systems: Vec::new(),
            render_systems: Vec::new(),
            setup_state: SetupState::Pending,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SceneContext {
        &mut self.ctx
    }

    pub fn world(&self) -> &World {
        &self.ctx.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.ctx.world
    }

    pub fn is_set_up(&self) -> bool {
        self.setup_state == SetupState::Done
    }

    /// Shorthand for [`SceneContext::create_entity`].
    pub fn create_entity(&mut self, name: &str, x: i32, y: i32) -> EntityMut<'_> {
        self.ctx.create_entity(name, x, y)
    }

    pub fn add_setup_system<S: SetupSystem + 'static>(&mut self, system: S) {
        self.setup_systems.push(Box::new(system));
    }

    pub fn add_input_system<S: InputSystem + 'static>(&mut self, system: S) {
        self.input_systems.push(Box::new(system));
    }

    pub fn add_update_system<S: UpdateSystem + 'static>(&mut self, system: S) {
        self.update_systems.push(Box::new(system));
    }

    pub fn add_render_system<S: RenderSystem + 'static>(&mut self, system: S) {
        self.render_systems.push(Box::new(system));
    }

    pub fn with_setup_system<S: SetupSystem + 'static>(mut self, system: S) -> Self {
        self.add_setup_system(system);
        self
    }

    pub fn with_input_system<S: InputSystem + 'static>(mut self, system: S) -> Self {
        self.add_input_system(system);
        self
    }

    pub fn with_update_system<S: UpdateSystem + 'static>(mut self, system: S) -> Self {
        self.add_update_system(system);
        self
    }

    pub fn with_render_system<S: RenderSystem + 'static>(mut self, system: S) -> Self {
        self.add_render_system(system);
        self
    }

    /// Run every setup system once, in registration order. The first error
    /// aborts setup, and the scene can not be set up again afterwards.
    pub fn setup(&mut self, loader: &mut dyn TextureLoader) -> Result<(), SceneError> {
        match self.setup_state {
            SetupState::Pending => {}
            SetupState::Done => return Err(SceneError::AlreadySetUp(self.name.clone())),
            SetupState::Failed => return Err(SceneError::SetupFailed(self.name.clone())),
        }
        self.setup_state = SetupState::Failed;
        for system in &mut self.setup_systems {
            system.setup(&mut self.ctx, loader)?;
        }
        self.setup_state = SetupState::Done;
        info!(
            "Scene '{}' set up with {} entities",
            self.name,
            self.ctx.world.entity_count()
        );
        Ok(())
    }

    /// Hand one event to every input system.
    pub fn input(&mut self, event: &InputEvent) -> Result<(), SceneError> {
        for system in &mut self.input_systems {
            system.input(&mut self.ctx, event)?;
        }
        Ok(())
    }

    /// Advance every update system by `dt` seconds.
    pub fn update(&mut self, dt: f64) -> Result<(), SceneError> {
        for system in &mut self.update_systems {
            system.update(&mut self.ctx, dt)?;
        }
        Ok(())
    }

    /// Draw through every render system. The first error skips the rest of
    /// the frame.
    pub fn render(&mut self, surface: &mut dyn Surface) -> Result<(), SceneError> {
        for system in &mut self.render_systems {
            system.render(&self.ctx, surface)?;
        }
        Ok(())
    }

    pub fn system_counts(&self) -> [usize; 4] {
        [
            self.setup_systems.len(),
            self.input_systems.len(),
            self.update_systems.len(),
            self.render_systems.len(),
        ]
    }
}

use dough_assets::AssetError;
use dough_ecs::EcsError;
use dough_render::RenderError;

/// Errors raised while setting up or running a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("scene has no player entity")]
    MissingPlayer,

    #[error("scene has no camera entity")]
    MissingCamera,

    #[error("scene '{0}' is already set up")]
    AlreadySetUp(String),

    #[error("setup of scene '{0}' failed earlier and cannot be retried")]
    SetupFailed(String),

    #[error("sprite size must be positive, got {0}")]
    InvalidSpriteSize(i32),

    #[error("tile map is not loaded")]
    MissingTileMap,

    #[error(transparent)]
    Ecs(#[from] EcsError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl SceneError {
    /// Whether a render system returning this error only spoils the current
    /// frame. Everything else means the scene itself is broken.
    pub fn drops_frame(&self) -> bool {
        matches!(self, SceneError::Render(_) | SceneError::MissingTileMap)
    }
}

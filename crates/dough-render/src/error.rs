use std::path::PathBuf;

use dough_assets::TextureHandle;

/// Errors raised while drawing or presenting a frame.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("texture {} is not loaded", .0.id())]
    MissingTexture(TextureHandle),

    #[error("failed to save frame to '{}': {}", .0.display(), .1)]
    SaveFailed(PathBuf, String),
}

use std::path::PathBuf;

/// Errors that can occur during asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to load image '{0}': {1}")]
    ImageLoadFailed(PathBuf, String),

    #[error("pixel buffer of {len} bytes does not match a {width}x{height} RGBA image")]
    InvalidDimensions { width: u32, height: u32, len: usize },
}

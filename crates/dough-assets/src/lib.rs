//! Dough Assets - Texture loading and management
//!
//! Textures are decoded with the `image` crate and owned by an
//! [`AssetServer`]. Everything else in the runtime refers to them through
//! cheap, copyable [`TextureHandle`]s.

mod error;
mod handle;
mod server;
mod texture;

pub use error::AssetError;
pub use handle::{AssetHandle, AssetId};
pub use server::AssetServer;
pub use texture::{load_texture, TextureAsset, TextureHandle};

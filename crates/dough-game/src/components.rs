//! Component data attached to scene entities
//!
//! Components are plain data. Systems hold all behaviour.

use dough_assets::TextureHandle;

/// World-space position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transform {
    pub x: i32,
    pub y: i32,
}

impl Transform {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Velocity in world units per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Movement {
    pub vx: i32,
    pub vy: i32,
}

impl Movement {
    pub fn new(vx: i32, vy: i32) -> Self {
        Self { vx, vy }
    }
}

/// Square region of a texture drawn at the entity's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    /// Source rectangle left edge inside the texture
    pub x: i32,
    /// Source rectangle top edge inside the texture
    pub y: i32,
    /// Source edge length, before zoom
    pub size: i32,
    pub texture: TextureHandle,
}

impl Sprite {
    pub fn new(x: i32, y: i32, size: i32, texture: TextureHandle) -> Self {
        Self {
            x,
            y,
            size,
            texture,
        }
    }
}

/// View onto the world. The owning entity's [`Transform`] is the top-left
/// corner of the viewport in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    /// Integer scale applied to every drawn texel
    pub zoom: i32,
    /// Viewport width
    pub vw: i32,
    /// Viewport height
    pub vh: i32,
    /// World width
    pub ww: i32,
    /// World height
    pub wh: i32,
}

impl Camera {
    pub fn new(zoom: i32, vw: i32, vh: i32, ww: i32, wh: i32) -> Self {
        Self {
            zoom,
            vw,
            vh,
            ww,
            wh,
        }
    }
}

/// Human-readable label. Not unique and never used for lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

use dough_assets::TextureHandle;
use dough_core::{Color, Rect};

use crate::error::RenderError;
use crate::surface::Surface;

/// One `copy` issued against a [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub texture: TextureHandle,
    pub src: Rect,
    pub dst: Rect,
}

/// Surface that keeps the draw calls of the current frame instead of
/// rasterizing them.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    calls: Vec<DrawCall>,
    clear_color: Option<Color>,
    presented: u64,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
            clear_color: None,
            presented: 0,
        }
    }

    /// Draw calls since the last clear, in issue order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn clear_color(&self) -> Option<Color> {
        self.clear_color
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.calls.clear();
        self.clear_color = Some(color);
    }

    fn copy(&mut self, texture: TextureHandle, src: Rect, dst: Rect) -> Result<(), RenderError> {
        self.calls.push(DrawCall { texture, src, dst });
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_starts_a_new_frame() {
        let mut surface = RecordingSurface::new(64, 32);
        let tex = TextureHandle::from_raw(1);
        surface.copy(tex, Rect::square(0, 0, 16), Rect::square(0, 0, 64)).unwrap();
        assert_eq!(surface.calls().len(), 1);

        surface.clear(Color::WHITE);
        assert!(surface.calls().is_empty());
        assert_eq!(surface.clear_color(), Some(Color::WHITE));
        assert_eq!(surface.bounds(), Rect::new(0, 0, 64, 32));
    }
}

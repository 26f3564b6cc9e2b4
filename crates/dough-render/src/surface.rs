use dough_assets::TextureHandle;
use dough_core::{Color, Rect};

use crate::error::RenderError;

/// A drawing target for one frame.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Draw the `src` region of `texture` scaled into `dst`. Parts of `dst`
    /// outside the surface are clipped.
    fn copy(&mut self, texture: TextureHandle, src: Rect, dst: Rect) -> Result<(), RenderError>;

    /// Publish the completed frame.
    fn present(&mut self) -> Result<(), RenderError>;

    /// The surface area as a rectangle anchored at the origin.
    fn bounds(&self) -> Rect {
        let (width, height) = self.size();
        Rect::new(0, 0, width as i32, height as i32)
    }
}

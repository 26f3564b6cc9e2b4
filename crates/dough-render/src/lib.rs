//! Dough Render - Drawing surfaces
//!
//! Render systems draw through the [`Surface`] trait: copy a source
//! rectangle of a texture into a destination rectangle on screen. The crate
//! ships a CPU compositor ([`SoftwareSurface`]) for headless runs and a
//! [`RecordingSurface`] that captures draw calls without rasterizing.

mod error;
mod recording;
mod software;
mod surface;

pub use error::RenderError;
pub use recording::{DrawCall, RecordingSurface};
pub use software::SoftwareSurface;
pub use surface::Surface;

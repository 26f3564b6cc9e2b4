//! Dough Core - Core types and utilities for the Dough runtime
//!
//! This crate provides the foundational types used throughout the runtime:
//! - Integer rectangles and colors shared by assets and rendering
//! - Frame pacing for the fixed-FPS game loop

pub mod time;
pub mod types;

pub use time::{Clock, FramePacer, ManualClock, SystemClock};
pub use types::{Color, Rect};

//! Software rasterization into a 32-bit ARGB pixel buffer
//!
//! Triangles, lines and points are drawn straight into a [`PixelBuffer`],
//! with triangle fills split into row bands across threads. Whole-buffer
//! filters (the flame convolution, contrast stretching and per-pixel color
//! functions) run in place. Frames can be saved as PNG, composited with
//! externally rendered RGBA images, or presented in an SDL2 window when the
//! `display` feature is enabled.

pub mod color;
pub mod compositor;
pub mod config;
pub mod demos;
pub mod display;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod math3d;
pub mod raster;
pub mod util;

pub use config::CanvasConfig;
pub use display::PixelBuffer;
pub use error::{RenderError, Result};
pub use geometry::{Position, Triangle};

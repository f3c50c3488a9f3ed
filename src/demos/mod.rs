//! Animated scenes for the demo binary
//!
//! Each scene owns its random number generator and whatever state it carries
//! between frames. The runner calls [`Demo::update`], then [`Demo::render`] on
//! the persistent frame buffer, then [`Demo::post_process`] to produce the
//! image that is actually shown.

mod blending;
mod spinning;
mod triangle_dance;
mod wire_triangles;

pub use blending::Blending;
pub use spinning::SpinningVertices;
pub use triangle_dance::TriangleDance;
pub use wire_triangles::WireTriangles;

use crate::config::CanvasConfig;
use crate::display::PixelBuffer;
use crate::util::Rng;

/// Trait for all animated scenes
pub trait Demo {
    /// Update scene state (called each frame)
    /// - dt: delta time in seconds
    /// - width/height: buffer dimensions
    fn update(&mut self, dt: f32, width: u32, height: u32);

    /// Draw into the persistent frame buffer
    fn render(&self, buffer: &mut PixelBuffer);

    /// Scene name for the window title and logs
    fn name(&self) -> &str;

    /// Turn the frame into the image to show. The default shows it as is.
    fn post_process(&self, frame: &PixelBuffer, out: &mut PixelBuffer) {
        out.pixels_mut().copy_from_slice(frame.pixels());
    }
}

/// Every scene, in key order (1, 2, 3, 4)
pub fn all(config: &CanvasConfig, rng: &mut Rng) -> Vec<Box<dyn Demo>> {
    vec![
        Box::new(TriangleDance::new(config, Rng::new(rng.next_u64()))),
        Box::new(Blending::new(config, Rng::new(rng.next_u64()))),
        Box::new(WireTriangles::new(config, Rng::new(rng.next_u64()))),
        Box::new(SpinningVertices::new(config, Rng::new(rng.next_u64()))),
    ]
}

//! Post-processing effects that transform a whole buffer in place

pub mod contrast;
pub mod convolution;
pub mod pixel_fn;

pub use contrast::ContrastStretch;
pub use convolution::{Flame, FlameClock, SamplePattern};
pub use pixel_fn::{combine, combine3, divide, map_pixels, PixelFn};

use crate::display::PixelBuffer;

/// Apply a pixel function to every stored value of `buf`
pub fn map_buffer<F>(buf: &mut PixelBuffer, cores: usize, f: F)
where
    F: Fn(u32) -> u32 + Sync,
{
    map_pixels(cores, f, buf.pixels_mut());
}

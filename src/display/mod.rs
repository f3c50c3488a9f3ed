mod pixel_buffer;
#[cfg(feature = "display")]
mod window;

pub use pixel_buffer::{PixelBuffer, RowBand};
#[cfg(feature = "display")]
pub use window::{Display, InputEvent, RenderTarget};

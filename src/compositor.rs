//! Putting externally rendered RGBA images onto a pixel buffer
//!
//! The image must cover the whole buffer. A larger image is cropped to its
//! top-left `width x height` region.

use image::RgbaImage;

use crate::color;
use crate::display::PixelBuffer;
use crate::error::{RenderError, Result};

/// `dst = blend(dst, src)` for every visible pixel
pub fn blit_image(buf: &mut PixelBuffer, image: &RgbaImage) -> Result<()> {
    composite(buf, image, color::blend)
}

/// `dst = add(dst, src)` for every visible pixel; the result is opaque
pub fn blit_image_on_top(buf: &mut PixelBuffer, image: &RgbaImage) -> Result<()> {
    composite(buf, image, color::add)
}

fn composite(buf: &mut PixelBuffer, image: &RgbaImage, op: fn(u32, u32) -> u32) -> Result<()> {
    let (width, height) = (buf.width(), buf.height());
    let (image_width, image_height) = image.dimensions();
    if image_width < width || image_height < height {
        return Err(RenderError::SizeMismatch {
            image_width,
            image_height,
            width,
            height,
        });
    }

    let stride = buf.stride() as usize;
    let pixels = buf.pixels_mut();
    for (y, row) in image.rows().take(height as usize).enumerate() {
        let dst_row = &mut pixels[y * stride..y * stride + width as usize];
        for (dst, src) in dst_row.iter_mut().zip(row) {
            let [r, g, b, a] = src.0;
            *dst = op(*dst, color::pack(r, g, b, a));
        }
    }
    Ok(())
}

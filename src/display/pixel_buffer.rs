use std::ops::Range;
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use log::{debug, info};

use crate::color;
use crate::config::CanvasConfig;
use crate::error::{RenderError, Result};

// ============================================================================
// PixelBuffer
// ============================================================================

/// ARGB pixel buffer for software rendering
///
/// A flat `Vec<u32>` of `height * stride` color values, row-major, with
/// `index = y * stride + x`. The length is fixed at construction.
///
/// Two kinds of access exist side by side. The plain primitives
/// ([`set_pixel`](Self::set_pixel), the line and triangle rasterizers) trust
/// their caller and index the slice directly: an index past the end panics,
/// an `x` past the width lands in the next row. [`plot`](Self::plot) and
/// [`get_pixel`](Self::get_pixel) check both coordinates first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    stride: u32,
    /// Alpha given to the colors passed to `plot`
    opaque: u8,
}

impl PixelBuffer {
    /// Create a buffer whose stride equals its width, cleared to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_stride(width, height, width)
    }

    /// Create a buffer with padded rows. A stride below the width is raised to it.
    pub fn with_stride(width: u32, height: u32, stride: u32) -> Self {
        let stride = stride.max(width);
        Self {
            pixels: vec![color::TRANSPARENT; stride as usize * height as usize],
            width,
            height,
            stride,
            opaque: color::OPAQUE,
        }
    }

    /// Sized by the config. [`plot`](Self::plot) uses its `opaque` alpha.
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self {
            opaque: config.opaque,
            ..Self::with_stride(config.width, config.height, config.stride())
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    #[inline]
    pub fn opaque(&self) -> u8 {
        self.opaque
    }

    pub fn set_opaque(&mut self, alpha: u8) {
        self.opaque = alpha;
    }

    /// Number of stored color values, padding included
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Raw bytes for SDL texture upload
    ///
    /// Each color value appears in native byte order, which is exactly the
    /// memory layout of an `ARGB8888` texture.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and any byte pattern is a valid u8. The
        // length covers exactly the same allocation, and u8 has alignment 1.
        unsafe {
            std::slice::from_raw_parts(
                self.pixels.as_ptr() as *const u8,
                self.pixels.len() * std::mem::size_of::<u32>(),
            )
        }
    }

    /// Check if coordinates are within the visible area
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y as isize * self.stride as isize + x as isize) as usize
    }

    // ========================================================================
    // Pixel access
    // ========================================================================

    /// Write one color value without validating the coordinates.
    ///
    /// Panics when the computed index falls outside the buffer.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Write one color value with no bounds check at all
    ///
    /// # Safety
    /// `y * stride + x` must be smaller than [`len`](Self::len).
    #[inline]
    pub unsafe fn set_pixel_unchecked(&mut self, x: u32, y: u32, color: u32) {
        let idx = y as usize * self.stride as usize + x as usize;
        *self.pixels.get_unchecked_mut(idx) = color;
    }

    /// Read a pixel from the buffer (bounds checked)
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if self.in_bounds(x, y) {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Checked write of `(r, g, b)` with the buffer's [`opaque`](Self::opaque)
    /// alpha. Nothing is written on error. Use
    /// [`plot_color`](Self::plot_color) for any other alpha.
    pub fn plot(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) -> Result<()> {
        self.plot_color(x, y, color::pack(r, g, b, self.opaque))
    }

    /// Checked write of a packed color value. Nothing is written on error.
    pub fn plot_color(&mut self, x: i32, y: i32, color: u32) -> Result<()> {
        if x < 0 || x >= self.width as i32 {
            return Err(RenderError::OutOfRange {
                axis: "x",
                value: x,
                limit: self.width,
            });
        }
        if y < 0 || y >= self.height as i32 {
            return Err(RenderError::OutOfRange {
                axis: "y",
                value: y,
                limit: self.height,
            });
        }
        self.set_pixel(x, y, color);
        Ok(())
    }

    /// Read with circular addressing over the first `size` values.
    ///
    /// Folds `pos` back by a single addition or subtraction, so it is only
    /// correct for `pos` in `[-size, 2 * size)`. Callers stay within one
    /// step of the edge.
    #[inline]
    pub fn get_wrap(&self, pos: isize, size: usize) -> u32 {
        self.pixels[wrap_index(pos, size)]
    }

    /// Write with the same circular addressing as [`get_wrap`](Self::get_wrap)
    #[inline]
    pub fn set_wrap(&mut self, pos: isize, size: usize, color: u32) {
        let idx = wrap_index(pos, size);
        self.pixels[idx] = color;
    }

    /// Read (x, y) with each coordinate folded back once into the visible area.
    ///
    /// Same single-step rule as [`get_wrap`](Self::get_wrap), applied per axis.
    #[inline]
    pub fn get_xy_wrap(&self, x: i32, y: i32) -> u32 {
        let x = wrap_index(x as isize, self.width as usize) as i32;
        let y = wrap_index(y as isize, self.height as usize) as i32;
        self.pixels[self.index(x, y)]
    }

    #[inline]
    pub fn set_xy_wrap(&mut self, x: i32, y: i32, color: u32) {
        let x = wrap_index(x as isize, self.width as usize) as i32;
        let y = wrap_index(y as isize, self.height as usize) as i32;
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    // ========================================================================
    // Clearing
    // ========================================================================

    /// Overwrite every stored value, row padding included
    pub fn fast_clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Fill the visible part of row `y`. Rows outside the buffer are ignored.
    pub fn clear_row(&mut self, y: i32, color: u32) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let start = self.index(0, y);
        self.pixels[start..start + self.width as usize].fill(color);
    }

    /// Fill column `x` from top to bottom. Columns outside the buffer are ignored.
    pub fn clear_column(&mut self, x: i32, color: u32) {
        if x < 0 || x >= self.width as i32 {
            return;
        }
        let stride = self.stride as usize;
        self.pixels
            .iter_mut()
            .skip(x as usize)
            .step_by(stride)
            .for_each(|px| *px = color);
    }

    // ========================================================================
    // Row bands
    // ========================================================================

    /// Borrow rows `rows` as one band. The range is clipped to the buffer.
    pub fn rows_mut(&mut self, rows: Range<i32>) -> RowBand<'_> {
        let width = self.width;
        let stride = self.stride as usize;
        let mut bands = self.split_row_bands(std::slice::from_ref(&rows));
        bands.pop().unwrap_or(RowBand {
            first_row: 0,
            width,
            stride,
            pixels: &mut [],
        })
    }

    /// Carve the buffer into disjoint mutable row bands.
    ///
    /// `bands` must be ascending and non-overlapping. Each range is clipped to
    /// the buffer and to the end of the previous band, so the result always
    /// has one entry per requested range, possibly empty.
    pub fn split_row_bands(&mut self, bands: &[Range<i32>]) -> Vec<RowBand<'_>> {
        let height = self.height as i32;
        let width = self.width;
        let stride = self.stride as usize;

        let mut rest: &mut [u32] = &mut self.pixels;
        let mut consumed = 0i32;
        let mut out = Vec::with_capacity(bands.len());

        for band in bands {
            let start = band.start.clamp(consumed, height);
            let end = band.end.clamp(start, height);

            let skip = (start - consumed) as usize * stride;
            let take = (end - start) as usize * stride;

            let tail = std::mem::take(&mut rest);
            let (_, tail) = tail.split_at_mut(skip);
            let (head, tail) = tail.split_at_mut(take);
            rest = tail;
            consumed = end;

            out.push(RowBand {
                first_row: start,
                width,
                stride,
                pixels: head,
            });
        }

        out
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Copy the visible area into an RGBA image
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let (r, g, b, a) = color::unpack(self.pixels[self.index(x as i32, y as i32)]);
            Rgba([r, g, b, a])
        })
    }

    /// Write the buffer as a PNG file.
    ///
    /// Refuses to replace an existing file unless `overwrite` is set.
    pub fn save_png(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<()> {
        let path = path.as_ref();
        if !overwrite && path.exists() {
            return Err(RenderError::FileExists(path.to_path_buf()));
        }
        self.to_image().save_with_format(path, ImageFormat::Png)?;
        info!("saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[inline]
fn wrap_index(pos: isize, size: usize) -> usize {
    let size = size as isize;
    debug_assert!(
        pos >= -size && pos < 2 * size,
        "wrap position {} outside [-{}, {})",
        pos,
        size,
        2 * size
    );
    if pos >= size {
        (pos - size) as usize
    } else if pos < 0 {
        (pos + size) as usize
    } else {
        pos as usize
    }
}

// ============================================================================
// RowBand
// ============================================================================

/// Exclusive view of a run of whole rows, addressed with buffer coordinates
#[derive(Debug)]
pub struct RowBand<'a> {
    first_row: i32,
    width: u32,
    stride: usize,
    pixels: &'a mut [u32],
}

impl<'a> RowBand<'a> {
    /// Buffer rows covered by this band
    pub fn rows(&self) -> Range<i32> {
        let count = if self.stride == 0 {
            0
        } else {
            (self.pixels.len() / self.stride) as i32
        };
        self.first_row..self.first_row + count
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The visible part of buffer row `y`. Panics if `y` is not in this band.
    #[inline]
    pub fn row_mut(&mut self, y: i32) -> &mut [u32] {
        let start = (y - self.first_row) as usize * self.stride;
        &mut self.pixels[start..start + self.width as usize]
    }

    /// Write one pixel using buffer coordinates. Panics outside the band.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        let idx = (y - self.first_row) as usize * self.stride + x as usize;
        self.pixels[idx] = color;
    }
}

//! Straight lines
//!
//! All ranges are half-open: the far endpoint of a line is never drawn.
//! Pixels that fall outside the buffer are skipped, so a long line cannot
//! spill into a neighbouring row.

use crate::display::PixelBuffer;
use crate::geometry::{interpolate, Interpolate, Position};

/// Fill `[min(x1, x2), max(x1, x2))` on row `y`
pub fn hline(buf: &mut PixelBuffer, y: i32, x1: i32, x2: i32, color: u32) {
    if y < 0 || y >= buf.height() as i32 {
        return;
    }
    let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
    let start = x1.max(0);
    let end = x2.min(buf.width() as i32);
    if start >= end {
        return;
    }
    let row_start = y as usize * buf.stride() as usize;
    buf.pixels_mut()[row_start + start as usize..row_start + end as usize].fill(color);
}

/// Fill rows `[min(y1, y2), max(y1, y2))` in column `x`
pub fn vline(buf: &mut PixelBuffer, x: i32, y1: i32, y2: i32, color: u32) {
    if x < 0 || x >= buf.width() as i32 {
        return;
    }
    let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
    let start = y1.max(0);
    let end = y2.min(buf.height() as i32);
    if start >= end {
        return;
    }

    let stride = buf.stride() as usize;
    let mut idx = start as usize * stride + x as usize;
    let pixels = buf.pixels_mut();
    for _ in start..end {
        pixels[idx] = color;
        idx += stride;
    }
}

/// Draw a line from `p1` towards `p2`.
///
/// Axis-aligned lines go through [`hline`] and [`vline`]. Everything else
/// walks the major axis one pixel per step with a truncated minor coordinate,
/// see [`interpolate`].
pub fn line(buf: &mut PixelBuffer, p1: Position, p2: Position, color: u32) {
    if p1.y == p2.y {
        hline(buf, p1.y, p1.x, p2.x, color);
        return;
    }
    if p1.x == p2.x {
        vline(buf, p1.x, p1.y, p2.y, color);
        return;
    }
    for p in interpolate(p1, p2) {
        if buf.in_bounds(p.x, p.y) {
            buf.set_pixel(p.x, p.y, color);
        }
    }
}

/// The pixels [`line`] writes, in drawing order, before clipping
pub fn line_points(p1: Position, p2: Position) -> Interpolate {
    interpolate(p1, p2)
}

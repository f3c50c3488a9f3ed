//! Flat-color triangles
//!
//! Filling evaluates a barycentric inside test for every pixel of the
//! triangle's bounding box. The box is cut into horizontal row bands and each
//! band is filled by its own scoped thread; the bands are disjoint slices of
//! the buffer, so the workers never share a pixel.

use std::ops::Range;
use std::thread;

use log::trace;

use super::line::{hline, line};
use crate::display::{PixelBuffer, RowBand};
use crate::geometry::{Position, Triangle};

/// Split rows `[min_y, max_y)` into contiguous bands, one per worker.
///
/// With `cores > 1` the band height is `(max_y - min_y) / (cores - 1)`; full
/// bands are emitted while at least one full step remains and fewer than
/// `cores - 1` exist, then a final band takes the remaining rows. A span
/// shorter than `cores - 1` rows gives a band height of zero and falls back to
/// a single band.
///
/// The bands never overlap, leave no gaps and cover the span exactly. There
/// are never more than `cores` of them. An empty span gives no bands.
pub fn partition_rows(min_y: i32, max_y: i32, cores: usize) -> Vec<Range<i32>> {
    if max_y <= min_y {
        return Vec::new();
    }
    if cores <= 1 {
        return vec![min_y..max_y];
    }

    let height = max_y as i64 - min_y as i64;
    let divisor = (cores - 1).min(i32::MAX as usize) as i64;
    let step = (height / divisor) as i32;
    if step == 0 {
        return vec![min_y..max_y];
    }

    let mut bands = Vec::with_capacity(cores);
    let mut y = min_y;
    while y < max_y - step && bands.len() < cores - 1 {
        bands.push(y..y + step);
        y += step;
    }
    if y < max_y {
        bands.push(y..max_y);
    }
    bands
}

/// Constant parts of the barycentric inside test
#[derive(Debug, Clone, Copy)]
struct InsideTest {
    area_mod: f32,
    s_c: i64,
    s_x: i64,
    s_y: i64,
    t_c: i64,
    t_x: i64,
    t_y: i64,
}

impl InsideTest {
    fn new(p0: Position, p1: Position, p2: Position, doubled_area: i64) -> Self {
        let (x0, y0) = (p0.x as i64, p0.y as i64);
        let (x1, y1) = (p1.x as i64, p1.y as i64);
        let (x2, y2) = (p2.x as i64, p2.y as i64);
        Self {
            area_mod: 1.0 / doubled_area as f32,
            s_c: y0 * x2 - x0 * y2,
            s_x: y2 - y0,
            s_y: x0 - x2,
            t_c: x0 * y1 - y0 * x1,
            t_x: y0 - y1,
            t_y: x1 - x0,
        }
    }

    /// Strictly inside: boundary pixels do not count
    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (x as i64, y as i64);
        let s = self.area_mod * (self.s_c + self.s_x * x + self.s_y * y) as f32;
        let t = self.area_mod * (self.t_c + self.t_x * x + self.t_y * y) as f32;
        s > 0.0 && t > 0.0 && 1.0 - s - t > 0.0
    }
}

fn fill_band(band: &mut RowBand<'_>, test: &InsideTest, columns: Range<i32>, color: u32) {
    for y in band.rows() {
        let row = band.row_mut(y);
        for x in columns.clone() {
            if test.contains(x, y) {
                // SAFETY: columns were clipped to [0, width) and a band row is
                // exactly `width` long.
                unsafe {
                    *row.get_unchecked_mut(x as usize) = color;
                }
            }
        }
    }
}

/// Fill the triangle `p0 p1 p2` with a flat color using up to `cores` threads.
///
/// A triangle with no height is drawn as the horizontal line spanning its
/// corners. One whose corners are collinear but not horizontal has no
/// interior and draws nothing. Only pixels strictly inside the triangle are
/// written, and the work is clipped to the buffer. `cores == 0` counts as 1.
/// Returns once every worker has finished.
pub fn fill_triangle(
    buf: &mut PixelBuffer,
    p0: Position,
    p1: Position,
    p2: Position,
    color: u32,
    cores: usize,
) {
    let tri = Triangle {
        a: p0,
        b: p1,
        c: p2,
        color,
    };
    let (min_x, max_x, min_y, max_y) = tri.bounds();

    if min_y == max_y {
        hline(buf, min_y, min_x, max_x, color);
        return;
    }

    let doubled_area = tri.doubled_area();
    if doubled_area == 0 {
        trace!("collinear triangle {} {} {}, nothing to fill", p0, p1, p2);
        return;
    }
    let test = InsideTest::new(p0, p1, p2, doubled_area);

    let columns = min_x.max(0)..max_x.min(buf.width() as i32);
    let rows = min_y.max(0)..max_y.min(buf.height() as i32);
    if columns.is_empty() || rows.is_empty() {
        return;
    }

    let partition = partition_rows(rows.start, rows.end, cores.max(1));
    let mut bands = buf.split_row_bands(&partition);

    if let [band] = bands.as_mut_slice() {
        fill_band(band, &test, columns, color);
        return;
    }

    trace!("filling rows {:?} in {} bands", rows, bands.len());
    thread::scope(|s| {
        for band in bands.iter_mut() {
            let columns = columns.clone();
            let test = &test;
            s.spawn(move || fill_band(band, test, columns, color));
        }
    });
}

/// Outline the triangle `p1 p2 p3` with three lines
pub fn wire_triangle(buf: &mut PixelBuffer, p1: Position, p2: Position, p3: Position, color: u32) {
    line(buf, p1, p2, color);
    line(buf, p2, p3, color);
    line(buf, p3, p1, color);
}

impl Triangle {
    /// Fill with the triangle's color, see [`fill_triangle`]
    pub fn fill(&self, buf: &mut PixelBuffer, cores: usize) {
        fill_triangle(buf, self.a, self.b, self.c, self.color, cores);
    }

    /// Draw the three edges, see [`wire_triangle`]
    pub fn outline(&self, buf: &mut PixelBuffer) {
        wire_triangle(buf, self.a, self.b, self.c, self.color);
    }
}

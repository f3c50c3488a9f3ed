//! Histogram contrast stretch
//!
//! Counts how often each luminance occurs, throws away the rarest ones, and
//! spreads the luminance range that is left over the full `0..=255` scale.

use std::thread;

use log::debug;

use super::pixel_fn::map_pixels;
use crate::color;
use crate::display::PixelBuffer;
use crate::raster::partition_rows;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastStretch {
    /// Share of the distinct luminances to keep, counted from the most common
    /// one down. Clamped to `[0, 1]`. At 0 nothing is kept and the stretch
    /// does nothing.
    pub discard_ratio: f32,
    /// Also remap the alpha channel
    pub scale_alpha: bool,
}

impl ContrastStretch {
    pub fn new(discard_ratio: f32) -> Self {
        Self {
            discard_ratio,
            scale_alpha: false,
        }
    }

    /// Stretch the visible pixels of `buf`. Row padding is neither counted
    /// nor remapped.
    pub fn apply(&self, buf: &mut PixelBuffer, cores: usize) {
        if buf.stride() == buf.width() {
            self.apply_to(buf.pixels_mut(), cores);
            return;
        }

        let (width, stride) = (buf.width() as usize, buf.stride() as usize);
        let visible = buf.pixels().chunks(stride).flat_map(|row| &row[..width]);
        let Some(range) = self.retained_range(visible) else {
            return;
        };
        let remap = self.remap(range);

        let rows = partition_rows(0, buf.height() as i32, cores.max(1));
        let mut bands = buf.split_row_bands(&rows);
        thread::scope(|s| {
            for band in bands.iter_mut() {
                s.spawn(move || {
                    for y in band.rows() {
                        band.row_mut(y).iter_mut().for_each(|px| *px = remap(*px));
                    }
                });
            }
        });
    }

    /// Stretch a raw pixel slice in place using up to `cores` threads
    pub fn apply_to(&self, pixels: &mut [u32], cores: usize) {
        let Some(range) = self.retained_range(pixels.iter()) else {
            return;
        };
        map_pixels(cores, self.remap(range), pixels);
    }

    /// Per-pixel mapping that spreads luminances `lo..=hi` over `0..=255`
    fn remap(&self, (lo, hi): (u8, u8)) -> impl Fn(u32) -> u32 + Copy + Send + Sync {
        let width = (hi - lo) as f32;
        let scale_alpha = self.scale_alpha;
        let stretch = move |c: u8| ((c.wrapping_sub(lo) as f32 / width) * 255.0) as i64 as u8;
        move |cv| {
            let (r, g, b, a) = color::unpack(cv);
            let a = if scale_alpha { stretch(a) } else { a };
            color::pack(stretch(r), stretch(g), stretch(b), a)
        }
    }

    /// Lowest and highest luminance among the kept histogram buckets, or
    /// `None` when there is nothing to stretch
    fn retained_range<'a>(&self, pixels: impl Iterator<Item = &'a u32>) -> Option<(u8, u8)> {
        let mut histogram = [0usize; 256];
        for &cv in pixels {
            histogram[color::luminance(cv) as usize] += 1;
        }

        // (count, luminance) of every bucket in use, rarest first
        let mut buckets: Vec<(usize, u8)> = histogram
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(lum, &count)| (count, lum as u8))
            .collect();
        buckets.sort_unstable();

        let ratio = self.discard_ratio.clamp(0.0, 1.0);
        let skip = ((buckets.len() as f32 * (1.0 - ratio)) as usize).min(buckets.len());
        let kept = &buckets[skip..];

        let lo = kept.iter().map(|&(_, lum)| lum).min()?;
        let hi = kept.iter().map(|&(_, lum)| lum).max()?;
        if hi <= lo {
            debug!(
                "contrast stretch skipped: {} of {} luminances kept, range {}..={}",
                kept.len(),
                buckets.len(),
                lo,
                hi
            );
            return None;
        }
        Some((lo, hi))
    }
}

impl Default for ContrastStretch {
    fn default() -> Self {
        Self::new(0.9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stretch_known_values() {
        let mut pixels = [0xff80_0000, 0xff20_0000, 0xff50_0000];
        ContrastStretch::new(0.9).apply_to(&mut pixels, 1);
        assert_eq!(pixels, [0xffac_a8a8, 0xffaf_a8a8, 0xff2d_a8a8]);
    }

    #[test]
    fn test_stretch_same_with_many_cores() {
        let original: Vec<u32> = (0..500u32).map(|i| color::rgb(i as u8, (i / 2) as u8, 40)).collect();
        let stretch = ContrastStretch::new(0.7);

        let mut serial = original.clone();
        stretch.apply_to(&mut serial, 1);
        let mut parallel = original.clone();
        stretch.apply_to(&mut parallel, 6);

        assert_eq!(serial, parallel);
        assert_ne!(serial, original);
    }

    #[test]
    fn test_uniform_image_unchanged() {
        let mut buf = PixelBuffer::new(10, 10);
        buf.fast_clear(color::rgb(90, 90, 90));
        let before = buf.clone();
        ContrastStretch::default().apply(&mut buf, 4);
        assert_eq!(buf, before);
    }

    #[test]
    fn test_padding_ignored() {
        let mut buf = PixelBuffer::with_stride(16, 9, 20);
        for y in 0..9 {
            buf.clear_row(y, color::rgb(90, 90, 90));
        }
        let before = buf.clone();
        ContrastStretch::default().apply(&mut buf, 4);
        assert_eq!(buf, before);
    }

    #[test]
    fn test_padded_buffer_matches_unpadded() {
        let fill = |buf: &mut PixelBuffer| {
            for y in 0..6 {
                for x in 0..10 {
                    let v = (x * 20 + y * 7) as u8;
                    buf.set_pixel(x, y, color::rgb(v, v / 2, 200 - v / 3));
                }
            }
        };
        let mut plain = PixelBuffer::new(10, 6);
        fill(&mut plain);
        let mut padded = PixelBuffer::with_stride(10, 6, 13);
        padded.fast_clear(color::WHITE);
        fill(&mut padded);

        let stretch = ContrastStretch::new(0.8);
        stretch.apply(&mut plain, 1);
        stretch.apply(&mut padded, 3);
        for y in 0..6 {
            for x in 0..10 {
                assert_eq!(padded.get_pixel(x, y), plain.get_pixel(x, y), "({}, {})", x, y);
            }
            // padding keeps its value
            assert_eq!(padded.pixels()[y as usize * 13 + 12], color::WHITE);
        }
    }

    #[test]
    fn test_zero_ratio_keeps_nothing() {
        let mut pixels: Vec<u32> = (0..=255u8).map(|v| color::rgb(v, v, v)).collect();
        let before = pixels.clone();
        ContrastStretch::new(0.0).apply_to(&mut pixels, 2);
        assert_eq!(pixels, before);
    }

    #[test]
    fn test_full_range_is_identity() {
        let mut pixels: Vec<u32> = (0..=255u8).map(|v| color::rgb(v, v, v)).collect();
        let before = pixels.clone();
        ContrastStretch::new(1.0).apply_to(&mut pixels, 3);
        assert_eq!(pixels, before);
    }

    #[test]
    fn test_alpha_scaling_is_optional() {
        let mut pixels = [color::pack(10, 10, 10, 10), color::pack(20, 20, 20, 20)];
        ContrastStretch::new(1.0).apply_to(&mut pixels, 1);
        assert_eq!(pixels, [color::pack(0, 0, 0, 10), color::pack(255, 255, 255, 20)]);

        let mut pixels = [color::pack(10, 10, 10, 10), color::pack(20, 20, 20, 20)];
        let stretch = ContrastStretch {
            discard_ratio: 1.0,
            scale_alpha: true,
        };
        stretch.apply_to(&mut pixels, 1);
        assert_eq!(pixels, [color::pack(0, 0, 0, 0), color::pack(255, 255, 255, 255)]);
    }

    #[test]
    fn test_empty_slice() {
        let mut pixels: [u32; 0] = [];
        ContrastStretch::default().apply_to(&mut pixels, 4);
    }
}

//! Per-pixel functions and a concurrent map over a pixel slice

use std::ops::Range;
use std::thread;

use crate::color;

/// An operation on a single ARGB color value
pub type PixelFn = fn(u32) -> u32;

pub const INVERT: PixelFn = color::invert;
pub const INVERT_EVERYTHING: PixelFn = color::invert_everything;
pub const ONLY_RED: PixelFn = color::only_red;
pub const ONLY_GREEN: PixelFn = color::only_green;
pub const ONLY_BLUE: PixelFn = color::only_blue;
pub const ONLY_ALPHA: PixelFn = color::only_alpha;
pub const REMOVE_RED: PixelFn = color::remove_red;
pub const REMOVE_GREEN: PixelFn = color::remove_green;
pub const REMOVE_BLUE: PixelFn = color::remove_blue;
pub const REMOVE_ALPHA: PixelFn = color::remove_alpha;
pub const SET_RED_BITS: PixelFn = color::set_red_bits;
pub const SET_GREEN_BITS: PixelFn = color::set_green_bits;
pub const SET_BLUE_BITS: PixelFn = color::set_blue_bits;
pub const OR_ALPHA: PixelFn = color::or_alpha;

/// Apply `a`, then `b`
pub fn combine<A, B>(a: A, b: B) -> impl Fn(u32) -> u32 + Copy + Send + Sync
where
    A: Fn(u32) -> u32 + Copy + Send + Sync,
    B: Fn(u32) -> u32 + Copy + Send + Sync,
{
    move |cv| b(a(cv))
}

/// Apply `a`, then `b`, then `c`
pub fn combine3<A, B, C>(a: A, b: B, c: C) -> impl Fn(u32) -> u32 + Copy + Send + Sync
where
    A: Fn(u32) -> u32 + Copy + Send + Sync,
    B: Fn(u32) -> u32 + Copy + Send + Sync,
    C: Fn(u32) -> u32 + Copy + Send + Sync,
{
    combine(a, combine(b, c))
}

/// Length of each equal chunk when `len` items are split `n` ways
fn chunk_len(len: usize, n: usize) -> usize {
    len / n.max(1)
}

/// Split `0..len` into `n` equal chunks plus one chunk for the leftover.
///
/// When `len < n` the whole range is a single chunk.
pub fn divide(len: usize, n: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let step = chunk_len(len, n);
    if step == 0 {
        return vec![0..len];
    }
    (0..len)
        .step_by(step)
        .map(|start| start..(start + step).min(len))
        .collect()
}

/// Replace every value in `pixels` with `f(value)`, one thread per range of
/// [`divide`]`(pixels.len(), cores)`. Blocks until done.
pub fn map_pixels<F>(cores: usize, f: F, pixels: &mut [u32])
where
    F: Fn(u32) -> u32 + Sync,
{
    let ranges = divide(pixels.len(), cores);
    if cores <= 1 || ranges.len() <= 1 {
        pixels.iter_mut().for_each(|px| *px = f(*px));
        return;
    }

    let f = &f;
    let mut rest = pixels;
    thread::scope(|s| {
        for range in ranges {
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            s.spawn(move || chunk.iter_mut().for_each(|px| *px = f(*px)));
        }
    });
}

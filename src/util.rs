//! Shared utilities: scalar helpers, a small explicit RNG and frame timing
//!
//! The scalar helpers work on `i32`. The ones postfixed with `_byte` work on `u8`.

use std::collections::VecDeque;
use std::time::Instant;

// ============================================================================
// Sorting, min/max
// ============================================================================

/// Sort two numbers
#[inline]
pub fn sort2(a: i32, b: i32) -> (i32, i32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Sort three numbers. Only the order of the values is guaranteed.
#[inline]
pub fn sort3(a: i32, b: i32, c: i32) -> (i32, i32, i32) {
    if a < b && a < c {
        let (x, y) = sort2(b, c);
        return (a, x, y);
    }
    if b < a && b < c {
        let (x, y) = sort2(a, c);
        return (b, x, y);
    }
    // c is the smallest, or ties with it
    let (lo, hi) = sort2(a, b);
    if c <= lo {
        (c, lo, hi)
    } else {
        // a == b and both smaller than c
        (lo, hi, c)
    }
}

/// Smallest and greatest of two numbers
#[inline]
pub fn min_max(a: i32, b: i32) -> (i32, i32) {
    sort2(a, b)
}

/// Smallest and largest of three numbers, in one pass
#[inline]
pub fn min_max3(a: i32, b: i32, c: i32) -> (i32, i32) {
    let (mut lo, mut hi) = min_max(a, b);
    if c < lo {
        lo = c;
    } else if c > hi {
        hi = c;
    }
    (lo, hi)
}

#[inline]
pub fn min_max3_byte(a: u8, b: u8, c: u8) -> (u8, u8) {
    (a.min(b).min(c), a.max(b).max(c))
}

#[inline]
pub fn min2(a: i32, b: i32) -> i32 {
    a.min(b)
}

#[inline]
pub fn max2(a: i32, b: i32) -> i32 {
    a.max(b)
}

#[inline]
pub fn min3(a: i32, b: i32, c: i32) -> i32 {
    min_max3(a, b, c).0
}

#[inline]
pub fn max3(a: i32, b: i32, c: i32) -> i32 {
    min_max3(a, b, c).1
}

// ============================================================================
// Clamping and scaling
// ============================================================================

/// Keep `x` within `[lo, hi)` by cutting it off.
///
/// The upper bound is half-open: anything `>= hi` becomes `hi - 1`, so
/// `clamp(hi, lo, hi) == hi - 1`.
#[inline]
pub fn clamp(x: i32, lo: i32, hi: i32) -> i32 {
    if x < lo {
        return lo;
    }
    if x >= hi {
        return hi - 1;
    }
    x
}

/// Same half-open cut-off as [`clamp`], for bytes
#[inline]
pub fn clamp_byte(x: u8, lo: u8, hi: u8) -> u8 {
    if x < lo {
        return lo;
    }
    if x >= hi {
        return hi.saturating_sub(1);
    }
    x
}

/// Map `x` from the scale `from_lo..from_hi` to the scale `to_lo..to_hi`.
///
/// A zero-width source scale cannot say where `x` belongs, so the nearest end
/// of the target scale wins: `to_lo` when `x < to_lo + (to_hi - to_lo)`,
/// otherwise `to_hi`.
pub fn scale(x: i32, from_lo: i32, from_hi: i32, to_lo: i32, to_hi: i32) -> i32 {
    let width_from = from_hi as i64 - from_lo as i64;
    let width_to = to_hi as i64 - to_lo as i64;
    if width_from == 0 {
        return if (x as i64) < to_lo as i64 + width_to {
            to_lo
        } else {
            to_hi
        };
    }
    let r = (x as i64 - from_lo as i64) as f32 / width_from as f32;
    if width_to == 0 {
        return to_hi;
    }
    to_lo + (r * width_to as f32) as i32
}

/// [`scale`] for bytes. Results outside `0..=255` saturate.
pub fn scale_byte(x: u8, from_lo: u8, from_hi: u8, to_lo: u8, to_hi: u8) -> u8 {
    let scaled = scale(
        x as i32,
        from_lo as i32,
        from_hi as i32,
        to_lo as i32,
        to_hi as i32,
    );
    scaled.clamp(0, 255) as u8
}

// ============================================================================
// Random numbers
// ============================================================================

/// Simple deterministic RNG using xorshift64
/// Demos own one of these and pass it around instead of sharing global state
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) } // Ensure non-zero
    }

    /// Seed from the wall clock
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x1234_ABCD);
        Self::new(nanos)
    }

    /// Get the next random u64
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Get a random u8
    #[inline]
    pub fn next_u8(&mut self) -> u8 {
        (self.next_u64() >> 56) as u8
    }

    /// Get a random f32 in [0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() & 0xFFFFFF) as f32 / 0x1000000 as f32
    }

    /// Get a random i32 in [0, n). Returns 0 when n <= 0.
    #[inline]
    pub fn below(&mut self, n: i32) -> i32 {
        if n <= 0 {
            return 0;
        }
        (self.next_u64() % n as u64) as i32
    }

    /// Get a random i32 in [min, max]
    ///
    /// # Panics
    /// Panics in debug builds if `min > max`
    #[inline]
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "range_i32: min ({}) must be <= max ({})", min, max);
        if min >= max {
            return min;
        }
        let range = (max as i64 - min as i64 + 1) as u64;
        (min as i64 + (self.next_u64() % range) as i64) as i32
    }

    /// Random opaque color
    #[inline]
    pub fn opaque_color(&mut self) -> u32 {
        crate::color::rgb(self.next_u8(), self.next_u8(), self.next_u8())
    }
}

// ============================================================================
// FPS Counter
// ============================================================================

/// FPS counter with rolling average
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count: sample_count.max(1),
        }
    }

    /// Call at the start of each frame to record timing
    /// Returns (delta_time, average_fps)
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }

        (dt, self.avg_fps())
    }

    pub fn avg_fps(&self) -> f32 {
        let avg_dt: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        if avg_dt > 0.0 {
            1.0 / avg_dt
        } else {
            0.0
        }
    }
}

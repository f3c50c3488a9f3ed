//! The "flame": a four-sample wraparound convolution
//!
//! Every pixel is replaced by the scaled sum of four samples around it. Which
//! four depends on the [`SamplePattern`]; some of the patterns move their
//! sample points with the effect time, which is what makes the image crawl.
//! Samples are read with circular addressing over the whole buffer, so the
//! edges bleed into each other.

use std::f32::consts::PI;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color;
use crate::display::PixelBuffer;

/// Where the four samples for a pixel come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplePattern {
    /// Left, right, self and the pixel below
    Snow,
    /// Upper left, upper right, self and the pixel above
    Highway,
    DitherHighway,
    Butterfly,
    Drift,
    Castle,
}

impl SamplePattern {
    pub const ALL: [SamplePattern; 6] = [
        SamplePattern::Snow,
        SamplePattern::Highway,
        SamplePattern::DitherHighway,
        SamplePattern::Butterfly,
        SamplePattern::Drift,
        SamplePattern::Castle,
    ];

    /// Look up a pattern by its effect number, 0 to 5
    pub fn from_number(n: usize) -> Option<Self> {
        Self::ALL.get(n).copied()
    }

    pub fn number(self) -> usize {
        self as usize
    }

    /// The following pattern, wrapping after the last one
    pub fn next(self) -> Self {
        Self::ALL[(self.number() + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            SamplePattern::Snow => "snow",
            SamplePattern::Highway => "highway",
            SamplePattern::DitherHighway => "dither highway",
            SamplePattern::Butterfly => "butterfly",
            SamplePattern::Drift => "drift",
            SamplePattern::Castle => "castle",
        }
    }

    /// Linear positions of the four samples for pixel (x, y)
    fn sample_positions(self, x: i64, y: i64, stride: i64, s: &Steps) -> [i64; 4] {
        let row = y * stride;
        match self {
            SamplePattern::Snow => [row + x - 1, row + x + 1, row + x, row + stride + x],
            SamplePattern::Highway => [
                row - stride + x - 1,
                row - stride + x + 1,
                row + x,
                row - stride + x,
            ],
            SamplePattern::DitherHighway => [
                row - stride + x - 1,
                row - stride + x + 1,
                row - stride + x - 1,
                row + stride + x + 1,
            ],
            SamplePattern::Butterfly => [
                row + x - s.two1,
                row + x + s.two1,
                row + x * s.two2,
                (y - s.two1) * stride + x * s.two2,
            ],
            SamplePattern::Drift => {
                let scaled = (x as f32 * s.stime) as i64;
                [
                    row + x - s.two2,
                    row + x + s.two1,
                    row + scaled,
                    (y - s.two2) * stride + scaled,
                ]
            }
            SamplePattern::Castle => [
                row + x - s.one1,
                row + x + s.one1,
                row + x * s.two1,
                (y - s.one2) * stride + x * s.two1,
            ],
        }
    }
}

/// Time-dependent offsets, truncated towards zero
#[derive(Debug, Clone, Copy)]
struct Steps {
    stime: f32,
    two1: i64,
    two2: i64,
    one1: i64,
    one2: i64,
}

impl Steps {
    fn new(time: f32, stime: f32) -> Self {
        Self {
            stime,
            two1: (2.0 - stime * 4.0) as i64,
            two2: (2.0 - time * 4.0) as i64,
            one1: (1.0 - stime * 2.0) as i64,
            one2: (1.0 - time * 2.0) as i64,
        }
    }
}

/// A configured flame filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flame {
    pub pattern: SamplePattern,
    /// Sums are divided by `divisor_base - sin(time * PI)`
    pub divisor_base: f32,
    /// Black out the outer two rows and columns after each pass
    pub zero_border: bool,
}

impl Flame {
    pub const TRIPPY_DIVISOR: f32 = 4.8;
    pub const BUTTERFLY_DIVISOR: f32 = 4.55;

    /// Smallest buffer side the sample offsets stay within wrap range for
    pub const MIN_SIDE: u32 = 4;

    pub fn new(pattern: SamplePattern) -> Self {
        Self {
            pattern,
            divisor_base: Self::TRIPPY_DIVISOR,
            zero_border: false,
        }
    }

    /// Butterfly samples with a black frame, slightly brighter than the default
    pub fn butterfly() -> Self {
        Self {
            pattern: SamplePattern::Butterfly,
            divisor_base: Self::BUTTERFLY_DIVISOR,
            zero_border: true,
        }
    }

    /// Run one pass over `buf` in place. `time` is clamped to `[0, 1]`.
    ///
    /// Pixels are visited row by row and overwritten as they go, so later
    /// pixels may sample values this pass already wrote. The result is opaque.
    pub fn apply(&self, buf: &mut PixelBuffer, time: f32) {
        if buf.width() < Self::MIN_SIDE || buf.height() < Self::MIN_SIDE {
            debug!(
                "flame skipped on {}x{} buffer, needs at least {}x{}",
                buf.width(),
                buf.height(),
                Self::MIN_SIDE,
                Self::MIN_SIDE
            );
            return;
        }

        let time = time.clamp(0.0, 1.0);
        let stime = (time * PI).sin();
        let steps = Steps::new(time, stime);
        let divisor = self.divisor_base - stime;

        let width = buf.width() as i64;
        let height = buf.height() as i64;
        let stride = buf.stride() as i64;
        let size = (stride * height) as usize;

        let average = |sum: u16| (sum as f32 / divisor).min(255.0) as u8;

        for y in 0..height {
            for x in 0..width {
                let mut sum = [0u16; 3];
                for pos in self.pattern.sample_positions(x, y, stride, &steps) {
                    let (r, g, b, _) = color::unpack(buf.get_wrap(pos as isize, size));
                    sum[0] += r as u16;
                    sum[1] += g as u16;
                    sum[2] += b as u16;
                }
                let value = color::rgb(average(sum[0]), average(sum[1]), average(sum[2]));
                buf.set_wrap((y * stride + x) as isize, size, value);
            }
        }

        if self.zero_border {
            zero_border(buf, 2);
        }
    }
}

impl Default for Flame {
    fn default() -> Self {
        Self::new(SamplePattern::Highway)
    }
}

/// Clear `thickness` rows and columns on every side to transparent black
pub fn zero_border(buf: &mut PixelBuffer, thickness: i32) {
    let (w, h) = (buf.width() as i32, buf.height() as i32);
    for i in 0..thickness {
        buf.clear_row(i, color::TRANSPARENT);
        buf.clear_row(h - 1 - i, color::TRANSPARENT);
        buf.clear_column(i, color::TRANSPARENT);
        buf.clear_column(w - 1 - i, color::TRANSPARENT);
    }
}

/// Effect time that sweeps back and forth between two bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlameClock {
    pub time: f32,
    pub low: f32,
    pub high: f32,
    step: f32,
}

impl FlameClock {
    pub fn new(low: f32, high: f32, step: f32) -> Self {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        Self {
            time: low,
            low,
            high,
            step: step.abs(),
        }
    }

    /// Advance one step and return the new time. Reverses at either bound.
    pub fn tick(&mut self) -> f32 {
        self.time += self.step;
        if self.time >= self.high {
            self.time = self.high;
            self.step = -self.step;
        } else if self.time <= self.low {
            self.time = self.low;
            self.step = -self.step;
        }
        self.time
    }
}

use log::debug;

use super::Demo;
use crate::color;
use crate::config::CanvasConfig;
use crate::display::PixelBuffer;
use crate::effects::{
    combine, map_buffer, pixel_fn, ContrastStretch, Flame, FlameClock, SamplePattern,
};
use crate::geometry::{Position, Triangle};
use crate::util::{clamp, Rng};

/// Triangles are drawn on every fourth frame
const DANCE_EVERY: u64 = 4;
/// Dance time added per frame; the pattern changes when it wraps
const CYCLE_STEP: f32 = 0.002;
/// Patterns the dance cycles through, by number
const PATTERN_CYCLE: usize = 4;

const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Dancing triangles smeared by the flame filter, shown contrast-stretched
///
/// The frame buffer keeps the colors as they were before swapping them back,
/// so every render swaps twice before drawing on top.
pub struct TriangleDance {
    rng: Rng,
    cores: usize,
    opaque: u8,
    flame: Flame,
    clock: FlameClock,
    contrast: ContrastStretch,
    cycle_time: f32,
    flame_time: f32,
    frame: u64,
    triangles: Vec<Triangle>,
}

impl TriangleDance {
    pub fn new(config: &CanvasConfig, rng: Rng) -> Self {
        let clock = config.flame.clock();
        let flame_time = clock.time;
        Self {
            rng,
            cores: config.cores(),
            opaque: config.opaque,
            flame: config.flame.flame(),
            clock,
            contrast: config.contrast.stretch(),
            cycle_time: 0.0,
            flame_time,
            frame: 0,
            triangles: Vec::with_capacity(DIRECTIONS.len()),
        }
    }

    /// One triangle anchored along a direction of travel. `time` goes from 0 to 1.
    fn dancing_triangle(&mut self, width: u32, height: u32, (dx, dy): (i32, i32)) -> Triangle {
        let t = self.cycle_time * self.cycle_time;
        let (w, h) = (width as i32, height as i32);
        let size = (w.min(h) * 3 / 5).max(1);

        let along = |extent: i32, dir: i32| match dir.signum() {
            1 => clamp((extent as f32 * t) as i32, size, extent - size),
            -1 => clamp((extent as f32 * (1.0 - t)) as i32, size, extent - size),
            _ => extent / 2,
        };
        let (x, y) = (along(w, dx), along(h, dy));

        let color = if dx == 0 && dy == 0 {
            color::pack(0xff, 0, 0, self.opaque)
        } else {
            let (r, g, b) = (self.rng.next_u8(), self.rng.next_u8(), self.rng.next_u8());
            color::pack(r, g, b, self.opaque)
        };

        let half = size / 2;
        let corner = |rng: &mut Rng| (x + rng.below(size) - half, y + rng.below(size) - half);
        let b = corner(&mut self.rng);
        let c = corner(&mut self.rng);
        Triangle::new((x, y), b, c, color)
    }

    fn next_pattern(&mut self) {
        let next = (self.flame.pattern.number() + 1) % PATTERN_CYCLE;
        self.flame.pattern = SamplePattern::from_number(next).unwrap_or(self.flame.pattern);
        debug!("flame pattern now {}", self.flame.pattern.name());
    }
}

impl Demo for TriangleDance {
    fn update(&mut self, _dt: f32, width: u32, height: u32) {
        self.triangles.clear();
        if self.frame % DANCE_EVERY == 0 {
            for dir in DIRECTIONS {
                let triangle = self.dancing_triangle(width, height, dir);
                self.triangles.push(triangle);
            }
        }
        self.frame += 1;

        self.cycle_time += CYCLE_STEP;
        if self.cycle_time >= 1.0 {
            self.cycle_time = 0.0;
            self.next_pattern();
        }
        self.flame_time = self.clock.tick();
    }

    fn render(&self, buffer: &mut PixelBuffer) {
        let swap = combine(pixel_fn::INVERT, pixel_fn::SET_BLUE_BITS);
        map_buffer(buffer, self.cores, combine(swap, swap));

        for triangle in &self.triangles {
            triangle.fill(buffer, self.cores);
        }
        if !self.triangles.is_empty() {
            self.flame.apply(buffer, self.flame_time);
        }
        self.flame.apply(buffer, self.flame_time);
    }

    fn name(&self) -> &str {
        "Triangle Dance"
    }

    fn post_process(&self, frame: &PixelBuffer, out: &mut PixelBuffer) {
        out.pixels_mut().copy_from_slice(frame.pixels());
        // the discard ratio follows the dance time
        let stretch = ContrastStretch {
            discard_ratio: self.cycle_time,
            ..self.contrast
        };
        stretch.apply(out, self.cores);
    }
}

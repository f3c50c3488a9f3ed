use image::{Rgba, RgbaImage};
use log::warn;

use super::Demo;
use crate::color;
use crate::compositor;
use crate::config::CanvasConfig;
use crate::display::PixelBuffer;
use crate::effects::{map_buffer, pixel_fn, ContrastStretch};
use crate::geometry::{Position, Triangle};
use crate::raster::DetachedPainter;
use crate::util::Rng;

/// Alpha of the faint shapes
const FAINT: u8 = 1;
const SPARKLES: usize = 24;
/// Frames between washes toward the background gray
const WASH_EVERY: u64 = 240;
const WASH_GRAY: u8 = 0x20;

struct Sparkle {
    at: Position,
    dx: i32,
    dy: i32,
    color: u32,
}

/// Faint random triangles with decorative lines and pixels painted by a
/// background thread, plus a few wandering sparkles that wrap at the edges
pub struct Blending {
    rng: Rng,
    cores: usize,
    painter: DetachedPainter,
    contrast: ContrastStretch,
    triangle: Option<Triangle>,
    sparkles: Vec<Sparkle>,
    wash: RgbaImage,
    washing: bool,
    frame: u64,
}

impl Blending {
    pub fn new(config: &CanvasConfig, mut rng: Rng) -> Self {
        let sparkles = (0..SPARKLES)
            .map(|_| Sparkle {
                at: Position::new(
                    rng.below(config.width as i32),
                    rng.below(config.height as i32),
                ),
                dx: rng.range_i32(-2, 2),
                dy: rng.range_i32(-2, 2),
                color: rng.opaque_color(),
            })
            .collect();

        Self {
            rng,
            cores: config.cores(),
            painter: DetachedPainter::new(),
            contrast: config.contrast.stretch(),
            triangle: None,
            sparkles,
            wash: wash_layer(config.width, config.height),
            washing: false,
            frame: 0,
        }
    }

    fn faint_color(&mut self) -> u32 {
        color::pack(self.rng.next_u8(), self.rng.next_u8(), self.rng.next_u8(), FAINT)
    }

    fn random_position(&mut self, width: u32, height: u32) -> Position {
        Position::new(
            self.rng.below(width as i32),
            self.rng.below(height as i32),
        )
    }
}

fn wash_layer(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([WASH_GRAY, WASH_GRAY, WASH_GRAY, 0xff]))
}

impl Demo for Blending {
    fn update(&mut self, _dt: f32, width: u32, height: u32) {
        if self.wash.dimensions() != (width, height) {
            self.wash = wash_layer(width, height);
        }

        let color = self.faint_color();
        let a = self.random_position(width, height);
        let b = self.random_position(width, height);
        let c = self.random_position(width, height);
        self.triangle = Some(Triangle::new(a, b, c, color));

        let from = self.random_position(width, height);
        let to = self.random_position(width, height);
        let line_color = self.faint_color();
        self.painter.line(from, to, line_color);
        let at = self.random_position(width, height);
        self.painter.pixel(at, color::pack(0xff, 0, 0, FAINT));

        for s in &mut self.sparkles {
            s.at.x = (s.at.x + s.dx).rem_euclid(width.max(1) as i32);
            s.at.y = (s.at.y + s.dy).rem_euclid(height.max(1) as i32);
        }

        self.frame += 1;
        self.washing = self.frame % WASH_EVERY == 0;
    }

    fn render(&self, buffer: &mut PixelBuffer) {
        if self.washing {
            map_buffer(buffer, self.cores, pixel_fn::OR_ALPHA);
            if let Err(e) = compositor::blit_image(buffer, &self.wash) {
                warn!("skipping wash: {}", e);
            }
        }

        if let Some(triangle) = &self.triangle {
            triangle.fill(buffer, self.cores);
        }
        self.painter.apply_ready(buffer);

        // a plus shape around each sparkle, folded across the edges
        for s in &self.sparkles {
            let Position { x, y } = s.at;
            for (ox, oy) in [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)] {
                buffer.set_xy_wrap(x + ox, y + oy, s.color);
            }
        }
    }

    fn name(&self) -> &str {
        "Blending"
    }

    /// Shown contrast-stretched so the faint layers stand out
    fn post_process(&self, frame: &PixelBuffer, out: &mut PixelBuffer) {
        out.pixels_mut().copy_from_slice(frame.pixels());
        self.contrast.apply(out, self.cores);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparkles_wrap_across_edges() {
        let config = CanvasConfig {
            width: 10,
            height: 6,
            cores: 1,
            ..CanvasConfig::default()
        };
        let mut demo = Blending::new(&config, Rng::new(21));
        demo.sparkles = vec![Sparkle {
            at: Position::new(9, 5),
            dx: 2,
            dy: 1,
            color: color::WHITE,
        }];
        demo.update(0.016, 10, 6);
        assert_eq!(demo.sparkles[0].at, Position::new(1, 0));

        let mut buf = PixelBuffer::new(10, 6);
        demo.triangle = None;
        demo.render(&mut buf);
        // the upper arm of the plus folds onto the last row
        assert_eq!(buf.get_pixel(0, 0), Some(color::WHITE));
        assert_eq!(buf.get_pixel(1, 5), Some(color::WHITE));
    }

    #[test]
    fn test_wash_pulls_toward_gray() {
        let config = CanvasConfig {
            width: 4,
            height: 4,
            cores: 2,
            ..CanvasConfig::default()
        };
        let mut demo = Blending::new(&config, Rng::new(4));
        demo.sparkles.clear();
        demo.triangle = None;
        demo.washing = true;

        let mut buf = PixelBuffer::new(4, 4);
        buf.fast_clear(color::pack(0xe0, 0xe0, 0xe0, 0));
        demo.render(&mut buf);
        let (r, g, b, a) = color::unpack(buf.pixels()[0]);
        assert_eq!((r, g, b, a), (0x80, 0x80, 0x80, 0xff));
    }

    #[test]
    fn test_resize_rebuilds_wash_layer() {
        let config = CanvasConfig::default();
        let mut demo = Blending::new(&config, Rng::new(1));
        demo.update(0.016, 20, 10);
        assert_eq!(demo.wash.dimensions(), (20, 10));
    }
}

use super::Demo;
use crate::color;
use crate::config::CanvasConfig;
use crate::display::PixelBuffer;
use crate::geometry::{Position, Triangle};
use crate::raster::{hline, line, vline, wire_triangle};
use crate::util::Rng;

const TRIANGLES: usize = 6;
const GRID_SPACING: i32 = 16;
const BACKGROUND: u32 = color::rgb(0x08, 0x08, 0x18);
const GRID: u32 = color::rgb(0x18, 0x20, 0x40);
const SCANLINE: u32 = color::rgb(0x30, 0x60, 0x90);

/// A corner bouncing inside the buffer, in pixels per second
#[derive(Debug, Clone, Copy)]
struct Corner {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
}

impl Corner {
    fn random(rng: &mut Rng, width: u32, height: u32) -> Self {
        Self {
            x: rng.next_f32() * width as f32,
            y: rng.next_f32() * height as f32,
            vx: rng.next_f32() * 120.0 - 60.0,
            vy: rng.next_f32() * 120.0 - 60.0,
        }
    }

    fn step(&mut self, dt: f32, width: u32, height: u32) {
        let (w, h) = (width.saturating_sub(1) as f32, height.saturating_sub(1) as f32);
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        if self.x < 0.0 || self.x > w {
            self.vx = -self.vx;
            self.x = self.x.clamp(0.0, w);
        }
        if self.y < 0.0 || self.y > h {
            self.vy = -self.vy;
            self.y = self.y.clamp(0.0, h);
        }
    }

    fn position(&self) -> Position {
        Position::new(self.x as i32, self.y as i32)
    }
}

/// Bouncing wireframe triangles over a grid with a sweeping scanline
pub struct WireTriangles {
    corners: Vec<[Corner; 3]>,
    colors: Vec<u32>,
    scan: (i32, i32),
}

impl WireTriangles {
    pub fn new(config: &CanvasConfig, mut rng: Rng) -> Self {
        let (width, height) = (config.width, config.height);
        let corners = (0..TRIANGLES)
            .map(|_| {
                [
                    Corner::random(&mut rng, width, height),
                    Corner::random(&mut rng, width, height),
                    Corner::random(&mut rng, width, height),
                ]
            })
            .collect();
        let colors = (0..TRIANGLES).map(|_| rng.opaque_color()).collect();
        Self {
            corners,
            colors,
            scan: (0, 0),
        }
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.corners.iter().zip(&self.colors).map(|(c, &color)| {
            Triangle::new(c[0].position(), c[1].position(), c[2].position(), color)
        })
    }
}

impl Demo for WireTriangles {
    fn update(&mut self, dt: f32, width: u32, height: u32) {
        for corners in &mut self.corners {
            for corner in corners.iter_mut() {
                corner.step(dt, width, height);
            }
        }
        self.scan.0 = (self.scan.0 + 1) % width.max(1) as i32;
        self.scan.1 = (self.scan.1 + 1) % height.max(1) as i32;
    }

    fn render(&self, buffer: &mut PixelBuffer) {
        buffer.fast_clear(BACKGROUND);

        let (w, h) = (buffer.width() as i32, buffer.height() as i32);
        for y in (0..h).step_by(GRID_SPACING as usize) {
            hline(buffer, y, 0, w, GRID);
        }
        for x in (0..w).step_by(GRID_SPACING as usize) {
            vline(buffer, x, 0, h, GRID);
        }
        buffer.clear_row(self.scan.1, SCANLINE);
        buffer.clear_column(self.scan.0, SCANLINE);

        for (i, triangle) in self.triangles().enumerate() {
            if i % 2 == 0 {
                triangle.outline(buffer);
            } else {
                wire_triangle(buffer, triangle.a, triangle.b, triangle.c, triangle.color);
                // a spoke from the first corner to the middle of the opposite edge
                let mid = Position::new(
                    (triangle.b.x + triangle.c.x) / 2,
                    (triangle.b.y + triangle.c.y) / 2,
                );
                line(buffer, triangle.a, mid, color::invert(triangle.color));
            }
            for corner in [triangle.a, triangle.b, triangle.c] {
                // corners sit inside the buffer except right after a resize
                let _ = buffer.plot_color(corner.x, corner.y, color::WHITE);
            }
        }
    }

    fn name(&self) -> &str {
        "Wire Triangles"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_bounces_off_edge() {
        let mut corner = Corner {
            x: 9.5,
            y: 2.0,
            vx: 60.0,
            vy: 0.0,
        };
        corner.step(0.1, 10, 10);
        assert_eq!(corner.x, 9.0);
        assert!(corner.vx < 0.0);
    }

    #[test]
    fn test_corners_stay_inside() {
        let config = CanvasConfig {
            width: 32,
            height: 24,
            ..CanvasConfig::default()
        };
        let mut demo = WireTriangles::new(&config, Rng::new(17));
        for _ in 0..200 {
            demo.update(0.05, 32, 24);
        }
        for t in demo.triangles() {
            for p in [t.a, t.b, t.c] {
                assert!((0..32).contains(&p.x) && (0..24).contains(&p.y), "{}", p);
            }
        }
    }

    #[test]
    fn test_grid_and_corners_drawn() {
        let config = CanvasConfig {
            width: 40,
            height: 40,
            ..CanvasConfig::default()
        };
        let mut demo = WireTriangles::new(&config, Rng::new(2));
        demo.scan = (39, 39);
        let mut buf = PixelBuffer::from_config(&config);
        demo.render(&mut buf);

        let t = demo.triangles().next().unwrap();
        assert_eq!(buf.get_pixel(t.a.x, t.a.y), Some(color::WHITE));

        demo.corners.clear();
        demo.colors.clear();
        demo.render(&mut buf);
        assert_eq!(buf.get_pixel(5, 16), Some(GRID));
        assert_eq!(buf.get_pixel(32, 7), Some(GRID));
        assert_eq!(buf.get_pixel(5, 5), Some(BACKGROUND));
        assert_eq!(buf.get_pixel(39, 3), Some(SCANLINE));
        assert_eq!(buf.get_pixel(3, 39), Some(SCANLINE));
    }
}

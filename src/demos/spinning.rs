use image::{Rgba, RgbaImage};
use log::warn;

use super::Demo;
use crate::color;
use crate::compositor;
use crate::config::CanvasConfig;
use crate::display::PixelBuffer;
use crate::geometry::{Position, Triangle};
use crate::math3d::{project, Vertex};
use crate::util::Rng;

const CAMERA_DISTANCE: f32 = 3.0;
const STAR_DENSITY: f32 = 0.004;

/// Corner indices of the cube faces, two triangles per face
const FACES: [[usize; 3]; 12] = [
    [0, 1, 3],
    [0, 3, 2],
    [4, 6, 7],
    [4, 7, 5],
    [0, 4, 5],
    [0, 5, 1],
    [2, 3, 7],
    [2, 7, 6],
    [0, 2, 6],
    [0, 6, 4],
    [1, 5, 7],
    [1, 7, 3],
];

/// A colored cube puffed out onto the unit sphere, spinning over a starfield
pub struct SpinningVertices {
    rng: Rng,
    cores: usize,
    vertices: Vec<Vertex>,
    angle: (f32, f32, f32),
    stars: RgbaImage,
}

impl SpinningVertices {
    pub fn new(config: &CanvasConfig, mut rng: Rng) -> Self {
        let channel = |on: bool| if on { 0xff } else { 0x40 };
        let vertices = (0..8u8)
            .map(|i| {
                let (bx, by, bz) = (i & 4 != 0, i & 2 != 0, i & 1 != 0);
                let sign = |on: bool| if on { 1.0 } else { -1.0 };
                Vertex::new(
                    sign(bx),
                    sign(by),
                    sign(bz),
                    channel(bx),
                    channel(by),
                    channel(bz),
                    color::OPAQUE,
                )
            })
            .filter_map(|v| v.normalize().ok())
            .collect();

        let stars = starfield(&mut rng, config.width, config.height);
        Self {
            rng,
            cores: config.cores(),
            vertices,
            angle: (0.0, 0.0, 0.0),
            stars,
        }
    }

    /// Screen positions and camera depth for every vertex
    fn projected(&self, width: u32, height: u32) -> Vec<Option<(Position, f32)>> {
        let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
        let fov = width.min(height) as f32 * 0.6;
        let (rx, ry, rz) = self.angle;
        self.vertices
            .iter()
            .map(|v| {
                let mut p = v.rotate_xyz(rx, ry, rz).pos;
                p.z += CAMERA_DISTANCE;
                project(p, fov, cx, cy).map(|(x, y)| (Position::new(x as i32, y as i32), p.z))
            })
            .collect()
    }
}

/// Sparse dim stars; the alpha is ignored when added on top
fn starfield(rng: &mut Rng, width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    let count = (width as f32 * height as f32 * STAR_DENSITY) as usize;
    for _ in 0..count {
        let x = rng.below(width as i32) as u32;
        let y = rng.below(height as i32) as u32;
        let v = 0x30 + rng.below(0x60) as u8;
        image.put_pixel(x, y, Rgba([v, v, v, 0]));
    }
    image
}

impl Demo for SpinningVertices {
    fn update(&mut self, dt: f32, width: u32, height: u32) {
        self.angle.0 += dt * 0.7;
        self.angle.1 += dt * 1.1;
        self.angle.2 += dt * 0.3;
        if self.stars.dimensions() != (width, height) {
            self.stars = starfield(&mut self.rng, width, height);
        }
    }

    fn render(&self, buffer: &mut PixelBuffer) {
        buffer.fast_clear(color::BLACK);

        let points = self.projected(buffer.width(), buffer.height());
        let mut faces: Vec<(f32, Triangle)> = FACES
            .iter()
            .filter_map(|&[a, b, c]| {
                let (pa, za) = points.get(a).copied().flatten()?;
                let (pb, zb) = points.get(b).copied().flatten()?;
                let (pc, zc) = points.get(c).copied().flatten()?;
                let shade = color::blend(self.vertices[a].color, self.vertices[c].color);
                let depth = (za + zb + zc) / 3.0;
                Some((depth, Triangle::new(pa, pb, pc, shade | 0xff00_0000)))
            })
            .collect();

        // far faces first
        faces.sort_by(|x, y| y.0.total_cmp(&x.0));
        for (_, face) in &faces {
            face.fill(buffer, self.cores);
        }

        for (vertex, point) in self.vertices.iter().zip(&points) {
            if let Some((p, _)) = point {
                let _ = buffer.plot_color(p.x, p.y, color::add(vertex.color, color::WHITE));
            }
        }

        if let Err(e) = compositor::blit_image_on_top(buffer, &self.stars) {
            warn!("skipping starfield: {}", e);
        }
    }

    fn name(&self) -> &str {
        "Spinning Vertices"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CanvasConfig {
        CanvasConfig {
            width: 64,
            height: 64,
            cores: 2,
            ..CanvasConfig::default()
        }
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        let demo = SpinningVertices::new(&config(), Rng::new(1));
        assert_eq!(demo.vertices.len(), 8);
        for v in &demo.vertices {
            assert!((v.length() - 1.0).abs() < 1e-5, "{}", v);
        }
    }

    #[test]
    fn test_projection_stays_near_center() {
        let demo = SpinningVertices::new(&config(), Rng::new(1));
        for point in demo.projected(64, 64) {
            let (p, z) = point.expect("cube is in front of the camera");
            assert!(z > 0.0);
            assert!((0..64).contains(&p.x) && (0..64).contains(&p.y), "{}", p);
        }
    }

    #[test]
    fn test_center_is_covered() {
        let mut demo = SpinningVertices::new(&config(), Rng::new(1));
        demo.update(0.5, 64, 64);
        let mut buf = PixelBuffer::new(64, 64);
        demo.render(&mut buf);
        assert_ne!(buf.get_pixel(32, 32), Some(color::BLACK));
    }

    #[test]
    fn test_starfield_follows_size() {
        let mut demo = SpinningVertices::new(&config(), Rng::new(1));
        demo.update(0.016, 100, 50);
        assert_eq!(demo.stars.dimensions(), (100, 50));
    }
}

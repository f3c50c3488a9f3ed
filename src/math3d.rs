//! 3D math for the demo scenes
//!
//! Provides a small vector type, rotations, perspective projection and a
//! colored vertex.

use std::fmt;
use std::ops::Mul;

use crate::color;
use crate::error::{RenderError, Result};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Rotate around X axis
    #[inline]
    pub fn rotate_x(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }

    /// Rotate around Y axis
    #[inline]
    pub fn rotate_y(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }

    /// Rotate around Z axis
    #[inline]
    pub fn rotate_z(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
            z: self.z,
        }
    }

    #[inline]
    pub fn rotate_xyz(&self, rx: f32, ry: f32, rz: f32) -> Self {
        self.rotate_x(rx).rotate_y(ry).rotate_z(rz)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// Project a 3D point to 2D screen coordinates
///
/// - `fov`: distance from eye to projection plane
/// - `cx`, `cy`: screen center
///
/// Returns None if the point is behind the camera
#[inline]
pub fn project(point: Vec3, fov: f32, cx: f32, cy: f32) -> Option<(f32, f32)> {
    if point.z <= 0.0 {
        return None;
    }
    let scale = fov / point.z;
    Some((cx + point.x * scale, cy + point.y * scale))
}

// ============================================================================
// Vertex
// ============================================================================

/// A point in 3D space carrying a packed ARGB color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Vec3,
    pub color: u32,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            pos: Vec3::new(x, y, z),
            color: color::pack(r, g, b, a),
        }
    }

    pub fn with_color(pos: Vec3, color: u32) -> Self {
        Self { pos, color }
    }

    /// The color as (r, g, b, a)
    #[inline]
    pub fn rgba(&self) -> (u8, u8, u8, u8) {
        color::unpack(self.color)
    }

    #[inline]
    pub fn set_rgba(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.color = color::pack(r, g, b, a);
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.pos.length()
    }

    /// Same vertex scaled to unit length. The color is kept.
    pub fn normalize(&self) -> Result<Self> {
        let len = self.length();
        if len == 0.0 {
            return Err(RenderError::ZeroLengthVertex);
        }
        Ok(Self {
            pos: self.pos * (1.0 / len),
            color: self.color,
        })
    }

    pub fn rotate_xyz(&self, rx: f32, ry: f32, rz: f32) -> Self {
        Self {
            pos: self.pos.rotate_xyz(rx, ry, rz),
            color: self.color,
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.rgba();
        write!(
            f,
            "v({}, {}, {}) color({}, {}, {}, {})",
            self.pos.x, self.pos.y, self.pos.z, r, g, b, a
        )
    }
}

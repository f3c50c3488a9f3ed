//! 2D integer geometry: positions, triangles and grid interpolation

use std::fmt;

/// A position in 2D pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Three corners and a flat fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub a: Position,
    pub b: Position,
    pub c: Position,
    pub color: u32,
}

impl Triangle {
    pub fn new(a: impl Into<Position>, b: impl Into<Position>, c: impl Into<Position>, color: u32) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
            color,
        }
    }

    /// Bounding box as (min_x, max_x, min_y, max_y)
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        let (min_x, max_x) = crate::util::min_max3(self.a.x, self.b.x, self.c.x);
        let (min_y, max_y) = crate::util::min_max3(self.a.y, self.b.y, self.c.y);
        (min_x, max_x, min_y, max_y)
    }

    /// Twice the signed area (shoelace formula). Zero for collinear corners.
    pub fn doubled_area(&self) -> i64 {
        let (p0, p1, p2) = (self.a, self.b, self.c);
        let (x0, y0) = (p0.x as i64, p0.y as i64);
        let (x1, y1) = (p1.x as i64, p1.y as i64);
        let (x2, y2) = (p2.x as i64, p2.y as i64);
        -y1 * x2 + y0 * (-x1 + x2) + x0 * (y1 - y2) + x1 * y2
    }
}

/// The x-distance and y-distance between two points
#[inline]
pub fn lengths(p1: Position, p2: Position) -> (i32, i32) {
    ((p1.x - p2.x).abs(), (p1.y - p2.y).abs())
}

/// Grid points approximating the segment from `p1` to `p2`.
///
/// Steps one pixel at a time along the major axis (x when `|dx| > |dy|`),
/// starting from the end with the smaller major coordinate, and accumulates a
/// fractional step on the minor axis. The minor coordinate is truncated, never
/// rounded. The far end is excluded, so the iterator yields exactly
/// `max(|dx|, |dy|)` points.
pub fn interpolate(p1: Position, p2: Position) -> Interpolate {
    Interpolate::new(p1, p2)
}

/// Single-pass iterator returned by [`interpolate`]
#[derive(Debug, Clone)]
pub struct Interpolate {
    x_major: bool,
    major: i32,
    major_stop: i32,
    minor: f32,
    minor_step: f32,
}

impl Interpolate {
    fn new(p1: Position, p2: Position) -> Self {
        let (dx, dy) = lengths(p1, p2);
        let x_major = dx > dy;

        let (start, stop) = if x_major {
            if p1.x <= p2.x { (p1, p2) } else { (p2, p1) }
        } else if p1.y <= p2.y {
            (p1, p2)
        } else {
            (p2, p1)
        };

        let (major, major_stop, minor, minor_delta, major_len) = if x_major {
            (start.x, stop.x, start.y, stop.y - start.y, dx)
        } else {
            (start.y, stop.y, start.x, stop.x - start.x, dy)
        };

        let minor_step = if major_len == 0 {
            0.0
        } else {
            minor_delta as f32 / major_len as f32
        };

        Self {
            x_major,
            major,
            major_stop,
            minor: minor as f32,
            minor_step,
        }
    }
}

impl Iterator for Interpolate {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.major >= self.major_stop {
            return None;
        }
        let minor = self.minor as i32;
        let p = if self.x_major {
            Position::new(self.major, minor)
        } else {
            Position::new(minor, self.major)
        };
        self.major += 1;
        self.minor += self.minor_step;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.major_stop - self.major).max(0) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Interpolate {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, -4).to_string(), "(3, -4)");
    }

    #[test]
    fn test_interpolate_length_is_major_extent() {
        let pts: Vec<_> = interpolate(Position::new(0, 0), Position::new(10, 3)).collect();
        assert_eq!(pts.len(), 10);
        assert_eq!(pts[0], Position::new(0, 0));
        assert!(pts.windows(2).all(|w| w[1].x == w[0].x + 1));

        let pts: Vec<_> = interpolate(Position::new(2, 9), Position::new(0, 0)).collect();
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], Position::new(0, 0));
    }

    #[test]
    fn test_interpolate_truncates_minor_axis() {
        // 3/4 step: 0.0, 0.75, 1.5, 2.25
        let ys: Vec<_> = interpolate(Position::new(0, 0), Position::new(4, 3))
            .map(|p| p.y)
            .collect();
        assert_eq!(ys, vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_interpolate_descending_minor() {
        let pts: Vec<_> = interpolate(Position::new(0, 4), Position::new(8, 0)).collect();
        assert_eq!(pts.len(), 8);
        assert_eq!(pts[0], Position::new(0, 4));
        assert!(pts.windows(2).all(|w| w[1].y <= w[0].y));
    }

    #[test]
    fn test_interpolate_same_point_is_empty() {
        assert_eq!(interpolate(Position::new(5, 5), Position::new(5, 5)).count(), 0);
    }

    #[test]
    fn test_doubled_area_sign_and_zero() {
        let t = Triangle::new((0, 0), (10, 0), (0, 10), 0);
        assert_eq!(t.doubled_area().abs(), 100);
        let flat = Triangle::new((0, 0), (5, 5), (10, 10), 0);
        assert_eq!(flat.doubled_area(), 0);
        assert_eq!(t.bounds(), (0, 10, 0, 10));
    }
}

//! Property-based tests for color packing, row partitioning and triangle fills.

use multiraster::color;
use multiraster::display::PixelBuffer;
use multiraster::geometry::Position;
use multiraster::raster::{fill_triangle, partition_rows};

const FILL: u32 = 0xff12_3456;
const BACKGROUND: u32 = 0xff00_0000;

/// Twice the signed area of (a, b, p); the sign tells which side of a->b p is on
fn edge(a: Position, b: Position, p: Position) -> i64 {
    (b.x - a.x) as i64 * (p.y - a.y) as i64 - (b.y - a.y) as i64 * (p.x - a.x) as i64
}

fn strictly_inside(a: Position, b: Position, c: Position, p: Position) -> bool {
    let (e0, e1, e2) = (edge(a, b, p), edge(b, c, p), edge(c, a, p));
    (e0 > 0 && e1 > 0 && e2 > 0) || (e0 < 0 && e1 < 0 && e2 < 0)
}

fn filled(points: [(i32, i32); 3], cores: usize) -> PixelBuffer {
    let mut buf = PixelBuffer::new(48, 40);
    buf.fast_clear(BACKGROUND);
    let [a, b, c] = points.map(Position::from);
    fill_triangle(&mut buf, a, b, c, FILL, cores);
    buf
}

proptest::proptest! {
    /// pack and unpack are exact inverses for every channel value.
    #[test]
    fn pack_unpack_round_trip(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255, a in 0u8..=255) {
        assert_eq!(color::unpack(color::pack(r, g, b, a)), (r, g, b, a));
    }

    /// Bands cover the span exactly, in order, without gaps or overlap.
    #[test]
    fn partition_covers_span(min_y in -500i32..500, height in 0i32..=1000, cores in 1usize..=64) {
        let max_y = min_y + height;
        let bands = partition_rows(min_y, max_y, cores);

        assert!(bands.len() <= cores, "{} bands for {} cores", bands.len(), cores);
        if height == 0 {
            assert!(bands.is_empty());
            return Ok(());
        }
        assert_eq!(bands.first().map(|b| b.start), Some(min_y));
        assert_eq!(bands.last().map(|b| b.end), Some(max_y));
        for pair in bands.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for band in &bands {
            assert!(!band.is_empty(), "empty band {:?}", band);
        }
        let total: i32 = bands.iter().map(|b| b.end - b.start).sum();
        assert_eq!(total, height);
    }

    /// Strictly inside pixels get the fill; nothing outside the bounding box changes.
    #[test]
    fn fill_respects_triangle(
        ax in -10i32..58, ay in -10i32..50,
        bx in -10i32..58, by in -10i32..50,
        cx in -10i32..58, cy in -10i32..50,
        cores in 1usize..=9,
    ) {
        let (a, b, c) = (Position::new(ax, ay), Position::new(bx, by), Position::new(cx, cy));
        let buf = filled([(ax, ay), (bx, by), (cx, cy)], cores);

        let (min_x, max_x) = (ax.min(bx).min(cx), ax.max(bx).max(cx));
        let (min_y, max_y) = (ay.min(by).min(cy), ay.max(by).max(cy));
        for y in 0..buf.height() as i32 {
            for x in 0..buf.width() as i32 {
                let got = buf.get_pixel(x, y);
                if x < min_x || x > max_x || y < min_y || y > max_y {
                    assert_eq!(got, Some(BACKGROUND), "({}, {}) outside the box changed", x, y);
                } else if strictly_inside(a, b, c, Position::new(x, y)) {
                    assert_eq!(got, Some(FILL), "({}, {}) inside but not filled", x, y);
                }
            }
        }
    }

    /// The number of workers does not change the result.
    #[test]
    fn fill_is_core_count_invariant(
        ax in -10i32..58, ay in -10i32..50,
        bx in -10i32..58, by in -10i32..50,
        cx in -10i32..58, cy in -10i32..50,
        cores in 2usize..=16,
    ) {
        let points = [(ax, ay), (bx, by), (cx, cy)];
        assert_eq!(filled(points, 1), filled(points, cores));
    }
}

//! Rasterizers for points, lines and triangles

pub mod detached;
pub mod line;
pub mod triangle;

pub use detached::{DecorativeDraw, DetachedPainter};
pub use line::{hline, line, line_points, vline};
pub use triangle::{fill_triangle, partition_rows, wire_triangle};

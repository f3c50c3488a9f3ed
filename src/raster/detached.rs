//! Best-effort decorative drawing on a background thread
//!
//! A [`DetachedPainter`] accepts draw commands without blocking, rasterizes
//! them on a worker thread and hands the resulting pixels back. The render
//! loop picks up whatever has arrived with [`DetachedPainter::apply_ready`].
//! There is no ordering guarantee relative to frames: a command submitted
//! during one frame may land in the next one, or later.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::{debug, warn};

use super::line::line_points;
use crate::display::PixelBuffer;
use crate::geometry::Position;

/// Something to draw without waiting for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorativeDraw {
    Pixel { at: Position, color: u32 },
    Line { from: Position, to: Position, color: u32 },
}

/// Pixels produced for one command
type Fragment = Vec<(Position, u32)>;

/// Rasterizes decorative draws in a background thread
pub struct DetachedPainter {
    commands: Sender<DecorativeDraw>,
    fragments: Receiver<Fragment>,
    _worker: thread::JoinHandle<()>,
}

impl DetachedPainter {
    pub fn new() -> Self {
        let (commands, command_rx) = mpsc::channel();
        let (fragment_tx, fragments) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::paint_loop(command_rx, fragment_tx);
        });

        Self {
            commands,
            fragments,
            _worker: handle,
        }
    }

    fn paint_loop(commands: Receiver<DecorativeDraw>, fragments: Sender<Fragment>) {
        for draw in commands.iter() {
            let fragment: Fragment = match draw {
                DecorativeDraw::Pixel { at, color } => vec![(at, color)],
                DecorativeDraw::Line { from, to, color } => {
                    line_points(from, to).map(|p| (p, color)).collect()
                }
            };
            if fragments.send(fragment).is_err() {
                // Painter dropped, exit
                break;
            }
        }
        debug!("detached painter stopped");
    }

    /// Queue a draw. Never blocks; a dead worker is logged and ignored.
    pub fn submit(&self, draw: DecorativeDraw) {
        if self.commands.send(draw).is_err() {
            warn!("detached painter is gone, dropping {:?}", draw);
        }
    }

    pub fn pixel(&self, at: Position, color: u32) {
        self.submit(DecorativeDraw::Pixel { at, color });
    }

    pub fn line(&self, from: Position, to: Position, color: u32) {
        self.submit(DecorativeDraw::Line { from, to, color });
    }

    /// Write every fragment that has arrived so far (non-blocking).
    ///
    /// Pixels outside the buffer are dropped. Returns how many pixels were
    /// written.
    pub fn apply_ready(&self, buf: &mut PixelBuffer) -> usize {
        let mut written = 0;
        for fragment in self.fragments.try_iter() {
            for (p, color) in fragment {
                if buf.in_bounds(p.x, p.y) {
                    buf.set_pixel(p.x, p.y, color);
                    written += 1;
                }
            }
        }
        written
    }
}

impl Default for DetachedPainter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    /// Keep applying until `expected` pixels have landed or a second passes
    fn apply_until(painter: &DetachedPainter, buf: &mut PixelBuffer, expected: usize) -> usize {
        let deadline = Instant::now() + Duration::from_secs(1);
        let mut total = 0;
        while total < expected && Instant::now() < deadline {
            total += painter.apply_ready(buf);
            thread::sleep(Duration::from_millis(1));
        }
        total
    }

    #[test]
    fn test_pixels_and_lines_arrive() {
        let painter = DetachedPainter::new();
        let mut buf = PixelBuffer::new(16, 16);

        painter.pixel(Position::new(3, 4), 7);
        painter.line(Position::new(0, 10), Position::new(8, 10), 9);

        assert_eq!(apply_until(&painter, &mut buf, 9), 9);
        assert_eq!(buf.get_pixel(3, 4), Some(7));
        assert_eq!(buf.get_pixel(0, 10), Some(9));
        assert_eq!(buf.get_pixel(7, 10), Some(9));
        assert_eq!(buf.get_pixel(8, 10), Some(0));
    }

    #[test]
    fn test_out_of_bounds_pixels_dropped() {
        let painter = DetachedPainter::new();
        let mut buf = PixelBuffer::new(4, 4);
        painter.pixel(Position::new(-1, 0), 1);
        painter.line(Position::new(2, 1), Position::new(10, 1), 1);
        painter.pixel(Position::new(0, 0), 1);

        assert_eq!(apply_until(&painter, &mut buf, 3), 3);
        assert_eq!(buf.pixels().iter().filter(|&&c| c == 1).count(), 3);
    }

    #[test]
    fn test_apply_with_nothing_queued() {
        let painter = DetachedPainter::default();
        let mut buf = PixelBuffer::new(2, 2);
        assert_eq!(painter.apply_ready(&mut buf), 0);
    }
}

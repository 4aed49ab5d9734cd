//! Line and rectangle rasterization.
//!
//! Shapes with any corner outside the image are not clipped: the whole
//! call is ignored and the bitmap is left untouched.

use crate::bitmap::MonoBitmap;
use crate::color::Color;

impl MonoBitmap {
    /// Draw a one-pixel line from `(x0, y0)` to `(x1, y1)`, both ends
    /// inclusive, with Bresenham's algorithm.
    ///
    /// The endpoints are put in a fixed order before stepping, so both
    /// directions light the same pixels.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        if !self.contains(x0, y0) || !self.contains(x1, y1) {
            return;
        }
        let ((x0, y0), (x1, y1)) = if (x0, y0) <= (x1, y1) {
            ((x0, y0), (x1, y1))
        } else {
            ((x1, y1), (x0, y0))
        };
        for (x, y) in BresenhamLine::new(x0, y0, x1, y1) {
            self.set_pixel(x as u32, y as u32, color);
        }
    }

    /// Fill the closed rectangle spanned by two opposite corners, in any
    /// order. The rectangle is solid, not an outline.
    pub fn draw_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Color) {
        let (width, height) = (self.width(), self.height());
        if x0 >= width || x1 >= width || y0 >= height || y1 >= height {
            return;
        }
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));
        for y in top..=bottom {
            for x in left..=right {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        self.draw_rect(0, 0, self.width() - 1, self.height() - 1, color);
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }
}

/// Integer line stepper yielding every point from start to end inclusive.
///
/// The error term is kept in `i64`: doubling it overflows `i32` once a
/// line spans more than 2^30 pixels.
#[derive(Clone, Debug)]
pub(crate) struct BresenhamLine {
    x: i64,
    y: i64,
    x1: i64,
    y1: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl BresenhamLine {
    pub(crate) fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (x0, y0, x1, y1) = (
            i64::from(x0),
            i64::from(y0),
            i64::from(x1),
            i64::from(y1),
        );
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        Self {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.done {
            return None;
        }
        // stays between the two i32 endpoints
        let point = (self.x as i32, self.y as i32);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(point);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(point)
    }
}

//! Bresenham line rasterization for hairline strokes.
//!
//! Endpoints are rounded to the pixel grid (half toward +infinity) and the
//! line is walked with integer error terms only, so the output is exact and
//! ordered from the first endpoint to the second, both inclusive.

use std::iter::Take;

use crate::basics::{round_half_up, Point};

/// Iterator over the pixels of a 1-pixel-wide line.
///
/// The error term is kept at twice its nominal value so the half-step start
/// (`dx / 2` or `-dy / 2`) stays an integer.
#[derive(Debug, Clone)]
pub struct LineBresenham {
    x: i32,
    y: i32,
    x2: i32,
    y2: i32,
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err2: i64,
    done: bool,
}

impl LineBresenham {
    /// Line between two integer pixel positions.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let dx = (x2 as i64 - x1 as i64).abs();
        let dy = (y2 as i64 - y1 as i64).abs();
        Self {
            x: x1,
            y: y1,
            x2,
            y2,
            dx,
            dy,
            sx: if x1 < x2 { 1 } else { -1 },
            sy: if y1 < y2 { 1 } else { -1 },
            err2: if dx > dy { dx } else { -dy },
            done: false,
        }
    }

    /// Line between two document-space points, rounded to pixels.
    pub fn from_points(p1: Point, p2: Point) -> Self {
        Self::new(
            round_half_up(p1.x),
            round_half_up(p1.y),
            round_half_up(p2.x),
            round_half_up(p2.y),
        )
    }

    /// Number of pixels still to be produced.
    pub fn remaining(&self) -> usize {
        (self.steps_left() + 1) as usize
    }

    /// Major-axis steps left before the last pixel; -1 once finished.
    fn steps_left(&self) -> i64 {
        if self.done {
            return -1;
        }
        let rx = (self.x2 as i64 - self.x as i64).abs();
        let ry = (self.y2 as i64 - self.y as i64).abs();
        rx.max(ry)
    }

    /// Skip the next `steps` pixels without walking them.
    ///
    /// Every step moves one pixel along the major axis and the error term
    /// stays in a fixed window (`[0, 2dx)` for x-major lines, `(-2dy, 0]`
    /// otherwise), so the minor-axis offset after `k` steps is a single
    /// ceiling division. The result is identical to calling `next()`
    /// `steps` times.
    pub fn advance(&mut self, steps: u64) {
        let k = (steps as i128).min(self.steps_left() as i128);
        if k <= 0 {
            return;
        }
        let (dx, dy, e0) = (self.dx as i128, self.dy as i128, self.err2 as i128);
        if dx > dy {
            let m = div_ceil(2 * k * dy - e0, 2 * dx);
            self.x = (self.x as i128 + self.sx as i128 * k) as i32;
            self.y = (self.y as i128 + self.sy as i128 * m) as i32;
            self.err2 = (e0 - 2 * k * dy + 2 * m * dx) as i64;
        } else {
            let m = div_ceil(e0 + 2 * k * dx, 2 * dy);
            self.y = (self.y as i128 + self.sy as i128 * k) as i32;
            self.x = (self.x as i128 + self.sx as i128 * m) as i32;
            self.err2 = (e0 + 2 * k * dx - 2 * m * dy) as i64;
        }
    }

    /// Restrict the walk to the stretch that can touch a `width x height`
    /// grid.
    ///
    /// Pixels before that stretch are skipped with [`advance`](Self::advance)
    /// and the walk stops once the line has left the grid for good, so the
    /// cost is bounded by the grid size rather than the line length. The
    /// pixels produced are exactly those of the full walk over that stretch;
    /// a couple of them may lie just outside the grid.
    pub fn clipped(mut self, width: u32, height: u32) -> Take<Self> {
        let steps = self.steps_left();
        if steps < 0 {
            return self.take(0);
        }
        let (w, h) = (width as i64, height as i64);
        let (maj, smaj, maj_ext, min, smin, min_ext, dmaj, dmin) = if self.dx > self.dy {
            (self.x, self.sx, w, self.y, self.sy, h, self.dx, self.dy)
        } else {
            (self.y, self.sy, h, self.x, self.sx, w, self.dy, self.dx)
        };

        // Steps whose major coordinate is on the grid.
        let (mut lo, mut hi) = step_window(maj, smaj, maj_ext);
        lo = lo.max(0);
        hi = hi.min(steps);

        // Minor steps whose minor coordinate is on the grid, widened by two
        // to cover the rounding of the error term.
        let (mlo, mhi) = step_window(min, smin, min_ext);
        if dmin == 0 {
            if mlo > 0 || mhi < 0 {
                return self.take(0);
            }
        } else {
            let (dmaj, dmin) = (dmaj as i128, dmin as i128);
            let klo = div_floor((mlo as i128 - 2) * dmaj, dmin);
            let khi = div_ceil((mhi as i128 + 2) * dmaj, dmin);
            lo = lo.max(klo.clamp(0, steps as i128) as i64);
            hi = hi.min(khi.clamp(-1, steps as i128) as i64);
        }

        if lo > hi {
            return self.take(0);
        }
        self.advance(lo as u64);
        self.take((hi - lo + 1) as usize)
    }
}

/// Range of step counts `j` with `0 <= pos + dir * j < extent`.
fn step_window(pos: i32, dir: i32, extent: i64) -> (i64, i64) {
    let pos = pos as i64;
    if dir > 0 {
        (-pos, extent - 1 - pos)
    } else {
        (pos - (extent - 1), pos)
    }
}

#[inline]
fn div_floor(a: i128, b: i128) -> i128 {
    a.div_euclid(b)
}

#[inline]
fn div_ceil(a: i128, b: i128) -> i128 {
    -(-a).div_euclid(b)
}

impl Iterator for LineBresenham {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.done {
            return None;
        }
        let current = (self.x, self.y);
        if self.x == self.x2 && self.y == self.y2 {
            self.done = true;
            return Some(current);
        }
        let e2 = self.err2;
        if e2 > -2 * self.dx {
            self.err2 -= 2 * self.dy;
            self.x += self.sx;
        }
        if e2 < 2 * self.dy {
            self.err2 += 2 * self.dx;
            self.y += self.sy;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

/// Collect the pixels of the line from (x0, y0) to (x1, y1).
pub fn rasterize_line(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<(i32, i32)> {
    LineBresenham::from_points(Point::new(x0, y0), Point::new(x1, y1)).collect()
}

// ============================================================================
// Tests
// ============================================================================

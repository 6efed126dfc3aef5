//! Polygon scanline rasterizer with anti-aliased coverage.
//!
//! Accepts closed contours (`move_to_d` / `line_to_d` / `close_polygon`),
//! converts them to cells with [`RasterizerCells`], and sweeps the cells row
//! by row, handing each covered span to a [`CoverageSink`]. Overlapping
//! contours combine with the non-zero winding rule, so a union of shapes
//! drawn with the same orientation rasterizes as one solid region.

use crate::basics::{poly_coord, Point, POLY_SUBPIXEL_SHIFT};
use crate::rasterizer_cells::RasterizerCells;

const AA_SHIFT: u32 = 8;
const AA_MASK: i64 = (1 << AA_SHIFT) - 1;

// ============================================================================
// CoverageSink
// ============================================================================

/// Receiver of rasterized coverage.
///
/// Spans may start left of column 0; implementations clip to their own
/// extents.
pub trait CoverageSink {
    /// Blend `len` pixels of row `y` starting at column `x` with `cover`.
    fn blend_hspan(&mut self, x: i32, y: i32, len: u32, cover: u8);
}

// ============================================================================
// RasterizerScanline
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Initial,
    MoveTo,
    LineTo,
    Closed,
}

/// High-level polygon rasterizer, non-zero winding.
///
/// Usage:
/// 1. Optionally restrict output with `clip_box()`
/// 2. Define contours with `move_to_d()` / `line_to_d()` or `add_polygon()`
/// 3. Call `render()` to feed coverage into a sink
#[derive(Debug, Clone)]
pub struct RasterizerScanline {
    outline: RasterizerCells,
    start_x: i32,
    start_y: i32,
    last_x: i32,
    last_y: i32,
    status: Status,
}

impl RasterizerScanline {
    pub fn new() -> Self {
        Self {
            outline: RasterizerCells::new(),
            start_x: 0,
            start_y: 0,
            last_x: 0,
            last_y: 0,
            status: Status::Initial,
        }
    }

    /// Discard all polygon data.
    pub fn reset(&mut self) {
        self.outline.reset();
        self.status = Status::Initial;
    }

    /// Only produce coverage for pixels of a `width x height` grid.
    pub fn clip_box(&mut self, width: u32, height: u32) {
        self.status = Status::Initial;
        self.outline.clip_box(width, height);
    }

    /// Close the current contour back to its first vertex.
    pub fn close_polygon(&mut self) {
        if self.status == Status::LineTo {
            self.outline
                .line(self.last_x, self.last_y, self.start_x, self.start_y);
            self.last_x = self.start_x;
            self.last_y = self.start_y;
            self.status = Status::Closed;
        }
    }

    /// Start a new contour, closing the previous one.
    pub fn move_to_d(&mut self, x: f64, y: f64) {
        if self.outline.sorted() {
            self.reset();
        }
        self.close_polygon();
        self.start_x = poly_coord(x);
        self.start_y = poly_coord(y);
        self.last_x = self.start_x;
        self.last_y = self.start_y;
        self.status = Status::MoveTo;
    }

    pub fn line_to_d(&mut self, x: f64, y: f64) {
        let (x, y) = (poly_coord(x), poly_coord(y));
        self.outline.line(self.last_x, self.last_y, x, y);
        self.last_x = x;
        self.last_y = y;
        self.status = Status::LineTo;
    }

    /// Add a closed polygon.
    pub fn add_polygon(&mut self, pts: &[Point]) {
        let Some((first, rest)) = pts.split_first() else {
            return;
        };
        self.move_to_d(first.x, first.y);
        for p in rest {
            self.line_to_d(p.x, p.y);
        }
        self.close_polygon();
    }

    pub fn min_y(&self) -> i32 {
        self.outline.min_y()
    }
    pub fn max_y(&self) -> i32 {
        self.outline.max_y()
    }

    /// Convert accumulated area into coverage (0..=255).
    ///
    /// Takes 64-bit sums; a row crossed by thousands of stacked polygons
    /// winds far past the 32-bit range.
    #[inline]
    pub fn calculate_alpha(area: i64) -> u8 {
        let cover = (area >> (POLY_SUBPIXEL_SHIFT * 2 + 1 - AA_SHIFT)).abs();
        cover.min(AA_MASK) as u8
    }

    /// Sweep every row and feed coverage into `sink`.
    ///
    /// Returns `false` when nothing was rasterized.
    pub fn render<S: CoverageSink>(&mut self, sink: &mut S) -> bool {
        self.close_polygon();
        self.outline.sort_cells();
        if self.outline.total_cells() == 0 {
            return false;
        }

        for y in self.outline.min_y()..=self.outline.max_y() {
            let cell_indices = self.outline.scanline_cells(y);
            let mut idx = 0;
            let mut cover: i64 = 0;

            while idx < cell_indices.len() {
                let cur = self.outline.cell(cell_indices[idx]);
                let x = cur.x;
                let mut area = cur.area;
                cover += cur.cover;
                idx += 1;

                // Accumulate all cells sharing this x
                while idx < cell_indices.len() {
                    let next = self.outline.cell(cell_indices[idx]);
                    if next.x != x {
                        break;
                    }
                    area += next.area;
                    cover += next.cover;
                    idx += 1;
                }

                let mut span_x = x;
                if area != 0 {
                    let alpha = Self::calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - area);
                    if alpha != 0 {
                        sink.blend_hspan(x, y, 1, alpha);
                    }
                    span_x = x + 1;
                }

                if idx < cell_indices.len() {
                    let next_x = self.outline.cell(cell_indices[idx]).x;
                    if next_x > span_x {
                        let alpha = Self::calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                        if alpha != 0 {
                            sink.blend_hspan(span_x, y, (next_x - span_x) as u32, alpha);
                        }
                    }
                }
            }
        }
        true
    }
}

impl Default for RasterizerScanline {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

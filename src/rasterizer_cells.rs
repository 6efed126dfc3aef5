//! Anti-aliased cell rasterizer engine.
//!
//! Converts edges (line segments in 24.8 fixed-point coordinates) into
//! pixel cells carrying coverage and area values. `RasterizerScanline`
//! sweeps the sorted cells row by row to produce span coverage.
//!
//! Cells can be restricted to a clip grid: rows outside `0..height` are
//! discarded, every column left of 0 is folded into column -1 and every
//! column at or past `width` into column `width`. Folded cells keep their
//! winding contribution, which is all the sweep needs for the visible
//! columns, and the per-row cell count stays bounded by the grid.

use crate::basics::{POLY_SUBPIXEL_MASK, POLY_SUBPIXEL_SCALE, POLY_SUBPIXEL_SHIFT};

// ============================================================================
// Cell
// ============================================================================

/// A pixel cell storing accumulated coverage and area from edges.
///
/// - `cover`: net winding contribution (sum of dy across this cell)
/// - `area`: twice the signed area of edge fragments within this cell
///
/// Both are 64-bit: a dense path can stack thousands of polygons on one
/// cell, which overflows 32-bit sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub cover: i64,
    pub area: i64,
}

impl Cell {
    #[inline]
    fn initial(&mut self) {
        *self = Cell::default();
    }

    /// Add one edge fragment: `dy` subpixel rows crossed, `area` its
    /// doubled area contribution.
    #[inline]
    fn accumulate(&mut self, dy: i32, area: i32) {
        self.cover += dy as i64;
        self.area += area as i64;
    }

    #[inline]
    fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            x: i32::MAX,
            y: i32::MAX,
            cover: 0,
            area: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SortedY {
    start: u32,
    num: u32,
}

/// Limit for dx magnitude before recursive subdivision in `line()`.
const DX_LIMIT: i64 = 16384 << POLY_SUBPIXEL_SHIFT;

// ============================================================================
// RasterizerCells
// ============================================================================

/// Edge-to-cell conversion engine.
///
/// Cells live in a flat `Vec<Cell>`; the per-row index is built by a
/// counting sort in `sort_cells()`.
#[derive(Debug, Clone)]
pub struct RasterizerCells {
    cells: Vec<Cell>,
    sorted_cells: Vec<u32>,
    sorted_y: Vec<SortedY>,
    curr_cell: Cell,
    clip: Option<(i32, i32)>,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    sorted: bool,
}

impl RasterizerCells {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            sorted_cells: Vec::new(),
            sorted_y: Vec::new(),
            curr_cell: Cell::default(),
            clip: None,
            min_x: i32::MAX,
            min_y: i32::MAX,
            max_x: i32::MIN,
            max_y: i32::MIN,
            sorted: false,
        }
    }

    /// Discard all cells. The clip grid is kept.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.sorted_cells.clear();
        self.sorted_y.clear();
        self.curr_cell.initial();
        self.min_x = i32::MAX;
        self.min_y = i32::MAX;
        self.max_x = i32::MIN;
        self.max_y = i32::MIN;
        self.sorted = false;
    }

    /// Keep only cells that can affect pixels of a `width x height` grid.
    pub fn clip_box(&mut self, width: u32, height: u32) {
        self.reset();
        self.clip = Some((
            width.min(i32::MAX as u32) as i32,
            height.min(i32::MAX as u32) as i32,
        ));
    }

    /// Accept cells anywhere.
    pub fn reset_clipping(&mut self) {
        self.reset();
        self.clip = None;
    }

    #[inline]
    pub fn min_x(&self) -> i32 {
        self.min_x
    }
    #[inline]
    pub fn min_y(&self) -> i32 {
        self.min_y
    }
    #[inline]
    pub fn max_x(&self) -> i32 {
        self.max_x
    }
    #[inline]
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    #[inline]
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn sorted(&self) -> bool {
        self.sorted
    }

    /// Cell indices of row `y`, ordered by x. Only valid after `sort_cells()`;
    /// rows outside `min_y..=max_y` are empty.
    pub fn scanline_cells(&self, y: i32) -> &[u32] {
        if !self.sorted || y < self.min_y || y > self.max_y {
            return &[];
        }
        let sy = &self.sorted_y[(y - self.min_y) as usize];
        &self.sorted_cells[sy.start as usize..(sy.start + sy.num) as usize]
    }

    #[inline]
    pub fn cell(&self, idx: u32) -> &Cell {
        &self.cells[idx as usize]
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    /// Flush the current cell, applying the clip grid.
    #[inline]
    fn add_curr_cell(&mut self) {
        if self.curr_cell.area | self.curr_cell.cover == 0 {
            return;
        }
        let mut cell = self.curr_cell;
        if let Some((w, h)) = self.clip {
            if cell.y < 0 || cell.y >= h {
                return;
            }
            cell.x = cell.x.clamp(-1, w);
        }
        self.min_x = self.min_x.min(cell.x);
        self.max_x = self.max_x.max(cell.x);
        self.min_y = self.min_y.min(cell.y);
        self.max_y = self.max_y.max(cell.y);
        self.cells.push(cell);
    }

    #[inline]
    fn set_curr_cell(&mut self, x: i32, y: i32) {
        if !self.curr_cell.is_at(x, y) {
            self.add_curr_cell();
            self.curr_cell = Cell {
                x,
                y,
                cover: 0,
                area: 0,
            };
        }
    }

    /// Render the part of an edge that stays inside scanline row `ey`.
    ///
    /// `x1`, `x2` are 24.8 fixed point; `y1`, `y2` are the fractional y
    /// within the row (0..POLY_SUBPIXEL_SCALE).
    fn render_hline(&mut self, ey: i32, x1: i32, y1: i32, x2: i32, y2: i32) {
        let scale = POLY_SUBPIXEL_SCALE as i32;
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let fx1 = x1 & POLY_SUBPIXEL_MASK as i32;
        let fx2 = x2 & POLY_SUBPIXEL_MASK as i32;

        if y1 == y2 {
            self.set_curr_cell(ex2, ey);
            return;
        }

        if ex1 == ex2 {
            let delta = y2 - y1;
            self.curr_cell.accumulate(delta, (fx1 + fx2) * delta);
            return;
        }

        // Run of adjacent cells on the same row
        let mut p = (scale as i64 - fx1 as i64) * (y2 - y1) as i64;
        let mut first = scale;
        let mut incr = 1_i32;
        let mut dx = x2 as i64 - x1 as i64;

        if dx < 0 {
            p = fx1 as i64 * (y2 - y1) as i64;
            first = 0;
            incr = -1;
            dx = -dx;
        }

        let mut delta = (p / dx) as i32;
        let mut modulo = p % dx;
        if modulo < 0 {
            delta -= 1;
            modulo += dx;
        }

        self.curr_cell.accumulate(delta, (fx1 + first) * delta);

        let mut ex = ex1 + incr;
        self.set_curr_cell(ex, ey);
        let mut y = y1 + delta;

        if ex != ex2 {
            p = scale as i64 * (y2 - y + delta) as i64;
            let mut lift = (p / dx) as i32;
            let mut rem = p % dx;
            if rem < 0 {
                lift -= 1;
                rem += dx;
            }
            modulo -= dx;

            while ex != ex2 {
                delta = lift;
                modulo += rem;
                if modulo >= 0 {
                    modulo -= dx;
                    delta += 1;
                }
                self.curr_cell.accumulate(delta, scale * delta);
                y += delta;
                ex += incr;
                self.set_curr_cell(ex, ey);
            }
        }
        delta = y2 - y;
        self.curr_cell.accumulate(delta, (fx2 + scale - first) * delta);
    }

    /// Add an edge in 24.8 fixed-point coordinates.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let dx = x2 as i64 - x1 as i64;
        if dx >= DX_LIMIT || dx <= -DX_LIMIT {
            let cx = ((x1 as i64 + x2 as i64) >> 1) as i32;
            let cy = ((y1 as i64 + y2 as i64) >> 1) as i32;
            self.line(x1, y1, cx, cy);
            self.line(cx, cy, x2, y2);
            return;
        }

        let scale = POLY_SUBPIXEL_SCALE as i32;
        let dy = y2 as i64 - y1 as i64;
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let mut ey1 = y1 >> POLY_SUBPIXEL_SHIFT;
        let ey2 = y2 >> POLY_SUBPIXEL_SHIFT;
        let fy1 = y1 & POLY_SUBPIXEL_MASK as i32;
        let fy2 = y2 & POLY_SUBPIXEL_MASK as i32;

        self.set_curr_cell(ex1, ey1);

        if ey1 == ey2 {
            self.render_hline(ey1, x1, fy1, x2, fy2);
            return;
        }

        let mut incr = 1_i32;

        // Vertical edge: one cell per row, no render_hline needed
        if dx == 0 {
            let ex = ex1;
            let two_fx = (x1 - (ex << POLY_SUBPIXEL_SHIFT)) << 1;
            let mut first = scale;
            if dy < 0 {
                first = 0;
                incr = -1;
            }

            let mut delta = first - fy1;
            self.curr_cell.accumulate(delta, two_fx * delta);

            ey1 += incr;
            self.set_curr_cell(ex, ey1);

            delta = first + first - scale;
            let area = two_fx * delta;
            while ey1 != ey2 {
                self.curr_cell.accumulate(delta, area);
                ey1 += incr;
                self.set_curr_cell(ex, ey1);
            }
            delta = fy2 - scale + first;
            self.curr_cell.accumulate(delta, two_fx * delta);
            return;
        }

        // General case: one render_hline per crossed row
        let mut p = (scale as i64 - fy1 as i64) * dx;
        let mut first = scale;
        let mut dy_abs = dy;
        if dy < 0 {
            p = fy1 as i64 * dx;
            first = 0;
            incr = -1;
            dy_abs = -dy;
        }

        let mut delta = (p / dy_abs) as i32;
        let mut modulo = p % dy_abs;
        if modulo < 0 {
            delta -= 1;
            modulo += dy_abs;
        }

        let mut x_from = x1 + delta;
        self.render_hline(ey1, x1, fy1, x_from, first);

        ey1 += incr;
        self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);

        if ey1 != ey2 {
            p = scale as i64 * dx;
            let mut lift = (p / dy_abs) as i32;
            let mut rem = p % dy_abs;
            if rem < 0 {
                lift -= 1;
                rem += dy_abs;
            }
            modulo -= dy_abs;

            while ey1 != ey2 {
                delta = lift;
                modulo += rem;
                if modulo >= 0 {
                    modulo -= dy_abs;
                    delta += 1;
                }
                let x_to = x_from + delta;
                self.render_hline(ey1, x_from, scale - first, x_to, first);
                x_from = x_to;

                ey1 += incr;
                self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);
            }
        }
        self.render_hline(ey1, x_from, scale - first, x2, fy2);
    }

    /// Sort all accumulated cells by y, then x.
    pub fn sort_cells(&mut self) {
        if self.sorted {
            return;
        }

        self.add_curr_cell();
        self.curr_cell.initial();

        if self.cells.is_empty() {
            return;
        }

        let num_cells = self.cells.len();
        self.sorted_cells.clear();
        self.sorted_cells.resize(num_cells, 0);

        let y_range = (self.max_y - self.min_y + 1) as usize;
        self.sorted_y.clear();
        self.sorted_y.resize(y_range, SortedY::default());

        // Row histogram
        for cell in &self.cells {
            self.sorted_y[(cell.y - self.min_y) as usize].start += 1;
        }

        // Histogram to starting offsets
        let mut start = 0u32;
        for sy in &mut self.sorted_y {
            let count = sy.start;
            sy.start = start;
            start += count;
        }

        for (i, cell) in self.cells.iter().enumerate() {
            let sy = &mut self.sorted_y[(cell.y - self.min_y) as usize];
            self.sorted_cells[(sy.start + sy.num) as usize] = i as u32;
            sy.num += 1;
        }

        for sy in &self.sorted_y {
            if sy.num > 0 {
                let range = sy.start as usize..(sy.start + sy.num) as usize;
                let cells = &self.cells;
                self.sorted_cells[range].sort_unstable_by_key(|&idx| cells[idx as usize].x);
            }
        }

        self.sorted = true;
    }
}

impl Default for RasterizerCells {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

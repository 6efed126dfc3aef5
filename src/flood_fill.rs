//! Scanline seed fill.
//!
//! Replaces the 4-connected region of pixels matching the seed pixel (under
//! the rules of [`color_match`](crate::color_match)) with a fill color.
//!
//! The fill runs on an explicit work stack of pixel indices, one horizontal
//! span per pop:
//!
//! 1. Pop a seed index and try to fill it; skip it if it no longer matches.
//! 2. Extend the span west and east along the row while pixels match.
//! 3. Push every matching pixel directly above and below the span.
//!
//! A visited map guarantees each pixel is written at most once, so the fill
//! terminates even for fill colors that still match the target after being
//! written.

use log::{debug, warn};

use crate::basics::ifloor;
use crate::color::{Color, Tolerance};
use crate::color_match::{compare_and_set, matches};
use crate::error::{PaintError, Result};
use crate::pixel_buffer::{check_dimensions, PixelBuffer, BPP};

// ============================================================================
// FillOutcome
// ============================================================================

/// Result of a successful flood fill call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// The region was filled; `pixels` counts the written pixels.
    Filled { pixels: usize },
    /// The seed already carries the fill color within tolerance.
    Unchanged,
}

impl FillOutcome {
    #[inline]
    pub fn is_filled(&self) -> bool {
        matches!(self, FillOutcome::Filled { .. })
    }

    /// Number of pixels written, zero for a no-op.
    #[inline]
    pub fn pixels(&self) -> usize {
        match self {
            FillOutcome::Filled { pixels } => *pixels,
            FillOutcome::Unchanged => 0,
        }
    }
}

// ============================================================================
// Seed resolution
// ============================================================================

/// Map a floating-point seed onto the pixel grid.
///
/// Negative or non-numeric coordinates and points past the extents are
/// rejected; fractional coordinates are floored with a warning.
pub fn resolve_seed(x: f64, y: f64, width: u32, height: u32) -> Result<(u32, u32)> {
    let out_of_bounds = PaintError::OutOfBounds {
        x,
        y,
        width,
        height,
    };
    if x.is_nan() || y.is_nan() || x < 0.0 || y < 0.0 {
        return Err(out_of_bounds);
    }
    let xi = x.floor();
    let yi = y.floor();
    if xi >= width as f64 || yi >= height as f64 {
        return Err(out_of_bounds);
    }
    if xi != x {
        warn!("seed x truncated from {} to {}", x, xi);
    }
    if yi != y {
        warn!("seed y truncated from {} to {}", y, yi);
    }
    Ok((ifloor(xi) as u32, ifloor(yi) as u32))
}

// ============================================================================
// Span filler
// ============================================================================

struct SpanFiller<'a> {
    data: &'a mut [u8],
    visited: Vec<bool>,
    target: Color,
    fill: Color,
    tolerance: Tolerance,
    written: usize,
}

impl SpanFiller<'_> {
    /// Non-mutating test of pixel `i`.
    #[inline]
    fn test(&self, i: usize) -> bool {
        if self.visited[i] {
            return false;
        }
        let off = i * BPP;
        matches(
            Color::from_slice(&self.data[off..off + BPP]),
            self.target,
            self.fill,
            self.tolerance,
        )
    }

    /// Test pixel `i` and overwrite it with the fill color on a match.
    #[inline]
    fn set(&mut self, i: usize) -> bool {
        if self.visited[i]
            || !compare_and_set(i * BPP, self.data, self.target, self.fill, self.tolerance)
        {
            return false;
        }
        self.visited[i] = true;
        self.written += 1;
        true
    }
}

/// Fill raw RGBA bytes in place, seeded at pixel (x, y).
///
/// `data` must hold exactly `width * height * 4` bytes. Validation happens
/// before any write, so an `Err` leaves `data` untouched.
pub fn flood_fill_raw(
    data: &mut [u8],
    width: u32,
    height: u32,
    x: f64,
    y: f64,
    fill: Color,
    tolerance: Tolerance,
) -> Result<FillOutcome> {
    check_dimensions(width, height, data.len())?;
    let (sx, sy) = resolve_seed(x, y, width, height)?;

    let w = width as usize;
    let total = w * height as usize;
    let seed = sy as usize * w + sx as usize;
    let target = Color::from_slice(&data[seed * BPP..seed * BPP + BPP]);

    if !matches(target, target, fill, tolerance) {
        debug!("flood fill at ({sx}, {sy}): seed already matches fill color");
        return Ok(FillOutcome::Unchanged);
    }

    let mut filler = SpanFiller {
        data,
        visited: vec![false; total],
        target,
        fill,
        tolerance,
        written: 0,
    };
    let mut stack: Vec<usize> = vec![seed];

    while let Some(i) = stack.pop() {
        if !filler.set(i) {
            continue;
        }
        let row_start = i - i % w;
        let row_end = row_start + w;

        let mut west = i;
        while west > row_start && filler.set(west - 1) {
            west -= 1;
        }
        let mut east = i;
        while east + 1 < row_end && filler.set(east + 1) {
            east += 1;
        }

        for j in west..=east {
            if j >= w && filler.test(j - w) {
                stack.push(j - w);
            }
            if j + w < total && filler.test(j + w) {
                stack.push(j + w);
            }
        }
    }

    debug!(
        "flood fill at ({sx}, {sy}) wrote {} pixels",
        filler.written
    );
    Ok(FillOutcome::Filled {
        pixels: filler.written,
    })
}

/// Flood fill a [`PixelBuffer`] in place, seeded at (x, y).
pub fn flood_fill(
    buffer: &mut PixelBuffer,
    x: f64,
    y: f64,
    fill: Color,
    tolerance: Tolerance,
) -> Result<FillOutcome> {
    let (width, height) = (buffer.width(), buffer.height());
    flood_fill_raw(buffer.data_mut(), width, height, x, y, fill, tolerance)
}

// ============================================================================
// Tests
// ============================================================================

//! Hard-edged stroke masks.
//!
//! A [`MaskBuilder`] turns a stroke path into a [`Mask`] the size of the
//! destination buffer. Wide tools rasterize a round-capped, round-joined
//! stroke with anti-aliased coverage; narrow tools walk Bresenham lines
//! between consecutive points. Either way the coverage is thresholded
//! afterwards, so every mask pixel is either fully set or fully clear.
//!
//! The builder owns its scratch buffers and reuses their allocations from
//! call to call. Nothing else carries over: each `build` starts from a
//! cleared mask.

use log::debug;

use crate::basics::{Point, COVER_FULL};
use crate::error::{PaintError, Result};
use crate::line_bresenham::LineBresenham;
use crate::pixel_buffer::{PixelBuffer, BPP};
use crate::rasterizer_scanline::{CoverageSink, RasterizerScanline};
use crate::stroke_outline::RoundStroke;

const ALPHA: usize = 3;

// ============================================================================
// Mask
// ============================================================================

/// Stencil over an RGBA buffer. Only the alpha channel is meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    buf: PixelBuffer,
}

impl Mask {
    /// Empty mask of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            buf: PixelBuffer::new(width, height)?,
        })
    }

    /// Wrap an existing buffer, thresholding its alpha channel.
    pub fn from_buffer(buf: PixelBuffer) -> Self {
        let mut mask = Self { buf };
        mask.threshold();
        mask
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    /// Alpha at (x, y); zero outside the mask.
    pub fn alpha(&self, x: i32, y: i32) -> u8 {
        self.buf.offset(x, y).map_or(0, |off| self.buf.data()[off + ALPHA])
    }

    pub fn is_set(&self, x: i32, y: i32) -> bool {
        self.alpha(x, y) == COVER_FULL
    }

    /// Alpha bytes in row-major pixel order.
    pub fn alphas(&self) -> impl Iterator<Item = u8> + '_ {
        self.buf.data().chunks_exact(BPP).map(|p| p[ALPHA])
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.alphas().filter(|&a| a == COVER_FULL).count()
    }

    pub fn as_buffer(&self) -> &PixelBuffer {
        &self.buf
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buf
    }

    /// Any partial coverage becomes full coverage.
    pub fn threshold(&mut self) {
        for p in self.buf.data_mut().chunks_exact_mut(BPP) {
            if p[ALPHA] > 0 {
                p[ALPHA] = COVER_FULL;
            }
        }
    }

    fn reset(&mut self, width: u32, height: u32) -> Result<()> {
        self.buf.reset(width, height)
    }

    fn set(&mut self, x: i32, y: i32) {
        if let Some(off) = self.buf.offset(x, y) {
            self.buf.data_mut()[off + ALPHA] = COVER_FULL;
        }
    }
}

impl CoverageSink for Mask {
    /// Overlapping spans keep the strongest coverage.
    fn blend_hspan(&mut self, x: i32, y: i32, len: u32, cover: u8) {
        if y < 0 || y as u32 >= self.height() {
            return;
        }
        let x0 = x.max(0);
        let x1 = (x as i64 + len as i64).min(self.width() as i64) as i32;
        if x0 >= x1 {
            return;
        }
        let Some(start) = self.buf.offset(x0, y) else {
            return;
        };
        let end = start + (x1 - x0) as usize * BPP;
        for p in self.buf.data_mut()[start..end].chunks_exact_mut(BPP) {
            p[ALPHA] = p[ALPHA].max(cover);
        }
    }
}

// ============================================================================
// StrokeProfile
// ============================================================================

/// Which tool a mask is built for. The tools switch from hairline to
/// stroked rendering at different widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeProfile {
    /// Stroked when `width / 2 > 1`.
    #[default]
    Brush,
    /// Stroked when `width > 1`.
    Eraser,
}

impl StrokeProfile {
    pub fn is_stroked(self, width: f64) -> bool {
        match self {
            StrokeProfile::Brush => width / 2.0 > 1.0,
            StrokeProfile::Eraser => width > 1.0,
        }
    }
}

// ============================================================================
// MaskBuilder
// ============================================================================

/// Reusable stroke-to-mask converter.
#[derive(Debug, Clone)]
pub struct MaskBuilder {
    mask: Mask,
    ras: RasterizerScanline,
    stroke: RoundStroke,
    path: Vec<Point>,
}

impl MaskBuilder {
    pub fn new() -> Self {
        Self {
            mask: Mask {
                buf: PixelBuffer::default(),
            },
            ras: RasterizerScanline::new(),
            stroke: RoundStroke::default(),
            path: Vec::new(),
        }
    }

    /// Arc precision of round caps and joins, see
    /// [`RoundStroke::set_approximation_scale`].
    pub fn set_approximation_scale(&mut self, s: f64) {
        self.stroke.set_approximation_scale(s);
    }

    /// The most recently built mask.
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Build a brush mask for `path` drawn `tool_width` wide.
    pub fn build(
        &mut self,
        width: u32,
        height: u32,
        path: &[Point],
        tool_width: f64,
    ) -> Result<&Mask> {
        self.build_with_profile(width, height, path, tool_width, StrokeProfile::Brush)
    }

    /// Build a mask for `path`, choosing hairline or stroked rendering
    /// from `profile`.
    ///
    /// Non-finite points are skipped. A path with no usable points fails
    /// with [`PaintError::EmptyStrokePath`].
    pub fn build_with_profile(
        &mut self,
        width: u32,
        height: u32,
        path: &[Point],
        tool_width: f64,
        profile: StrokeProfile,
    ) -> Result<&Mask> {
        self.path.clear();
        self.path.extend(path.iter().copied().filter(Point::is_finite));
        if self.path.is_empty() {
            return Err(PaintError::EmptyStrokePath);
        }
        self.mask.reset(width, height)?;

        if profile.is_stroked(tool_width) {
            self.stroke.set_width(tool_width);
            self.ras.clip_box(width, height);
            self.stroke.add_to(&mut self.ras, &self.path);
            self.ras.render(&mut self.mask);
            self.mask.threshold();
            debug!(
                "stroked mask: {} points, width {}, {} pixels set",
                self.path.len(),
                tool_width,
                self.mask.count()
            );
        } else {
            let mut prev = self.path[0];
            for &p in &self.path {
                for (x, y) in LineBresenham::from_points(p, prev).clipped(width, height) {
                    self.mask.set(x, y);
                }
                prev = p;
            }
            debug!(
                "hairline mask: {} points, {} pixels set",
                self.path.len(),
                self.mask.count()
            );
        }
        Ok(&self.mask)
    }
}

impl Default for MaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

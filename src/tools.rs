//! Hard-edged painting tools.
//!
//! Each tool takes the destination buffer, the current [`ToolSettings`] and
//! the stroke path collected from the pointer, and applies one deterministic
//! change. Point-based tools (fill, eye dropper) act on the last point of
//! the path.

use log::debug;

use crate::basics::Point;
use crate::color::{Color, Tolerance};
use crate::compositor::{apply_erase, apply_paint};
use crate::error::{PaintError, Result};
use crate::flood_fill::{flood_fill, FillOutcome};
use crate::mask_builder::{MaskBuilder, StrokeProfile};
use crate::pixel_buffer::{PixelBuffer, Rect};

// ============================================================================
// ToolSettings
// ============================================================================

/// Parameters shared by all tools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSettings {
    size: f64,
    hardness: f64,
    threshold: f64,
    colour: Color,
}

impl ToolSettings {
    pub fn new() -> Self {
        Self {
            size: 1.0,
            hardness: 100.0,
            threshold: 0.0,
            colour: Color::BLACK,
        }
    }

    /// Stroke width in pixels.
    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Edge hardness in percent.
    ///
    /// Stored for the host's soft brushes. Every tool in this crate paints
    /// hard edges and ignores it.
    pub fn set_hardness(&mut self, hardness: f64) {
        self.hardness = hardness;
    }
    pub fn hardness(&self) -> f64 {
        self.hardness
    }

    /// Raw flood fill tolerance, normalized by [`Tolerance::from_f64`].
    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_colour(&mut self, colour: Color) {
        self.colour = colour;
    }
    pub fn colour(&self) -> Color {
        self.colour
    }

    pub fn tolerance(&self) -> Tolerance {
        Tolerance::from_f64(self.threshold)
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Stroke tools
// ============================================================================

/// Paint a hard-edged stroke in the settings colour. Returns the number of
/// pixels painted.
pub fn pixel_tip(
    dest: &mut PixelBuffer,
    scratch: &mut MaskBuilder,
    settings: &ToolSettings,
    path: &[Point],
) -> Result<usize> {
    let mask = scratch.build_with_profile(
        dest.width(),
        dest.height(),
        path,
        settings.size(),
        StrokeProfile::Brush,
    )?;
    apply_paint(dest, mask, settings.colour())
}

/// Erase a hard-edged stroke to full transparency. Returns the number of
/// pixels cleared.
pub fn pixel_clear(
    dest: &mut PixelBuffer,
    scratch: &mut MaskBuilder,
    settings: &ToolSettings,
    path: &[Point],
) -> Result<usize> {
    let mask = scratch.build_with_profile(
        dest.width(),
        dest.height(),
        path,
        settings.size(),
        StrokeProfile::Eraser,
    )?;
    apply_erase(dest, mask)
}

// ============================================================================
// Point tools
// ============================================================================

/// Pixel picked by a point tool: the last path point, nudged a quarter
/// pixel up-left and floored.
pub fn tool_point(path: &[Point]) -> Option<(f64, f64)> {
    path.last()
        .map(|p| ((p.x - 0.25).floor(), (p.y - 0.25).floor()))
}

/// Flood fill from the tool point with the settings colour and threshold.
pub fn flood_fill_tool(
    dest: &mut PixelBuffer,
    settings: &ToolSettings,
    path: &[Point],
) -> Result<FillOutcome> {
    let (x, y) = tool_point(path).ok_or(PaintError::EmptyStrokePath)?;
    fill_region(
        dest,
        dest.bounds(),
        x,
        y,
        settings.colour(),
        settings.tolerance(),
    )
}

/// Flood fill restricted to `region`.
///
/// The region is clipped to the buffer; the seed is relative to its
/// top-left corner. Pixels outside the region are never read or written.
/// An empty region is a no-op.
pub fn fill_region(
    dest: &mut PixelBuffer,
    region: Rect,
    x: f64,
    y: f64,
    colour: Color,
    tolerance: Tolerance,
) -> Result<FillOutcome> {
    let r = region.clip_to(dest.width(), dest.height());
    if r.is_empty() {
        debug!("fill region {:?} is empty", region);
        return Ok(FillOutcome::Unchanged);
    }
    if r == dest.bounds() {
        return flood_fill(dest, x, y, colour, tolerance);
    }
    let mut sub = dest.crop(r)?;
    let outcome = flood_fill(&mut sub, x, y, colour, tolerance)?;
    if outcome.is_filled() {
        dest.put(&sub, r.x, r.y);
    }
    Ok(outcome)
}

/// Colour under the tool point, or `None` when it falls outside the buffer.
pub fn eye_dropper(src: &PixelBuffer, path: &[Point]) -> Option<Color> {
    let (x, y) = tool_point(path)?;
    if x < 0.0 || y < 0.0 || x >= src.width() as f64 || y >= src.height() as f64 {
        return None;
    }
    src.pixel(x as i32, y as i32)
}

// ============================================================================
// Tests
// ============================================================================

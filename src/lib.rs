//! # raster-paint
//!
//! Hard-edged raster painting over RGBA8 pixel buffers, the pixel core of a
//! browser paint editor.
//!
//! Every operation turns a stroke path or a seed point into a deterministic
//! change to a caller-supplied buffer:
//!
//! - Tolerance-based flood fill on a 4-connected region
//! - Hairline strokes walked with integer Bresenham stepping
//! - Round-capped, round-joined wide strokes, rasterized with anti-aliased
//!   coverage and then thresholded to a binary mask
//! - Paint (source-over) and erase (alpha clear) through that mask
//!
//! ## Pipeline
//!
//! 1. **Geometry** converts a path into polygons (`stroke_outline`) or pixel
//!    runs (`line_bresenham`)
//! 2. **Rasterizer** turns polygons into per-pixel coverage
//!    (`rasterizer_cells`, `rasterizer_scanline`)
//! 3. **Mask** collects coverage and hard-thresholds it (`mask_builder`)
//! 4. **Compositor** applies the mask to the destination (`compositor`)
//!
//! Flood fill bypasses the pipeline and edits the buffer directly.
//!
//! The engine keeps no hidden state. Scratch memory for masks lives in a
//! [`MaskBuilder`] owned by the caller.

// Foundation types
pub mod basics;
pub mod color;
pub mod error;
pub mod pixel_buffer;

// Matching & fill
pub mod color_match;
pub mod flood_fill;

// Geometry & rasterization
pub mod line_bresenham;
pub mod rasterizer_cells;
pub mod rasterizer_scanline;
pub mod stroke_outline;

// Masks, compositing & tools
pub mod compositor;
pub mod mask_builder;
pub mod tools;

pub use basics::Point;
pub use color::{Color, Tolerance};
pub use error::{PaintError, Result};
pub use flood_fill::FillOutcome;
pub use mask_builder::{Mask, MaskBuilder, StrokeProfile};
pub use pixel_buffer::{PixelBuffer, Rect};
pub use tools::ToolSettings;

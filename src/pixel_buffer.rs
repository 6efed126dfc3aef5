//! RGBA pixel buffer.
//!
//! A flat, row-major byte array with 4 interleaved channels per pixel
//! (`[r, g, b, a]`). The buffer is the unit of exchange with the host page:
//! the caller extracts pixel data from a canvas region, hands it to an
//! engine operation, and writes the mutated bytes back.

use crate::color::Color;
use crate::error::{PaintError, Result};

/// Bytes per pixel.
pub const BPP: usize = 4;

// ============================================================================
// Rect
// ============================================================================

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Intersect with the `0..width` x `0..height` grid.
    pub fn clip_to(&self, width: u32, height: u32) -> Rect {
        let x1 = self.x.min(width);
        let y1 = self.y.min(height);
        let x2 = self.right().min(width);
        let y2 = self.bottom().min(height);
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Owned RGBA8 pixel data with its dimensions.
///
/// Invariant: `data.len() == width * height * 4`, both sides at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

/// Validate that `len` bytes hold exactly `width x height` RGBA pixels.
pub fn check_dimensions(width: u32, height: u32, len: usize) -> Result<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BPP));
    if width < 1 || height < 1 || expected != Some(len) {
        return Err(PaintError::InvalidDimensions { width, height, len });
    }
    Ok(())
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = (width as usize) * (height as usize) * BPP;
        check_dimensions(width, height, len)?;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
        })
    }

    /// Wrap existing RGBA bytes.
    pub fn from_vec(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        check_dimensions(width, height, data.len())?;
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create a buffer with every pixel set to `c`.
    pub fn filled(width: u32, height: u32, c: Color) -> Result<Self> {
        let mut buf = Self::new(width, height)?;
        buf.fill(c);
        Ok(buf)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * BPP
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Full-buffer rectangle.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Byte offset of pixel (x, y), or `None` when outside the buffer.
    #[inline]
    pub fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * BPP)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.offset(x, y)
            .map(|off| Color::from_slice(&self.data[off..off + BPP]))
    }

    /// Overwrite pixel (x, y). Points outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, c: Color) {
        if let Some(off) = self.offset(x, y) {
            self.data[off..off + BPP].copy_from_slice(&c.to_array());
        }
    }

    /// Set every pixel to `c`.
    pub fn fill(&mut self, c: Color) {
        let px = c.to_array();
        for p in self.data.chunks_exact_mut(BPP) {
            p.copy_from_slice(&px);
        }
    }

    /// Zero every byte and resize to `width x height`, reusing the existing
    /// allocation whenever it is large enough.
    pub(crate) fn reset(&mut self, width: u32, height: u32) -> Result<()> {
        let len = (width as usize) * (height as usize) * BPP;
        check_dimensions(width, height, len)?;
        self.data.clear();
        self.data.resize(len, 0);
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Copy the pixels of `region` (clipped to the buffer) into a new buffer.
    pub fn crop(&self, region: Rect) -> Result<PixelBuffer> {
        let r = region.clip_to(self.width, self.height);
        let mut out = PixelBuffer::new(r.width, r.height)?;
        let row_len = r.width as usize * BPP;
        for row in 0..r.height as usize {
            let src = ((r.y as usize + row) * self.width as usize + r.x as usize) * BPP;
            let dst = row * row_len;
            out.data[dst..dst + row_len].copy_from_slice(&self.data[src..src + row_len]);
        }
        Ok(out)
    }

    /// Write `src` back with its top-left corner at (x, y). Rows and columns
    /// falling outside this buffer are dropped.
    pub fn put(&mut self, src: &PixelBuffer, x: u32, y: u32) {
        let r = Rect::new(x, y, src.width, src.height).clip_to(self.width, self.height);
        let row_len = r.width as usize * BPP;
        for row in 0..r.height as usize {
            let s = row * src.stride();
            let d = ((r.y as usize + row) * self.width as usize + r.x as usize) * BPP;
            self.data[d..d + row_len].copy_from_slice(&src.data[s..s + row_len]);
        }
    }
}

impl Default for PixelBuffer {
    /// A single transparent pixel.
    fn default() -> Self {
        Self {
            data: vec![0; BPP],
            width: 1,
            height: 1,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

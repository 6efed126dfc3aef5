//! Foundation types and constants shared by the rasterizers.
//!
//! Document-space points, subpixel fixed-point constants, and the rounding
//! helpers that map floating-point cursor positions onto the pixel grid.

use core::ops::{Add, Sub};

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round a double to the nearest integer (round half away from zero).
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Round half toward positive infinity, the way browser `Math.round` does.
///
/// `-2.5` rounds to `-2`, `2.5` rounds to `3`.
#[inline]
pub fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Floor a double to the nearest integer toward negative infinity.
#[inline]
pub fn ifloor(v: f64) -> i32 {
    let i = v as i32;
    i - (i as f64 > v) as i32
}

/// Round `v` to int, clamping to `[-limit, limit]`.
#[inline]
pub fn saturation_iround(limit: i32, v: f64) -> i32 {
    if v < -(limit as f64) {
        return -limit;
    }
    if v > limit as f64 {
        return limit;
    }
    iround(v)
}

// ============================================================================
// Subpixel constants
// ============================================================================

/// Fractional bits of the rasterizer's fixed-point coordinates (24.8).
pub const POLY_SUBPIXEL_SHIFT: u32 = 8;
pub const POLY_SUBPIXEL_SCALE: u32 = 1 << POLY_SUBPIXEL_SHIFT;
pub const POLY_SUBPIXEL_MASK: u32 = POLY_SUBPIXEL_SCALE - 1;

/// Largest magnitude, in pixels, a stroke coordinate may take before it is
/// saturated. Keeps `coord << POLY_SUBPIXEL_SHIFT` inside `i32`.
pub const POLY_MAX_COORD: i32 = (1 << 22) - 1;

/// Convert a pixel-space coordinate to 24.8 fixed point, saturating far-off
/// values.
#[inline]
pub fn poly_coord(v: f64) -> i32 {
    saturation_iround(
        POLY_MAX_COORD << POLY_SUBPIXEL_SHIFT,
        v * POLY_SUBPIXEL_SCALE as f64,
    )
}

/// Coverage value meaning "pixel fully inside".
pub const COVER_FULL: u8 = 255;

// ============================================================================
// Point
// ============================================================================

/// A document-space point of a stroke path.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the vector from the origin to this point.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// True if both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

// ============================================================================
// Tests
// ============================================================================

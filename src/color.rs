//! Color and tolerance types.
//!
//! `Color` is an 8-bit non-premultiplied RGBA quadruple, the same layout as
//! one pixel of a [`PixelBuffer`](crate::pixel_buffer::PixelBuffer).
//! `Tolerance` is the matching slack used by flood fill.

// ============================================================================
// Color
// ============================================================================

/// RGBA color with u8 components, non-premultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn new_opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Read a color from the first four bytes of `p`.
    #[inline]
    pub fn from_slice(p: &[u8]) -> Self {
        Self::new(p[0], p[1], p[2], p[3])
    }

    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// True when the color covers anything at all.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.a > 0
    }

    /// True when every channel of `self` is within `tolerance` of `other`.
    #[inline]
    pub fn within(&self, other: &Color, tolerance: Tolerance) -> bool {
        let t = tolerance.value();
        self.r.abs_diff(other.r) <= t
            && self.g.abs_diff(other.g) <= t
            && self.b.abs_diff(other.b) <= t
            && self.a.abs_diff(other.a) <= t
    }

    /// Fixed-point `a * b / 255`, rounded.
    #[inline]
    pub fn multiply(a: u8, b: u8) -> u8 {
        let t: u32 = a as u32 * b as u32 + 128;
        (((t >> 8) + t) >> 8) as u8
    }

    /// `#rrggbb` in lowercase hex. Alpha is dropped.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

// ============================================================================
// Tolerance
// ============================================================================

/// Color matching slack in `[0, 254]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tolerance(u8);

impl Tolerance {
    pub const MAX: u8 = 254;
    pub const EXACT: Tolerance = Tolerance(0);

    /// Build a tolerance, clamping to [`Tolerance::MAX`].
    pub const fn new(t: u8) -> Self {
        if t > Self::MAX {
            Tolerance(Self::MAX)
        } else {
            Tolerance(t)
        }
    }

    /// Normalize a raw UI threshold: NaN becomes 0, otherwise the magnitude
    /// of the rounded value, capped at 254.
    pub fn from_f64(v: f64) -> Self {
        if v.is_nan() {
            return Self::EXACT;
        }
        let rounded = (v + 0.5).floor();
        Tolerance(rounded.abs().min(Self::MAX as f64) as u8)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for Tolerance {
    fn from(t: u8) -> Self {
        Tolerance::new(t)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply() {
        assert_eq!(Color::multiply(255, 255), 255);
        assert_eq!(Color::multiply(255, 0), 0);
        assert_eq!(Color::multiply(128, 255), 128);
        assert_eq!(Color::multiply(128, 128), 64);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::new(255, 0, 16, 7).to_hex(), "#ff0010");
        assert_eq!(Color::TRANSPARENT.to_hex(), "#000000");
    }

    #[test]
    fn test_within() {
        let a = Color::new(10, 20, 30, 40);
        let b = Color::new(12, 18, 30, 43);
        assert!(!a.within(&b, Tolerance::new(2)));
        assert!(a.within(&b, Tolerance::new(3)));
        assert!(a.within(&a, Tolerance::EXACT));
    }

    #[test]
    fn test_tolerance_clamps() {
        assert_eq!(Tolerance::new(255).value(), 254);
        assert_eq!(Tolerance::new(7).value(), 7);
    }

    #[test]
    fn test_tolerance_from_f64() {
        assert_eq!(Tolerance::from_f64(f64::NAN).value(), 0);
        assert_eq!(Tolerance::from_f64(-12.4).value(), 12);
        assert_eq!(Tolerance::from_f64(12.5).value(), 13);
        assert_eq!(Tolerance::from_f64(-12.5).value(), 12);
        assert_eq!(Tolerance::from_f64(1000.0).value(), 254);
        assert_eq!(Tolerance::from_f64(f64::INFINITY).value(), 254);
    }
}

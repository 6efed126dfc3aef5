//! Tolerance-based color matching for region fills.
//!
//! The decision order below is part of the contract; the first rule that
//! applies wins:
//!
//! 1. A fully transparent sample always matches a visible fill color.
//! 2. If the target is already the fill color (within tolerance on all four
//!    channels) nothing matches, so an already filled area is never refilled.
//! 3. A sample identical to the target matches.
//! 4. Otherwise the sample matches when each of R, G, B is within
//!    `tolerance` of the target and alpha is within `255 - tolerance`.
//!
//! Rule 4 scales alpha inversely: tolerance 0 accepts any alpha difference,
//! tolerance 254 demands alpha within 1.

use crate::color::{Color, Tolerance};
use crate::pixel_buffer::BPP;

/// Decide whether `sample` belongs to the region seeded at `target`.
#[inline]
pub fn matches(sample: Color, target: Color, fill: Color, tolerance: Tolerance) -> bool {
    if sample.a == 0 && fill.is_visible() {
        return true;
    }
    if target.within(&fill, tolerance) {
        return false;
    }
    if sample == target {
        return true;
    }
    let t = tolerance.value();
    target.a.abs_diff(sample.a) <= 255 - t
        && target.r.abs_diff(sample.r) <= t
        && target.g.abs_diff(sample.g) <= t
        && target.b.abs_diff(sample.b) <= t
}

/// Test the pixel starting at byte `index` of `data`; on a match overwrite it
/// with `fill` verbatim and return `true`.
///
/// Indices that do not address a whole pixel inside `data` never match.
#[inline]
pub fn compare_and_set(
    index: usize,
    data: &mut [u8],
    target: Color,
    fill: Color,
    tolerance: Tolerance,
) -> bool {
    let Some(px) = data.get_mut(index..index + BPP) else {
        return false;
    };
    if !matches(Color::from_slice(px), target, fill, tolerance) {
        return false;
    }
    px.copy_from_slice(&fill.to_array());
    true
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new_opaque(255, 0, 0);
    const BLUE: Color = Color::new_opaque(0, 0, 255);

    #[test]
    fn test_transparent_sample_matches_visible_fill() {
        let target = Color::new_opaque(10, 10, 10);
        assert!(matches(Color::TRANSPARENT, target, RED, Tolerance::EXACT));
        // Even when the target already equals the fill.
        assert!(matches(Color::new(5, 5, 5, 0), RED, RED, Tolerance::EXACT));
    }

    #[test]
    fn test_transparent_sample_with_invisible_fill() {
        let fill = Color::new(255, 0, 0, 0);
        // Falls through to the exact-equality rule.
        assert!(matches(
            Color::TRANSPARENT,
            Color::TRANSPARENT,
            fill,
            Tolerance::EXACT
        ));
        assert!(!matches(
            Color::TRANSPARENT,
            Color::new_opaque(0, 200, 0),
            fill,
            Tolerance::EXACT
        ));
    }

    #[test]
    fn test_target_equal_to_fill_never_matches() {
        for t in [0u8, 1, 17, 128, 254] {
            let tol = Tolerance::new(t);
            for c in [RED, BLUE, Color::new(12, 34, 56, 78)] {
                assert!(!matches(c, c, c, tol), "tolerance {t}, color {c:?}");
            }
        }
    }

    #[test]
    fn test_target_within_tolerance_of_fill() {
        let target = Color::new_opaque(250, 3, 0);
        assert!(!matches(target, target, RED, Tolerance::new(5)));
        assert!(matches(target, target, RED, Tolerance::new(4)));
    }

    #[test]
    fn test_exact_match() {
        assert!(matches(BLUE, BLUE, RED, Tolerance::EXACT));
        assert!(!matches(Color::new_opaque(0, 1, 255), BLUE, RED, Tolerance::EXACT));
    }

    #[test]
    fn test_rgb_tolerance() {
        let sample = Color::new_opaque(0, 3, 250);
        assert!(!matches(sample, BLUE, RED, Tolerance::new(4)));
        assert!(matches(sample, BLUE, RED, Tolerance::new(5)));
    }

    #[test]
    fn test_alpha_tolerance_is_inverted() {
        let target = Color::new(0, 0, 255, 255);
        let faint = Color::new(0, 0, 255, 1);
        // Tolerance 0: alpha band is the full 255.
        assert!(matches(faint, target, RED, Tolerance::EXACT));
        // Tolerance 254: alpha must be within 1.
        assert!(!matches(faint, target, RED, Tolerance::new(254)));
        assert!(matches(
            Color::new(0, 0, 255, 254),
            target,
            RED,
            Tolerance::new(254)
        ));
        // Tolerance 100: alpha band is 155.
        assert!(matches(Color::new(0, 0, 255, 100), target, RED, Tolerance::new(100)));
        assert!(!matches(Color::new(0, 0, 255, 99), target, RED, Tolerance::new(100)));
    }

    #[test]
    fn test_compare_and_set_writes_fill_verbatim() {
        let mut data = vec![0, 0, 255, 255, 0, 255, 0, 255];
        let fill = Color::new(200, 100, 50, 25);
        assert!(compare_and_set(0, &mut data, BLUE, fill, Tolerance::EXACT));
        assert_eq!(&data[0..4], &[200, 100, 50, 25]);
        assert!(!compare_and_set(4, &mut data, BLUE, fill, Tolerance::EXACT));
        assert_eq!(&data[4..8], &[0, 255, 0, 255]);
    }

    #[test]
    fn test_compare_and_set_out_of_range() {
        let mut data = vec![0u8; 8];
        assert!(!compare_and_set(8, &mut data, BLUE, RED, Tolerance::EXACT));
        assert!(!compare_and_set(6, &mut data, BLUE, RED, Tolerance::EXACT));
    }
}

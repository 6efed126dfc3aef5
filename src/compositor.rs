//! Mask compositing onto RGBA buffers.
//!
//! Both operations touch only pixels whose mask alpha is 255 and are purely
//! per-pixel, so working on a sub-rectangle gives the same result as working
//! on the whole buffer and cropping.

use log::debug;

use crate::basics::COVER_FULL;
use crate::color::Color;
use crate::error::{PaintError, Result};
use crate::mask_builder::Mask;
use crate::pixel_buffer::{PixelBuffer, BPP};

fn check_size(dest: &PixelBuffer, mask: &Mask) -> Result<()> {
    if dest.width() != mask.width() || dest.height() != mask.height() {
        return Err(PaintError::MaskSizeMismatch {
            mask_width: mask.width(),
            mask_height: mask.height(),
            width: dest.width(),
            height: dest.height(),
        });
    }
    Ok(())
}

/// Source-over `c` onto one non-premultiplied pixel.
#[inline]
fn blend_pix(p: &mut [u8], c: Color) {
    if c.a == COVER_FULL {
        p.copy_from_slice(&c.to_array());
        return;
    }
    if c.a == 0 {
        return;
    }
    let sa = c.a as u32;
    let da = Color::multiply(p[3], COVER_FULL - c.a) as u32;
    let out_a = sa + da;
    let half = out_a / 2;
    p[0] = ((c.r as u32 * sa + p[0] as u32 * da + half) / out_a) as u8;
    p[1] = ((c.g as u32 * sa + p[1] as u32 * da + half) / out_a) as u8;
    p[2] = ((c.b as u32 * sa + p[2] as u32 * da + half) / out_a) as u8;
    p[3] = out_a as u8;
}

/// Paint `color` wherever the mask is set. Returns the number of pixels
/// touched.
pub fn apply_paint(dest: &mut PixelBuffer, mask: &Mask, color: Color) -> Result<usize> {
    check_size(dest, mask)?;
    let mut touched = 0;
    for (p, a) in dest.data_mut().chunks_exact_mut(BPP).zip(mask.alphas()) {
        if a == COVER_FULL {
            blend_pix(p, color);
            touched += 1;
        }
    }
    debug!("paint {}: {touched} pixels", color.to_hex());
    Ok(touched)
}

/// Clear alpha wherever the mask is set, leaving RGB untouched. Returns the
/// number of pixels touched.
pub fn apply_erase(dest: &mut PixelBuffer, mask: &Mask) -> Result<usize> {
    check_size(dest, mask)?;
    let mut touched = 0;
    for (p, a) in dest.data_mut().chunks_exact_mut(BPP).zip(mask.alphas()) {
        if a == COVER_FULL {
            p[3] = 0;
            touched += 1;
        }
    }
    debug!("erase: {touched} pixels");
    Ok(touched)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_buffer::Rect;

    fn mask_from(width: u32, height: u32, set: &[(i32, i32)]) -> Mask {
        let mut buf = PixelBuffer::new(width, height).unwrap();
        for &(x, y) in set {
            buf.set_pixel(x, y, Color::BLACK);
        }
        Mask::from_buffer(buf)
    }

    #[test]
    fn test_paint_opaque_is_verbatim() {
        let mut dest = PixelBuffer::filled(3, 1, Color::new(9, 9, 9, 40)).unwrap();
        let mask = mask_from(3, 1, &[(1, 0)]);
        let red = Color::new_opaque(255, 0, 0);
        assert_eq!(apply_paint(&mut dest, &mask, red).unwrap(), 1);
        assert_eq!(dest.pixel(1, 0), Some(red));
        assert_eq!(dest.pixel(0, 0), Some(Color::new(9, 9, 9, 40)));
    }

    #[test]
    fn test_paint_translucent_over_transparent() {
        let mut dest = PixelBuffer::new(1, 1).unwrap();
        let mask = mask_from(1, 1, &[(0, 0)]);
        let c = Color::new(10, 20, 30, 100);
        apply_paint(&mut dest, &mask, c).unwrap();
        assert_eq!(dest.pixel(0, 0), Some(c));
    }

    #[test]
    fn test_paint_translucent_over_opaque() {
        let mut dest = PixelBuffer::filled(1, 1, Color::WHITE).unwrap();
        let mask = mask_from(1, 1, &[(0, 0)]);
        apply_paint(&mut dest, &mask, Color::new(0, 0, 0, 128)).unwrap();
        let p = dest.pixel(0, 0).unwrap();
        assert_eq!(p.a, 255);
        assert!((126..=128).contains(&p.r), "r {}", p.r);
        assert_eq!(p.r, p.g);
        assert_eq!(p.g, p.b);
    }

    #[test]
    fn test_paint_transparent_color_is_noop() {
        let mut dest = PixelBuffer::filled(2, 2, Color::WHITE).unwrap();
        let mask = mask_from(2, 2, &[(0, 0), (1, 1)]);
        let before = dest.clone();
        assert_eq!(apply_paint(&mut dest, &mask, Color::TRANSPARENT).unwrap(), 2);
        assert_eq!(dest, before);
    }

    #[test]
    fn test_erase_full_mask_keeps_rgb() {
        let mut dest = PixelBuffer::new(3, 2).unwrap();
        for (i, b) in dest.data_mut().iter_mut().enumerate() {
            *b = (i * 7 % 256) as u8;
        }
        let before = dest.clone();
        let mut full = PixelBuffer::new(3, 2).unwrap();
        full.fill(Color::BLACK);
        let mask = Mask::from_buffer(full);

        assert_eq!(apply_erase(&mut dest, &mask).unwrap(), 6);
        for (p, q) in dest.data().chunks_exact(BPP).zip(before.data().chunks_exact(BPP)) {
            assert_eq!(&p[..3], &q[..3]);
            assert_eq!(p[3], 0);
        }
    }

    #[test]
    fn test_erase_only_masked() {
        let mut dest = PixelBuffer::filled(2, 1, Color::WHITE).unwrap();
        let mask = mask_from(2, 1, &[(1, 0)]);
        apply_erase(&mut dest, &mask).unwrap();
        assert_eq!(dest.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(dest.pixel(1, 0), Some(Color::new(255, 255, 255, 0)));
    }

    #[test]
    fn test_size_mismatch() {
        let mut dest = PixelBuffer::new(4, 4).unwrap();
        let mask = mask_from(4, 3, &[]);
        assert!(matches!(
            apply_paint(&mut dest, &mask, Color::BLACK),
            Err(PaintError::MaskSizeMismatch { .. })
        ));
        assert!(matches!(
            apply_erase(&mut dest, &mask),
            Err(PaintError::MaskSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_commutes_with_crop() {
        let mut dest = PixelBuffer::filled(6, 5, Color::new(1, 2, 3, 200)).unwrap();
        let set = [(1, 1), (2, 1), (3, 3), (4, 2), (0, 4)];
        let mask = mask_from(6, 5, &set);
        let region = Rect::new(1, 1, 4, 3);
        let c = Color::new(200, 100, 50, 90);

        let mut sub = dest.crop(region).unwrap();
        let sub_mask = Mask::from_buffer(mask.as_buffer().crop(region).unwrap());
        apply_paint(&mut sub, &sub_mask, c).unwrap();

        apply_paint(&mut dest, &mask, c).unwrap();
        assert_eq!(dest.crop(region).unwrap(), sub);
    }
}

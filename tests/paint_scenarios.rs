//! End-to-end painting scenarios through the public API.

use raster_paint::color_match::matches;
use raster_paint::compositor::apply_erase;
use raster_paint::flood_fill::flood_fill;
use raster_paint::line_bresenham::rasterize_line;
use raster_paint::tools::{self, ToolSettings};
use raster_paint::{
    Color, FillOutcome, Mask, MaskBuilder, PixelBuffer, Point, StrokeProfile, Tolerance,
};

const RED: Color = Color::new_opaque(255, 0, 0);
const GREEN: Color = Color::new_opaque(0, 255, 0);
const BLUE: Color = Color::new_opaque(0, 0, 255);

fn split_blue_green() -> PixelBuffer {
    let mut buf = PixelBuffer::filled(4, 4, GREEN).unwrap();
    for y in 0..4 {
        for x in 0..2 {
            buf.set_pixel(x, y, BLUE);
        }
    }
    buf
}

#[test]
fn transparent_buffer_fills_completely() {
    let mut buf = PixelBuffer::new(4, 4).unwrap();
    let out = flood_fill(&mut buf, 0.0, 0.0, RED, Tolerance::EXACT).unwrap();
    assert_eq!(out, FillOutcome::Filled { pixels: 16 });
    for p in buf.data().chunks_exact(4) {
        assert_eq!(p, &[255, 0, 0, 255]);
    }
}

#[test]
fn fill_stops_at_colour_boundary() {
    let mut buf = split_blue_green();
    flood_fill(&mut buf, 0.0, 0.0, RED, Tolerance::EXACT).unwrap();
    for y in 0..4 {
        for x in 0..4 {
            let expect = if x < 2 { RED } else { GREEN };
            assert_eq!(buf.pixel(x, y), Some(expect), "({x}, {y})");
        }
    }
}

#[test]
fn fill_is_idempotent() {
    for t in [0u8, 3, 40, 254] {
        let mut buf = split_blue_green();
        let tol = Tolerance::new(t);
        flood_fill(&mut buf, 1.0, 2.0, RED, tol).unwrap();
        let once = buf.clone();
        let second = flood_fill(&mut buf, 1.0, 2.0, RED, tol).unwrap();
        assert_eq!(second, FillOutcome::Unchanged, "tolerance {t}");
        assert_eq!(buf, once, "tolerance {t}");
    }
}

#[test]
fn fill_is_seed_independent() {
    let base = split_blue_green();
    let mut results = Vec::new();
    for (x, y) in [(0.0, 0.0), (1.0, 3.0), (0.0, 2.0), (1.0, 1.0)] {
        let mut buf = base.clone();
        flood_fill(&mut buf, x, y, RED, Tolerance::EXACT).unwrap();
        results.push(buf);
    }
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn fill_colour_is_never_its_own_match() {
    for t in [0u8, 1, 17, 128, 254] {
        for c in [RED, GREEN, Color::new(10, 20, 30, 40), Color::WHITE] {
            assert!(!matches(c, c, c, Tolerance::new(t)), "{c:?} at {t}");
        }
    }
}

#[test]
fn line_endpoints() {
    assert_eq!(rasterize_line(7.0, 7.0, 7.0, 7.0), vec![(7, 7)]);
    assert_eq!(
        rasterize_line(0.0, 0.0, 3.0, 0.0),
        vec![(0, 0), (1, 0), (2, 0), (3, 0)]
    );
}

#[test]
fn stroke_mask_is_binary() {
    let mut builder = MaskBuilder::new();
    let path: Vec<Point> = (0..20)
        .map(|i| {
            let t = i as f64 * 0.37;
            Point::new(16.0 + 10.0 * t.cos(), 16.0 + 10.0 * t.sin())
        })
        .collect();
    for (width, profile) in [
        (1.0, StrokeProfile::Brush),
        (3.3, StrokeProfile::Brush),
        (1.5, StrokeProfile::Eraser),
        (9.0, StrokeProfile::Eraser),
    ] {
        let mask = builder
            .build_with_profile(32, 32, &path, width, profile)
            .unwrap();
        assert!(mask.count() > 0);
        assert!(mask.alphas().all(|a| a == 0 || a == 255));
    }
}

#[test]
fn threshold_saturates_partial_alpha() {
    let mut buf = PixelBuffer::new(256, 1).unwrap();
    for (i, p) in buf.data_mut().chunks_exact_mut(4).enumerate() {
        p[3] = i as u8;
    }
    let mask = Mask::from_buffer(buf);
    for (i, a) in mask.alphas().enumerate() {
        assert_eq!(a, if i == 0 { 0 } else { 255 });
    }
}

#[test]
fn erase_with_full_mask_clears_alpha_only() {
    let mut dest = PixelBuffer::new(5, 3).unwrap();
    for (i, b) in dest.data_mut().iter_mut().enumerate() {
        *b = (31 + i * 13) as u8;
    }
    let before = dest.clone();
    let mask = Mask::from_buffer(PixelBuffer::filled(5, 3, Color::BLACK).unwrap());

    assert_eq!(apply_erase(&mut dest, &mask).unwrap(), 15);
    for (p, q) in dest.data().chunks_exact(4).zip(before.data().chunks_exact(4)) {
        assert_eq!(&p[..3], &q[..3]);
        assert_eq!(p[3], 0);
    }
}

#[test]
fn brush_then_eraser_round_trip() {
    let mut dest = PixelBuffer::new(24, 24).unwrap();
    let mut scratch = MaskBuilder::new();
    let mut settings = ToolSettings::default();
    settings.set_size(5.0);
    settings.set_colour(BLUE);
    let path = [Point::new(4.0, 12.0), Point::new(20.0, 12.0)];

    let painted = tools::pixel_tip(&mut dest, &mut scratch, &settings, &path).unwrap();
    assert!(painted > 0);
    assert_eq!(dest.pixel(12, 12), Some(BLUE));

    // The eraser at the same width covers the same stroke.
    let cleared = tools::pixel_clear(&mut dest, &mut scratch, &settings, &path).unwrap();
    assert_eq!(cleared, painted);
    assert!(dest.data().chunks_exact(4).all(|p| p[3] == 0));
}

#[test]
fn fill_tool_uses_threshold() {
    let mut dest = PixelBuffer::filled(3, 1, BLUE).unwrap();
    dest.set_pixel(2, 0, Color::new_opaque(0, 6, 250));
    let mut settings = ToolSettings::default();
    settings.set_colour(RED);
    settings.set_threshold(5.6);
    let out = tools::flood_fill_tool(&mut dest, &settings, &[Point::new(1.0, 0.5)]).unwrap();
    assert_eq!(out.pixels(), 3);
}

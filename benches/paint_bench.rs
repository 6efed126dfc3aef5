use criterion::{black_box, criterion_group, criterion_main, Criterion};

use raster_paint::flood_fill::flood_fill;
use raster_paint::{Color, MaskBuilder, PixelBuffer, Point, StrokeProfile, Tolerance};

const SIZE: u32 = 512;

fn scribble() -> Vec<Point> {
    (0..200)
        .map(|i| {
            let t = i as f64 * 0.11;
            Point::new(256.0 + 180.0 * t.cos() * (t * 0.3).sin(), 256.0 + 180.0 * t.sin())
        })
        .collect()
}

fn bench_flood_fill(c: &mut Criterion) {
    let blank = PixelBuffer::new(SIZE, SIZE).unwrap();
    let red = Color::new_opaque(255, 0, 0);

    c.bench_function("flood_fill_open_512", |b| {
        b.iter(|| {
            let mut buf = blank.clone();
            black_box(flood_fill(&mut buf, 10.0, 10.0, red, Tolerance::EXACT).unwrap())
        })
    });

    // A maze of vertical walls with alternating gaps forces many short spans.
    let mut maze = PixelBuffer::new(SIZE, SIZE).unwrap();
    for x in (4..SIZE as i32).step_by(4) {
        let gap = if (x / 4) % 2 == 0 { 0 } else { SIZE as i32 - 1 };
        for y in 0..SIZE as i32 {
            if y != gap {
                maze.set_pixel(x, y, Color::BLACK);
            }
        }
    }
    c.bench_function("flood_fill_maze_512", |b| {
        b.iter(|| {
            let mut buf = maze.clone();
            black_box(flood_fill(&mut buf, 0.0, 0.0, red, Tolerance::new(8)).unwrap())
        })
    });
}

fn bench_mask_builder(c: &mut Criterion) {
    let path = scribble();
    let mut builder = MaskBuilder::new();

    c.bench_function("mask_hairline_512", |b| {
        b.iter(|| {
            black_box(
                builder
                    .build_with_profile(SIZE, SIZE, &path, 1.0, StrokeProfile::Brush)
                    .unwrap()
                    .count(),
            )
        })
    });

    c.bench_function("mask_stroked_w12_512", |b| {
        b.iter(|| {
            black_box(
                builder
                    .build_with_profile(SIZE, SIZE, &path, 12.0, StrokeProfile::Brush)
                    .unwrap()
                    .count(),
            )
        })
    });
}

criterion_group!(benches, bench_flood_fill, bench_mask_builder);
criterion_main!(benches);

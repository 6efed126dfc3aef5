//! Round-capped, round-joined stroke geometry.
//!
//! A stroke of width `w` along a polyline is the set of points within `w/2`
//! of the path. That set is the union of one rectangle per segment and one
//! disk per vertex; the disks supply both the round caps and the round
//! joins. Every emitted polygon has positive signed area, so the non-zero
//! rasterizer fills their union without cancellation.
//!
//! Disks are approximated with the round-join arc step
//! `da = 2 * acos(r / (r + 0.125 / approximation_scale))`.

use std::f64::consts::PI;

use crate::basics::{Point, POLY_MAX_COORD};
use crate::rasterizer_scanline::RasterizerScanline;

/// Minimum number of vertices of a disk polygon.
const MIN_DISK_VERTICES: usize = 8;

/// Twice the signed area of a closed polygon (shoelace formula).
pub fn signed_area2(pts: &[Point]) -> f64 {
    let n = pts.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum
}

/// Stroke outline generator for round caps and joins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundStroke {
    radius: f64,
    approx_scale: f64,
}

impl RoundStroke {
    pub fn new(width: f64) -> Self {
        Self {
            radius: (width * 0.5).abs(),
            approx_scale: 1.0,
        }
    }

    pub fn set_width(&mut self, w: f64) {
        self.radius = (w * 0.5).abs();
    }

    pub fn width(&self) -> f64 {
        self.radius * 2.0
    }

    pub fn set_approximation_scale(&mut self, s: f64) {
        self.approx_scale = s;
    }

    pub fn approximation_scale(&self) -> f64 {
        self.approx_scale
    }

    /// Vertex count for a full disk of this stroke's radius.
    ///
    /// Rasterizer coordinates saturate at `POLY_MAX_COORD`, so any larger
    /// radius is counted as that one.
    fn disk_vertices(&self) -> usize {
        let r = self.radius.min(POLY_MAX_COORD as f64);
        let da = (r / (r + 0.125 / self.approx_scale)).acos() * 2.0;
        if !(da > 0.0) {
            return MIN_DISK_VERTICES;
        }
        ((2.0 * PI / da).ceil() as usize).max(MIN_DISK_VERTICES)
    }

    /// Disk polygon centred on `c`, counter-clockwise in y-up terms.
    pub fn disk(&self, c: Point) -> Vec<Point> {
        let n = self.disk_vertices();
        let da = 2.0 * PI / n as f64;
        (0..n)
            .map(|i| {
                let a = da * i as f64;
                Point::new(c.x + a.cos() * self.radius, c.y + a.sin() * self.radius)
            })
            .collect()
    }

    /// Rectangle covering segment `p0 -> p1`; `None` for a zero-length segment.
    pub fn segment(&self, p0: Point, p1: Point) -> Option<[Point; 4]> {
        let d = p1 - p0;
        let len = d.length();
        if len == 0.0 {
            return None;
        }
        let n = Point::new(-d.y / len * self.radius, d.x / len * self.radius);
        let mut quad = [p0 + n, p1 + n, p1 - n, p0 - n];
        if signed_area2(&quad) < 0.0 {
            quad.reverse();
        }
        Some(quad)
    }

    /// All polygons whose union is the stroke of `path`.
    ///
    /// Consecutive duplicate points are collapsed; a single point yields a
    /// single disk.
    pub fn outline(&self, path: &[Point]) -> Vec<Vec<Point>> {
        let mut polygons = Vec::new();
        let mut prev: Option<Point> = None;
        for &p in path {
            if prev == Some(p) {
                continue;
            }
            if let Some(q) = prev {
                if let Some(quad) = self.segment(q, p) {
                    polygons.push(quad.to_vec());
                }
            }
            polygons.push(self.disk(p));
            prev = Some(p);
        }
        polygons
    }

    /// Feed the stroke of `path` into a rasterizer.
    pub fn add_to(&self, ras: &mut RasterizerScanline, path: &[Point]) {
        for poly in self.outline(path) {
            ras.add_polygon(&poly);
        }
    }
}

impl Default for RoundStroke {
    fn default() -> Self {
        Self::new(1.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

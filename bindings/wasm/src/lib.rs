use raster_paint::flood_fill::flood_fill_raw;
use raster_paint::tools::{self, ToolSettings};
use raster_paint::{Color, MaskBuilder, PaintError, PixelBuffer, Point, Rect};
use wasm_bindgen::prelude::*;

fn to_js(e: PaintError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

/// Flat `[x0, y0, x1, y1, ...]` coordinates to points. A trailing odd value
/// is ignored.
fn path_points(xy: &[f64]) -> Vec<Point> {
    xy.chunks_exact(2).map(|p| Point::new(p[0], p[1])).collect()
}

/// Run `op` on a copy of `data` and write the result back.
fn with_buffer<T>(
    data: &mut [u8],
    width: u32,
    height: u32,
    op: impl FnOnce(&mut PixelBuffer) -> raster_paint::Result<T>,
) -> Result<T, JsValue> {
    let mut buf = PixelBuffer::from_vec(data.to_vec(), width, height).map_err(to_js)?;
    let out = op(&mut buf).map_err(to_js)?;
    data.copy_from_slice(buf.data());
    Ok(out)
}

/// Painting engine for one page. Holds the tool settings and the stroke
/// mask scratch buffer; pixel data is passed in per call.
#[wasm_bindgen]
pub struct PaintEngine {
    settings: ToolSettings,
    scratch: MaskBuilder,
}

#[wasm_bindgen]
impl PaintEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            settings: ToolSettings::default(),
            scratch: MaskBuilder::new(),
        }
    }

    pub fn set_size(&mut self, size: f64) {
        self.settings.set_size(size);
    }

    pub fn set_hardness(&mut self, hardness: f64) {
        self.settings.set_hardness(hardness);
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.settings.set_threshold(threshold);
    }

    pub fn set_colour(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.settings.set_colour(Color::new(r, g, b, a));
    }

    /// Current colour as `#rrggbb`.
    pub fn colour_hex(&self) -> String {
        self.settings.colour().to_hex()
    }

    /// Paint a hard-edged stroke. Returns the number of pixels painted.
    pub fn pixel_tip(
        &mut self,
        data: &mut [u8],
        width: u32,
        height: u32,
        path: &[f64],
    ) -> Result<u32, JsValue> {
        let pts = path_points(path);
        let (settings, scratch) = (&self.settings, &mut self.scratch);
        with_buffer(data, width, height, |buf| {
            tools::pixel_tip(buf, scratch, settings, &pts)
        })
        .map(|n| n as u32)
    }

    /// Erase a hard-edged stroke. Returns the number of pixels cleared.
    pub fn pixel_clear(
        &mut self,
        data: &mut [u8],
        width: u32,
        height: u32,
        path: &[f64],
    ) -> Result<u32, JsValue> {
        let pts = path_points(path);
        let (settings, scratch) = (&self.settings, &mut self.scratch);
        with_buffer(data, width, height, |buf| {
            tools::pixel_clear(buf, scratch, settings, &pts)
        })
        .map(|n| n as u32)
    }

    /// Flood fill from the last path point. Returns the number of pixels
    /// written, 0 when the seed already has the fill colour.
    pub fn fill_flood(
        &self,
        data: &mut [u8],
        width: u32,
        height: u32,
        path: &[f64],
    ) -> Result<u32, JsValue> {
        let pts = path_points(path);
        let Some((x, y)) = tools::tool_point(&pts) else {
            return Err(to_js(PaintError::EmptyStrokePath));
        };
        flood_fill_raw(
            data,
            width,
            height,
            x,
            y,
            self.settings.colour(),
            self.settings.tolerance(),
        )
        .map(|out| out.pixels() as u32)
        .map_err(to_js)
    }

    /// Flood fill inside a sub-rectangle, seeded relative to it.
    ///
    /// Missing `left`/`top` default to 0. Missing or zero `right`/`bottom`
    /// (the region's extents) default to the buffer size and are clamped
    /// to it.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_region(
        &self,
        data: &mut [u8],
        width: u32,
        height: u32,
        x: f64,
        y: f64,
        left: Option<u32>,
        top: Option<u32>,
        right: Option<u32>,
        bottom: Option<u32>,
    ) -> Result<u32, JsValue> {
        let region = Rect::new(
            left.unwrap_or(0),
            top.unwrap_or(0),
            right.filter(|&r| r > 0).map_or(width, |r| r.min(width)),
            bottom.filter(|&b| b > 0).map_or(height, |b| b.min(height)),
        );
        let (colour, tolerance) = (self.settings.colour(), self.settings.tolerance());
        with_buffer(data, width, height, |buf| {
            tools::fill_region(buf, region, x, y, colour, tolerance)
        })
        .map(|out| out.pixels() as u32)
    }

    /// Colour under the last path point as `#rrggbb`, if inside the buffer.
    pub fn eye_dropper(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        path: &[f64],
    ) -> Result<Option<String>, JsValue> {
        let buf = PixelBuffer::from_vec(data.to_vec(), width, height).map_err(to_js)?;
        Ok(tools::eye_dropper(&buf, &path_points(path)).map(|c| c.to_hex()))
    }
}

impl Default for PaintEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version string.
#[wasm_bindgen]
pub fn version() -> String {
    concat!("raster-paint ", env!("CARGO_PKG_VERSION")).to_string()
}

//! Immediate-mode path canvas that rasterizes into an 8-bit coverage mask.
//!
//! The drawing vocabulary follows the HTML 2D canvas path model closely enough that icon
//! routines read like their canvas counterparts: a single current path, `arc` joining from the
//! current point, strokes with round caps and joins at the current line width, and
//! `clear_rect` punching holes into everything drawn so far.
//!
//! Filled and stroked shapes are batched and handed to `vello_cpu` in one render pass; a
//! `clear_rect` flushes the pending batch first so that it only affects earlier drawing.

use kurbo::{Arc, Cap, Join, PathEl, RoundedRect, Shape as _, Stroke, StrokeOpts};

use crate::foundation::{
    core::{BezPath, Point, Rect, SurfaceSize, Vec2},
    error::{FieldError, FieldResult},
    math::alpha_over,
};

const TOLERANCE: f64 = 0.05;

/// Row-major 8-bit alpha coverage of a rasterized drawing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageMask {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// One alpha byte per pixel, `width * height` entries.
    pub alpha: Vec<u8>,
}

impl CoverageMask {
    /// Fully transparent mask.
    pub fn empty(size: SurfaceSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            alpha: vec![0; size.area()],
        }
    }

    /// Build a mask from explicit alpha bytes.
    pub fn from_alpha(width: u32, height: u32, alpha: Vec<u8>) -> FieldResult<Self> {
        if alpha.len() != width as usize * height as usize {
            return Err(FieldError::raster(format!(
                "coverage length {} does not match {width}x{height}",
                alpha.len()
            )));
        }
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Alpha at pixel `(x, y)`, or `0` outside the mask.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[y as usize * self.width as usize + x as usize]
    }

    /// Number of pixels whose alpha is strictly greater than `threshold`.
    pub fn count_above(&self, threshold: u8) -> usize {
        self.alpha.iter().filter(|&&a| a > threshold).count()
    }

    fn merge_premul_rgba(&mut self, rgba: &[u8]) {
        for (dst, px) in self.alpha.iter_mut().zip(rgba.chunks_exact(4)) {
            *dst = alpha_over(px[3], *dst);
        }
    }
}

/// Drawing surface used by icon routines.
pub struct GlyphCanvas {
    size: SurfaceSize,
    width_u16: u16,
    height_u16: u16,
    line_width: f64,
    path: BezPath,
    current: Option<Point>,
    subpath_start: Option<Point>,
    pending: Vec<BezPath>,
    mask: CoverageMask,
}

impl GlyphCanvas {
    /// Create an offscreen canvas at full target resolution.
    ///
    /// Fails when the surface has zero area or exceeds the rasterizer's extent limits.
    pub fn new(size: SurfaceSize) -> FieldResult<Self> {
        let (width_u16, height_u16) = size.to_u16()?;
        Ok(Self {
            size,
            width_u16,
            height_u16,
            line_width: 1.0,
            path: BezPath::new(),
            current: None,
            subpath_start: None,
            pending: Vec::new(),
            mask: CoverageMask::empty(size),
        })
    }

    /// Surface size this canvas rasterizes at.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Current stroke width.
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Set the stroke width used by subsequent [`GlyphCanvas::stroke`] calls.
    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    /// Discard the current path.
    pub fn begin_path(&mut self) {
        self.path = BezPath::new();
        self.current = None;
        self.subpath_start = None;
    }

    /// Start a new subpath at `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) {
        let p = Point::new(x, y);
        self.path.move_to(p);
        self.current = Some(p);
        self.subpath_start = Some(p);
    }

    /// Straight segment to `(x, y)`; starts a subpath when there is no current point.
    pub fn line_to(&mut self, x: f64, y: f64) {
        if self.current.is_none() {
            self.move_to(x, y);
            return;
        }
        let p = Point::new(x, y);
        self.path.line_to(p);
        self.current = Some(p);
    }

    /// Quadratic Bézier through control point `(cx, cy)` to `(x, y)`.
    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.ensure_subpath(cx, cy);
        let p = Point::new(x, y);
        self.path.quad_to(Point::new(cx, cy), p);
        self.current = Some(p);
    }

    /// Cubic Bézier through `(c1x, c1y)` and `(c2x, c2y)` to `(x, y)`.
    pub fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        self.ensure_subpath(c1x, c1y);
        let p = Point::new(x, y);
        self.path
            .curve_to(Point::new(c1x, c1y), Point::new(c2x, c2y), p);
        self.current = Some(p);
    }

    /// Close the current subpath back to its start.
    pub fn close_path(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.path.close_path();
        self.current = self.subpath_start;
    }

    /// Clockwise circular arc from `start` to `end` radians around `(cx, cy)`.
    ///
    /// Connects from the current point with a straight segment, as the 2D canvas does.
    /// Sweeps of `2π` or more draw a full circle.
    pub fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        let sweep = clockwise_sweep(start, end);
        let center = Point::new(cx, cy);
        let from = center + Vec2::from_angle(start) * radius;
        if self.current.is_some() {
            self.line_to(from.x, from.y);
        } else {
            self.move_to(from.x, from.y);
        }
        let arc = Arc::new(center, Vec2::new(radius, radius), start, sweep, 0.0);
        for el in arc.append_iter(TOLERANCE) {
            self.path.push(el);
        }
        self.current = Some(center + Vec2::from_angle(start + sweep) * radius);
    }

    /// Append a closed rounded-rectangle subpath.
    pub fn round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        let rr = RoundedRect::new(x, y, x + w, y + h, radius);
        for el in rr.path_elements(TOLERANCE) {
            self.path.push(el);
        }
        self.current = Some(Point::new(x, y));
        self.subpath_start = Some(Point::new(x, y));
    }

    /// Stroke the current path with round caps and joins.
    pub fn stroke(&mut self) {
        if self.path.elements().is_empty() || self.line_width <= 0.0 {
            return;
        }
        let style = Stroke::new(self.line_width)
            .with_caps(Cap::Round)
            .with_join(Join::Round);
        let outline = kurbo::stroke(
            self.path.iter(),
            &style,
            &StrokeOpts::default(),
            TOLERANCE,
        );
        self.pending.push(outline);
    }

    /// Fill the current path (non-zero winding).
    pub fn fill(&mut self) {
        if self.path.elements().is_empty() {
            return;
        }
        self.pending.push(self.path.clone());
    }

    /// Fill an axis-aligned rectangle without touching the current path.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.pending
            .push(Rect::new(x, y, x + w, y + h).to_path(TOLERANCE));
    }

    /// Erase coverage inside a rectangle: every pixel whose center falls inside is cleared.
    pub fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> FieldResult<()> {
        self.flush()?;
        let rect = Rect::new(x, y, x + w, y + h).abs();
        let width = self.mask.width as usize;
        let y0 = (rect.y0 - 0.5).ceil().max(0.0) as usize;
        let y1 = ((rect.y1 - 0.5).ceil().max(0.0) as usize).min(self.mask.height as usize);
        let x0 = (rect.x0 - 0.5).ceil().max(0.0) as usize;
        let x1 = ((rect.x1 - 0.5).ceil().max(0.0) as usize).min(width);
        for row in y0..y1 {
            for col in x0..x1 {
                self.mask.alpha[row * width + col] = 0;
            }
        }
        Ok(())
    }

    /// Rasterize everything drawn so far and return the coverage mask.
    pub fn finish(mut self) -> FieldResult<CoverageMask> {
        self.flush()?;
        Ok(self.mask)
    }

    fn ensure_subpath(&mut self, x: f64, y: f64) {
        if self.current.is_none() {
            self.move_to(x, y);
        }
    }

    fn flush(&mut self) -> FieldResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let mut ctx = vello_cpu::RenderContext::new(self.width_u16, self.height_u16);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));
        for path in self.pending.drain(..) {
            ctx.fill_path(&bezpath_to_cpu(&path));
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(self.width_u16, self.height_u16);
        ctx.render_to_pixmap(&mut pixmap);
        let rgba = pixmap.data_as_u8_slice();
        if rgba.len() != self.mask.alpha.len() * 4 {
            return Err(FieldError::raster("rasterizer returned unexpected pixmap size"));
        }
        self.mask.merge_premul_rgba(rgba);
        Ok(())
    }
}

/// Canvas-style clockwise sweep from `start` to `end`, in `(0, 2π]` (or `0` when equal).
pub(crate) fn clockwise_sweep(start: f64, end: f64) -> f64 {
    use std::f64::consts::TAU;

    let raw = end - start;
    if raw >= TAU {
        return TAU;
    }
    let sweep = raw.rem_euclid(TAU);
    if sweep == 0.0 && raw != 0.0 { TAU } else { sweep }
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    fn pt(p: Point) -> vello_cpu::kurbo::Point {
        vello_cpu::kurbo::Point::new(p.x, p.y)
    }

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/glyphs/canvas.rs"]
mod tests;

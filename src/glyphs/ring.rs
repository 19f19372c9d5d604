use crate::{
    foundation::core::{Point, SurfaceSize},
    glyphs::canvas::GlyphCanvas,
};

/// Ring radius as a fraction of the surface's shorter side.
pub(crate) const RING_RADIUS_FRAC: f64 = 0.40;
/// Icon size scale as a fraction of the surface's shorter side.
pub(crate) const ICON_SIZE_FRAC: f64 = 0.20;
/// Base stroke width as a fraction of the surface's shorter side.
pub(crate) const LINE_WIDTH_FRAC: f64 = 0.005;
/// Angular gap left open on each side of an icon slot, in degrees.
pub(crate) const GAP_DEG: f64 = 28.0;

/// Slot angles in degrees, in ring traversal order (clockwise from top-left).
const RING_ORDER_DEG: [f64; 4] = [-135.0, -45.0, 45.0, 135.0];

/// Geometry shared by every ring-style icon set.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RingLayout {
    pub(crate) center: Point,
    pub(crate) radius: f64,
    /// Icon unit: glyphs are authored on a 20-unit grid.
    pub(crate) s: f64,
    pub(crate) base_line_width: f64,
    pub(crate) min_side: f64,
    pub(crate) top_left: Point,
    pub(crate) top_right: Point,
    pub(crate) bottom_left: Point,
    pub(crate) bottom_right: Point,
}

impl RingLayout {
    pub(crate) fn for_size(size: SurfaceSize) -> Self {
        let min_side = size.min_side();
        let center = size.center();
        let radius = min_side * RING_RADIUS_FRAC;
        let slot = |deg: f64| {
            let rad = deg.to_radians();
            Point::new(center.x + rad.cos() * radius, center.y + rad.sin() * radius)
        };
        Self {
            center,
            radius,
            s: min_side * ICON_SIZE_FRAC / 20.0,
            base_line_width: min_side * LINE_WIDTH_FRAC,
            min_side,
            top_left: slot(-135.0),
            top_right: slot(-45.0),
            bottom_left: slot(135.0),
            bottom_right: slot(45.0),
        }
    }

    /// Prepare the canvas stroke state shared by all glyphs.
    pub(crate) fn prime(&self, c: &mut GlyphCanvas) {
        c.set_line_width(self.base_line_width);
    }

    /// Four arc segments, each leaving a gap around both neighbouring icon slots.
    pub(crate) fn draw_ring(&self, c: &mut GlyphCanvas) {
        let gap = GAP_DEG.to_radians();
        for i in 0..RING_ORDER_DEG.len() {
            let start = RING_ORDER_DEG[i].to_radians() + gap;
            let end = RING_ORDER_DEG[(i + 1) % RING_ORDER_DEG.len()].to_radians() - gap;
            c.begin_path();
            c.arc(self.center.x, self.center.y, self.radius, start, end);
            c.stroke();
        }
    }
}

/// Shield outline, inner outline and checkmark.
pub(crate) fn draw_shield(c: &mut GlyphCanvas, ix: f64, iy: f64, s: f64) {
    for (half_w, top, shoulder, tip_ctrl, tip) in
        [(7.0, 9.0, 5.0, 8.0, 10.0), (5.0, 6.0, 3.0, 6.0, 8.0)]
    {
        c.begin_path();
        c.move_to(ix, iy - top * s);
        c.line_to(ix + half_w * s, iy - shoulder * s);
        c.line_to(ix + half_w * s, iy + 2.0 * s);
        c.quad_to(ix + half_w * s, iy + tip_ctrl * s, ix, iy + tip * s);
        c.quad_to(ix - half_w * s, iy + tip_ctrl * s, ix - half_w * s, iy + 2.0 * s);
        c.line_to(ix - half_w * s, iy - shoulder * s);
        c.close_path();
        c.stroke();
    }

    c.begin_path();
    c.move_to(ix - 3.0 * s, iy + 1.0 * s);
    c.line_to(ix - 0.5 * s, iy + 3.5 * s);
    c.line_to(ix + 4.0 * s, iy - 2.5 * s);
    c.stroke();
}

#[cfg(test)]
#[path = "../../tests/unit/glyphs/ring.rs"]
mod tests;

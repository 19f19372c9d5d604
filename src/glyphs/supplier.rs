//! Supplier icon set: shield, analytics, e-commerce and marketing glyphs around the ring.

use std::f64::consts::{FRAC_PI_4, TAU};

use crate::{
    foundation::error::FieldResult,
    glyphs::{
        canvas::GlyphCanvas,
        ring::{RingLayout, draw_shield},
    },
};

pub(crate) fn draw(c: &mut GlyphCanvas, layout: &RingLayout) -> FieldResult<()> {
    let s = layout.s;
    draw_shield(c, layout.top_left.x, layout.top_left.y, s);
    draw_analytics(c, layout, layout.top_right.x, layout.top_right.y);
    draw_ecommerce(c, layout.bottom_left.x, layout.bottom_left.y, s)?;
    draw_marketing(c, layout.bottom_right.x, layout.bottom_right.y, s)?;
    Ok(())
}

/// Magnifying glass over a rising bar chart.
fn draw_analytics(c: &mut GlyphCanvas, layout: &RingLayout, ix: f64, iy: f64) {
    let s = layout.s;
    let (gx, gy) = (ix - 1.5 * s, iy - 1.5 * s);
    let rim = 6.0 * s;

    c.begin_path();
    c.arc(gx, gy, rim, 0.0, TAU);
    c.stroke();

    // Handle at 45°, drawn heavier than the rest of the set.
    let handle_len = 8.0 * s;
    let (sx, sy) = (gx + rim * FRAC_PI_4.cos(), gy + rim * FRAC_PI_4.sin());
    c.begin_path();
    c.set_line_width(layout.min_side * 0.009);
    c.move_to(sx, sy);
    c.line_to(
        sx + handle_len * FRAC_PI_4.cos(),
        sy + handle_len * FRAC_PI_4.sin(),
    );
    c.stroke();
    c.set_line_width(layout.base_line_width);

    c.begin_path();
    c.move_to(gx - 3.5 * s, gy - 3.5 * s);
    c.line_to(gx - 3.5 * s, gy + 3.5 * s);
    c.line_to(gx + 3.5 * s, gy + 3.5 * s);
    c.stroke();

    let bar_w = 1.5 * s;
    let spacing = 0.5 * s;
    let first_x = gx - 3.0 * s + spacing;
    let baseline = gy + 3.5 * s;
    for (i, height) in [2.0, 4.0, 6.0].into_iter().enumerate() {
        let x = first_x + (bar_w + spacing) * i as f64;
        c.fill_rect(x, baseline - height * s, bar_w, height * s);
    }
}

/// Document behind a laptop whose screen shows a shopping cart.
fn draw_ecommerce(c: &mut GlyphCanvas, ix: f64, iy: f64, s: f64) -> FieldResult<()> {
    let (dx, dy) = (ix - 5.0 * s, iy - 4.0 * s);
    c.begin_path();
    c.round_rect(dx - 5.0 * s, dy - 4.0 * s, 9.0 * s, 11.0 * s, 1.0 * s);
    c.stroke();

    c.begin_path();
    for row in [-1.5, 1.0, 3.5] {
        c.move_to(dx - 3.0 * s, dy + row * s);
        c.line_to(dx + 2.0 * s, dy + row * s);
    }
    c.stroke();

    c.clear_rect(ix - 3.5 * s, iy - 6.5 * s, 13.0 * s, 10.0 * s)?;
    c.begin_path();
    c.round_rect(ix - 3.0 * s, iy - 6.0 * s, 12.0 * s, 9.0 * s, 1.0 * s);
    c.stroke();

    c.begin_path();
    c.move_to(ix - 5.0 * s, iy + 3.0 * s);
    c.line_to(ix + 11.0 * s, iy + 3.0 * s);
    c.stroke();

    c.begin_path();
    c.move_to(ix, iy - 4.5 * s);
    c.line_to(ix + 1.5 * s, iy - 0.5 * s);
    c.line_to(ix + 7.5 * s, iy - 0.5 * s);
    c.line_to(ix + 8.5 * s, iy - 3.5 * s);
    c.line_to(ix + 1.0 * s, iy - 3.5 * s);
    c.stroke();

    // Both wheels share one path, so the second arc joins from the first.
    c.begin_path();
    c.arc(ix + 3.0 * s, iy + 0.5 * s, 1.0 * s, 0.0, TAU);
    c.arc(ix + 6.5 * s, iy + 0.5 * s, 1.0 * s, 0.0, TAU);
    c.stroke();
    Ok(())
}

/// Megaphone with sound waves, a checklist card and a dollar coin.
fn draw_marketing(c: &mut GlyphCanvas, ix: f64, iy: f64, s: f64) -> FieldResult<()> {
    c.begin_path();
    c.move_to(ix - 7.0 * s, iy - 2.0 * s);
    c.line_to(ix - 7.0 * s, iy + 2.0 * s);
    c.line_to(ix + 1.0 * s, iy + 5.0 * s);
    c.line_to(ix + 1.0 * s, iy - 5.0 * s);
    c.close_path();
    c.stroke();

    c.begin_path();
    c.round_rect(ix - 10.0 * s, iy - 2.0 * s, 3.0 * s, 4.0 * s, 0.5 * s);
    c.stroke();

    c.begin_path();
    c.move_to(ix - 6.0 * s, iy + 2.0 * s);
    c.quad_to(ix - 6.0 * s, iy + 6.0 * s, ix - 2.0 * s, iy + 6.0 * s);
    c.line_to(ix - 1.0 * s, iy + 4.5 * s);
    c.stroke();

    for radius in [4.0, 7.0] {
        c.begin_path();
        c.arc(ix + 2.0 * s, iy, radius * s, -0.6, 0.6);
        c.stroke();
    }

    let (lx, ly) = (ix + 4.0 * s, iy - 6.0 * s);
    c.clear_rect(lx - 1.0 * s, ly - 1.0 * s, 9.0 * s, 11.0 * s)?;
    c.begin_path();
    c.round_rect(lx, ly, 7.0 * s, 9.0 * s, 1.0 * s);
    c.stroke();
    for row in 0..3 {
        let ry = ly + 2.5 * s + f64::from(row) * 2.5 * s;
        c.begin_path();
        c.arc(lx + 1.5 * s, ry, 0.5 * s, 0.0, TAU);
        c.fill();
        c.begin_path();
        c.move_to(lx + 3.0 * s, ry);
        c.line_to(lx + 6.0 * s, ry);
        c.stroke();
    }

    let (cx, cy) = (ix + 2.0 * s, iy + 6.0 * s);
    let r = 3.5 * s;
    c.clear_rect(cx - r - 1.0, cy - r - 1.0, r * 2.0 + 2.0, r * 2.0 + 2.0)?;
    c.begin_path();
    c.arc(cx, cy, r, 0.0, TAU);
    c.stroke();

    c.begin_path();
    c.move_to(cx + 1.5 * s, cy - 2.0 * s);
    c.cubic_to(
        cx - 1.5 * s,
        cy - 2.0 * s,
        cx - 1.5 * s,
        cy - 0.5 * s,
        cx,
        cy,
    );
    c.cubic_to(
        cx + 1.5 * s,
        cy + 0.5 * s,
        cx + 1.5 * s,
        cy + 2.0 * s,
        cx - 1.5 * s,
        cy + 2.0 * s,
    );
    c.stroke();

    c.begin_path();
    c.move_to(cx, cy - 2.5 * s);
    c.line_to(cx, cy + 2.5 * s);
    c.stroke();
    Ok(())
}

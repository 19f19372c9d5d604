//! Warehouse icon set: forklift, shield, barcode scanner and clipboard around the ring.

use std::f64::consts::TAU;

use crate::glyphs::{
    canvas::GlyphCanvas,
    ring::{RingLayout, draw_shield},
};

pub(crate) fn draw(c: &mut GlyphCanvas, layout: &RingLayout) {
    let s = layout.s;
    draw_forklift(c, layout.top_left.x, layout.top_left.y, s);
    draw_shield(c, layout.top_right.x, layout.top_right.y, s);
    draw_scanner(c, layout.bottom_left.x, layout.bottom_left.y, s);
    draw_clipboard(c, layout.bottom_right.x, layout.bottom_right.y, s);
}

fn draw_forklift(c: &mut GlyphCanvas, ix: f64, iy: f64, s: f64) {
    c.begin_path();
    c.round_rect(ix - 7.0 * s, iy - 1.0 * s, 10.0 * s, 6.0 * s, 1.0 * s);
    c.stroke();

    // Mast
    c.begin_path();
    c.move_to(ix - 7.0 * s, iy - 1.0 * s);
    c.line_to(ix - 7.0 * s, iy - 9.0 * s);
    c.stroke();

    c.begin_path();
    for prong_y in [-7.0, -4.0] {
        c.move_to(ix - 7.0 * s, iy + prong_y * s);
        c.line_to(ix + 4.0 * s, iy + prong_y * s);
    }
    c.stroke();

    for wheel_x in [1.0, -5.5] {
        c.begin_path();
        c.arc(ix + wheel_x * s, iy + 5.0 * s, 2.5 * s, 0.0, TAU);
        c.stroke();
    }

    // Overhead guard
    c.begin_path();
    c.move_to(ix - 2.0 * s, iy - 1.0 * s);
    c.line_to(ix - 2.0 * s, iy - 5.0 * s);
    c.line_to(ix + 3.0 * s, iy - 5.0 * s);
    c.line_to(ix + 3.0 * s, iy - 1.0 * s);
    c.stroke();
}

fn draw_scanner(c: &mut GlyphCanvas, ix: f64, iy: f64, s: f64) {
    c.begin_path();
    c.round_rect(ix - 4.0 * s, iy - 8.0 * s, 7.0 * s, 5.0 * s, 1.5 * s);
    c.stroke();

    c.begin_path();
    c.move_to(ix - 1.0 * s, iy - 3.0 * s);
    c.line_to(ix - 3.0 * s, iy + 4.0 * s);
    c.line_to(ix + 1.0 * s, iy + 5.0 * s);
    c.line_to(ix + 2.0 * s, iy - 1.0 * s);
    c.stroke();

    // Trigger
    c.begin_path();
    c.move_to(ix - 1.0 * s, iy);
    c.line_to(ix - 2.0 * s, iy + 2.5 * s);
    c.stroke();

    c.begin_path();
    for (x, top, bottom) in [(-2.5, -7.0, -4.0), (-0.5, -7.5, -3.5), (1.5, -7.0, -4.0)] {
        c.move_to(ix + x * s, iy + top * s);
        c.line_to(ix + x * s, iy + bottom * s);
    }
    c.stroke();

    // Beam fanning out of the scan head.
    c.begin_path();
    for (from_y, to_y) in [(-7.5, -8.5), (-5.5, -5.5), (-3.5, -2.5)] {
        c.move_to(ix + 3.0 * s, iy + from_y * s);
        c.line_to(ix + 7.0 * s, iy + to_y * s);
    }
    c.stroke();
}

fn draw_clipboard(c: &mut GlyphCanvas, ix: f64, iy: f64, s: f64) {
    c.begin_path();
    c.round_rect(ix - 6.0 * s, iy - 7.0 * s, 12.0 * s, 16.0 * s, 1.5 * s);
    c.stroke();

    c.begin_path();
    c.round_rect(ix - 3.0 * s, iy - 9.5 * s, 6.0 * s, 4.0 * s, 1.5 * s);
    c.stroke();

    for row in 0..3 {
        let ry = iy - 2.0 * s + f64::from(row) * 5.0 * s;

        c.begin_path();
        c.round_rect(ix - 5.0 * s, ry - 1.5 * s, 3.0 * s, 3.0 * s, 0.5 * s);
        c.stroke();

        c.begin_path();
        c.move_to(ix - 4.5 * s, ry);
        c.line_to(ix - 3.5 * s, ry + 1.0 * s);
        c.line_to(ix - 2.5 * s, ry - 1.0 * s);
        c.stroke();

        c.begin_path();
        c.move_to(ix - 1.0 * s, ry);
        c.line_to(ix + 5.0 * s, ry);
        c.stroke();
    }
}

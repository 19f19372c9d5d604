use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::{
        core::SurfaceSize,
        error::{FieldError, FieldResult},
    },
    glyphs::canvas::CoverageMask,
};

/// Fraction of the surface's shorter side an SVG silhouette is fitted into.
pub(crate) const SVG_FIT_FRAC: f64 = 0.8;

pub(crate) fn parse_svg(bytes: &[u8]) -> FieldResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

pub(crate) fn load_svg(path: &Path) -> FieldResult<usvg::Tree> {
    let bytes = std::fs::read(path).with_context(|| format!("read svg '{}'", path.display()))?;
    parse_svg(&bytes)
}

/// Rasterize `tree` centered on the surface, scaled to fit while keeping its aspect ratio.
pub(crate) fn rasterize_svg(tree: &usvg::Tree, size: SurfaceSize) -> FieldResult<CoverageMask> {
    size.to_u16()?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width, size.height)
        .ok_or_else(|| FieldError::raster("failed to allocate svg pixmap"))?;

    let svg_w = f64::from(tree.size().width());
    let svg_h = f64::from(tree.size().height());
    if !(svg_w.is_finite() && svg_h.is_finite()) || svg_w <= 0.0 || svg_h <= 0.0 {
        return Err(FieldError::raster("svg has invalid width/height"));
    }

    let box_side = size.min_side() * SVG_FIT_FRAC;
    let scale = (box_side / svg_w).min(box_side / svg_h);
    let tx = (size.w() - svg_w * scale) / 2.0;
    let ty = (size.h() - svg_h * scale) / 2.0;
    let xform = resvg::tiny_skia::Transform::from_row(
        scale as f32,
        0.0,
        0.0,
        scale as f32,
        tx as f32,
        ty as f32,
    );

    resvg::render(tree, xform, &mut pixmap.as_mut());
    let alpha = pixmap.data().chunks_exact(4).map(|px| px[3]).collect();
    CoverageMask::from_alpha(size.width, size.height, alpha)
}

//! Turning a coverage mask into the design target set particles morph into.
//!
//! Sampling is per pixel rather than along path outlines, so thicker strokes and filled shapes
//! receive proportionally more particles. The candidate list is shuffled before truncation so
//! that every glyph is represented, not just the ones scanned first.

use rand::Rng;
use rayon::prelude::*;

use crate::{
    foundation::{core::Point, core::SurfaceSize, error::FieldResult},
    glyphs::{IconArt, canvas::CoverageMask},
};

/// Default opacity threshold: pixels with alpha strictly above this become candidates.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 40;

/// Maximum jitter, per axis and in either direction, applied to padded duplicates.
pub const PAD_JITTER: f64 = 0.5;

/// Row-major coordinates of every pixel whose alpha exceeds `threshold`.
pub fn scan_candidates(mask: &CoverageMask, threshold: u8) -> Vec<Point> {
    let width = mask.width as usize;
    if width == 0 {
        return Vec::new();
    }
    mask.alpha
        .par_chunks(width)
        .enumerate()
        .flat_map_iter(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(move |&(_, &a)| a > threshold)
                .map(move |(x, _)| Point::new(x as f64, y as f64))
        })
        .collect()
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle_points<R: Rng>(points: &mut [Point], rng: &mut R) {
    for i in (1..points.len()).rev() {
        let j = rng.random_range(0..=i);
        points.swap(i, j);
    }
}

/// Shuffle `candidates`, then truncate or pad them to exactly `count` points.
///
/// Padding cycles through the shuffled candidates in order and jitters each reuse by at most
/// [`PAD_JITTER`] per axis. An empty candidate list stays empty.
pub fn sample_targets<R: Rng>(
    mut candidates: Vec<Point>,
    count: usize,
    rng: &mut R,
) -> Vec<Point> {
    shuffle_points(&mut candidates, rng);
    if candidates.is_empty() {
        return candidates;
    }

    let mut out: Vec<Point> = candidates.iter().take(count).copied().collect();
    let mut pad_idx = 0usize;
    while out.len() < count {
        let src = candidates[pad_idx % candidates.len()];
        out.push(Point::new(
            src.x + (rng.random::<f64>() - 0.5) * 2.0 * PAD_JITTER,
            src.y + (rng.random::<f64>() - 0.5) * 2.0 * PAD_JITTER,
        ));
        pad_idx += 1;
    }
    out
}

/// Rasterize `art` at `size` and sample `count` design target points from it.
#[tracing::instrument(skip(art, rng))]
pub fn generate_design_points<R: Rng>(
    art: &IconArt,
    size: SurfaceSize,
    count: usize,
    threshold: u8,
    rng: &mut R,
) -> FieldResult<Vec<Point>> {
    if art.is_none() {
        return Ok(Vec::new());
    }
    let mask = art.rasterize(size)?;
    let candidates = scan_candidates(&mask, threshold);
    tracing::debug!(candidates = candidates.len(), "sampled icon coverage");
    if candidates.is_empty() {
        tracing::warn!(?art, "icon artwork produced no opaque pixels; morphing disabled");
    }
    Ok(sample_targets(candidates, count, rng))
}

#[cfg(test)]
#[path = "../../tests/unit/sample/targets.rs"]
mod tests;

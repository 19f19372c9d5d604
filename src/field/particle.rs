use rand::Rng;

use crate::foundation::{
    core::{Point, SurfaceSize, Vec2},
    math::phase_for_index,
};

/// Maximum base drift speed magnitude per axis is half of this.
pub(crate) const VELOCITY_SPREAD: f64 = 0.55;

/// One oscillating point mass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Current position.
    pub pos: Point,
    /// Drifting anchor the idle wander orbits around.
    pub base: Point,
    /// Drift velocity of the anchor.
    pub vel: Vec2,
    /// Radius before the draw-time minimum is applied.
    pub size: f64,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
    /// Current idle wander target.
    pub target: Point,
    /// Fixed oscillation phase derived from the particle's slot.
    pub phase: f64,
    /// Eligible to morph into the icon silhouette.
    pub is_design: bool,
}

impl Particle {
    fn spawn<R: Rng>(
        size: SurfaceSize,
        index: usize,
        total: usize,
        is_design: bool,
        rng: &mut R,
    ) -> Self {
        let pos = Point::new(
            rng.random::<f64>() * size.w(),
            rng.random::<f64>() * size.h(),
        );
        let vel = Vec2::new(
            (rng.random::<f64>() - 0.5) * VELOCITY_SPREAD,
            (rng.random::<f64>() - 0.5) * VELOCITY_SPREAD,
        );
        // Design particles are fine dust; background particles a softer, larger haze.
        let radius = if is_design {
            0.8 + rng.random::<f64>() * 0.8
        } else {
            1.3 + rng.random::<f64>() * 2.0
        };
        Self {
            pos,
            base: pos,
            vel,
            size: radius,
            alpha: 0.25 + rng.random::<f64>() * 0.30,
            target: pos,
            phase: phase_for_index(index, total),
            is_design,
        }
    }
}

/// Create `total` particles spread uniformly over `size`; the first `design_count` are design
/// particles.
pub fn spawn_pool<R: Rng>(
    size: SurfaceSize,
    total: usize,
    design_count: usize,
    rng: &mut R,
) -> Vec<Particle> {
    (0..total)
        .map(|i| Particle::spawn(size, i, total, i < design_count, rng))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/field/particle.rs"]
mod tests;

//! Per-tick particle update.
//!
//! Each particle is either idling (wandering around a drifting anchor while its size and
//! opacity "breathe") or morphing (snapping toward its assigned silhouette point). The branch is
//! re-chosen every tick from the hover flag alone; the exponential easing provides all of the
//! visual smoothing between the two.

use crate::foundation::{
    core::{Point, SurfaceSize},
    math::approach,
};

use super::particle::Particle;

/// Idle easing rate toward the wander target.
pub const IDLE_EASE: f64 = 0.016;
/// Morph easing rate toward the silhouette point.
pub const MORPH_EASE: f64 = 0.07;
/// Scale applied to the anchor velocity each idle tick.
pub const DRIFT_SCALE: f64 = 0.22;
/// Easing rate of idle size/alpha breathing.
pub const BREATHE_EASE: f64 = 0.04;
/// Easing rate of morph size/alpha sharpening.
pub const SHARPEN_EASE: f64 = 0.06;
/// Radius morphing particles settle at.
pub const MORPH_SIZE: f64 = 0.9;
/// Opacity morphing particles settle at.
pub const MORPH_ALPHA: f64 = 0.92;
/// Smallest radius ever drawn.
pub const MIN_DRAW_RADIUS: f64 = 0.5;

/// Inputs shared by every particle update within one tick.
#[derive(Clone, Copy, Debug)]
pub struct StepCtx<'a> {
    /// Monotonic tick counter.
    pub tick: u64,
    /// Hover flag as read at the top of this tick.
    pub hovered: bool,
    /// Design target set; may be empty.
    pub targets: &'a [Point],
    /// Surface bounds the anchors bounce inside.
    pub bounds: SurfaceSize,
}

/// Which branch a particle took on a given tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
    /// Wandering around its drifting anchor.
    Idle,
    /// Easing toward its silhouette point.
    Morphing,
}

/// Advance particle `index` by one tick.
pub fn step_particle(p: &mut Particle, index: usize, ctx: &StepCtx<'_>) -> MotionState {
    if ctx.hovered && p.is_design && !ctx.targets.is_empty() {
        let target = ctx.targets[index % ctx.targets.len()];
        step_morph(p, target);
        MotionState::Morphing
    } else {
        step_idle(p, ctx.tick, ctx.bounds);
        MotionState::Idle
    }
}

/// Per-particle wander amplitude, varied so the field does not pulse in unison.
pub fn wander_amplitude(phase: f64) -> f64 {
    18.0 + (phase * 1.7).sin() * 9.0
}

/// Wander target for `p` at `tick`.
pub fn wander_target(p: &Particle, tick: u64) -> Point {
    let t = tick as f64;
    let amp = wander_amplitude(p.phase);
    Point::new(
        p.base.x + (t * 0.007 + p.phase).cos() * amp,
        p.base.y + (t * 0.009 + p.phase).sin() * amp,
    )
}

/// Idle branch: wander, drift the anchor with elastic bounce, and breathe.
pub fn step_idle(p: &mut Particle, tick: u64, bounds: SurfaceSize) {
    p.target = wander_target(p, tick);
    p.pos.x = approach(p.pos.x, p.target.x, IDLE_EASE);
    p.pos.y = approach(p.pos.y, p.target.y, IDLE_EASE);

    drift_anchor(p, bounds);

    let t = tick as f64;
    let breathe_alpha = 0.28 + (t * 0.022 + p.phase).sin() * 0.12;
    p.alpha = approach(p.alpha, breathe_alpha, BREATHE_EASE);
    let breathe_size = 1.4 + (t * 0.017 + p.phase).sin() * 0.5;
    p.size = approach(p.size, breathe_size, BREATHE_EASE);
}

/// Morph branch: ease toward `target` and sharpen.
pub fn step_morph(p: &mut Particle, target: Point) {
    p.pos.x = approach(p.pos.x, target.x, MORPH_EASE);
    p.pos.y = approach(p.pos.y, target.y, MORPH_EASE);
    p.size = approach(p.size, MORPH_SIZE, SHARPEN_EASE);
    p.alpha = approach(p.alpha, MORPH_ALPHA, SHARPEN_EASE);
}

/// Radius actually drawn for `p`.
pub fn draw_radius(p: &Particle) -> f64 {
    p.size.max(MIN_DRAW_RADIUS)
}

fn drift_anchor(p: &mut Particle, bounds: SurfaceSize) {
    let (w, h) = (bounds.w(), bounds.h());
    p.base.x += p.vel.x * DRIFT_SCALE;
    p.base.y += p.vel.y * DRIFT_SCALE;
    if p.base.x < 0.0 || p.base.x > w {
        p.vel.x = -p.vel.x;
    }
    if p.base.y < 0.0 || p.base.y > h {
        p.vel.y = -p.vel.y;
    }
    p.base.x = p.base.x.clamp(0.0, w);
    p.base.y = p.base.y.clamp(0.0, h);
}

#[cfg(test)]
#[path = "../../tests/unit/field/animator.rs"]
mod tests;

//! Pointer-repulsion particle field.
//!
//! Particles rest at random anchors. While the pointer is within `radius`, each nearby particle
//! is pushed away in proportion to its closeness and its own density, and brightens. Once out of
//! reach it glides back to its anchor and fades to its floor opacity.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    foundation::{
        core::{Point, Rgb8, SurfaceSize},
        error::{FieldError, FieldResult},
    },
    runtime::signal::PointerSignal,
    scene::{Dot, InitState, ParticleScene},
};

/// Fraction of the remaining distance to the anchor recovered per tick.
const RETURN_RATE: f64 = 0.1;
/// Opacity gained per tick while repelled.
const BRIGHTEN_STEP: f64 = 0.05;
/// Opacity lost per tick while returning.
const FADE_STEP: f64 = 0.01;
/// Opacity floor while returning.
const ALPHA_FLOOR: f64 = 0.2;

/// Configuration of a [`RepelField`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RepelConfig {
    /// Number of particles.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Particle hue.
    #[serde(default = "default_color")]
    pub color: Rgb8,
    /// Pointer influence radius in pixels.
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// RNG seed; `None` seeds from the OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_count() -> usize {
    800
}

fn default_color() -> Rgb8 {
    Rgb8::new(26, 179, 148)
}

fn default_radius() -> f64 {
    150.0
}

impl Default for RepelConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            color: default_color(),
            radius: default_radius(),
            seed: None,
        }
    }
}

impl RepelConfig {
    /// Return a copy with a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check invariants.
    pub fn validate(&self) -> FieldResult<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(FieldError::validation("repel radius must be finite and > 0"));
        }
        Ok(())
    }
}

/// A particle resting at an anchor, displaced by the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RepelParticle {
    /// Current position.
    pub pos: Point,
    /// Resting anchor.
    pub base: Point,
    /// Drawn radius.
    pub size: f64,
    /// Push strength multiplier.
    pub density: f64,
    /// Opacity in `[ALPHA_FLOOR, 1]` once it has settled.
    pub alpha: f64,
}

/// Advance one particle given the current pointer position.
pub fn step_repel(p: &mut RepelParticle, pointer: Option<Point>, radius: f64) {
    if let Some(m) = pointer {
        let delta = m - p.pos;
        let distance = delta.hypot();
        if distance < radius {
            if distance > 0.0 {
                let force = (radius - distance) / radius;
                p.pos -= delta / distance * force * p.density;
            }
            p.alpha = (p.alpha + BRIGHTEN_STEP).min(1.0);
            return;
        }
    }

    p.pos.x -= (p.pos.x - p.base.x) * RETURN_RATE;
    p.pos.y -= (p.pos.y - p.base.y) * RETURN_RATE;
    p.alpha = (p.alpha - FADE_STEP).max(ALPHA_FLOOR);
}

/// Pointer-repulsion field bound to one surface.
pub struct RepelField {
    config: RepelConfig,
    pointer: PointerSignal,
    rng: StdRng,
    size: Option<SurfaceSize>,
    particles: Vec<RepelParticle>,
}

impl RepelField {
    /// Build a field reading pointer positions from `pointer`.
    pub fn new(config: RepelConfig, pointer: PointerSignal) -> FieldResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            config,
            pointer,
            rng,
            size: None,
            particles: Vec::new(),
        })
    }

    /// Particle pool.
    pub fn particles(&self) -> &[RepelParticle] {
        &self.particles
    }

    fn init(&mut self, size: SurfaceSize) -> InitState {
        self.particles.clear();
        self.size = None;
        if size.is_zero_area() {
            tracing::debug!(?size, "surface has zero area; deferring repel init");
            return InitState::Deferred;
        }
        let rng = &mut self.rng;
        self.particles = (0..self.config.count)
            .map(|_| {
                let pos = Point::new(
                    rng.random::<f64>() * size.w(),
                    rng.random::<f64>() * size.h(),
                );
                RepelParticle {
                    pos,
                    base: pos,
                    size: rng.random::<f64>() * 2.0 + 1.0,
                    density: rng.random::<f64>() * 30.0 + 1.0,
                    alpha: rng.random::<f64>() * 0.5 + 0.2,
                }
            })
            .collect();
        self.size = Some(size);
        tracing::debug!(particles = self.particles.len(), "repel field initialized");
        InitState::Ready
    }
}

impl ParticleScene for RepelField {
    fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    fn is_running(&self) -> bool {
        self.size.is_some()
    }

    fn start(&mut self, size: SurfaceSize) -> FieldResult<InitState> {
        Ok(self.init(size))
    }

    fn resize(&mut self, size: SurfaceSize) -> FieldResult<InitState> {
        if self.size == Some(size) {
            return Ok(InitState::Ready);
        }
        Ok(self.init(size))
    }

    fn step(&mut self) {
        let pointer = self.pointer.get();
        let radius = self.config.radius;
        for p in &mut self.particles {
            step_repel(p, pointer, radius);
        }
    }

    fn stop(&mut self) {
        self.particles.clear();
        self.size = None;
    }

    fn visit_dots(&self, visit: &mut dyn FnMut(Dot)) {
        for p in &self.particles {
            visit(Dot {
                center: p.pos,
                radius: p.size,
                rgba: self.config.color.with_alpha(p.alpha),
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/repel/field.rs"]
mod tests;

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    foundation::{
        core::{Point, SurfaceSize},
        error::FieldResult,
    },
    glyphs::IconArt,
    runtime::signal::HoverSignal,
    sample::targets::generate_design_points,
    scene::{Dot, InitState, ParticleScene},
};

use super::{
    animator::{MotionState, StepCtx, draw_radius, step_particle},
    config::FieldConfig,
    particle::{Particle, spawn_pool},
};

/// Lifecycle of a [`ParticleField`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldState {
    /// Constructed, never started.
    Idle,
    /// Waiting for a surface with non-zero area.
    Deferred,
    /// Pool and targets exist; ticks advance them.
    Running,
    /// Torn down by [`ParticleField::stop`].
    Stopped,
}

/// Summary of one [`ParticleField::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Tick counter after the step.
    pub tick: u64,
    /// Particles that took the morphing branch this tick.
    pub morphing: usize,
}

/// An icon-morphing particle field bound to one surface.
///
/// The engine owns its pool, design target set, tick counter and RNG. The hover flag is shared
/// with the host, which writes it; the engine only reads it, once per tick.
pub struct ParticleField {
    config: FieldConfig,
    art: IconArt,
    hover: HoverSignal,
    rng: StdRng,
    state: FieldState,
    size: Option<SurfaceSize>,
    particles: Vec<Particle>,
    targets: Vec<Point>,
    tick: u64,
}

impl ParticleField {
    /// Build a field from a config whose artwork needs no external files (or resolves
    /// relative to the working directory).
    pub fn new(config: FieldConfig, hover: HoverSignal) -> FieldResult<Self> {
        let art = IconArt::load(&config.icons, std::path::Path::new("."))?;
        Self::with_art(config, art, hover)
    }

    /// Build a field with already-loaded artwork.
    pub fn with_art(config: FieldConfig, art: IconArt, hover: HoverSignal) -> FieldResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            config,
            art,
            hover,
            rng,
            state: FieldState::Idle,
            size: None,
            particles: Vec::new(),
            targets: Vec::new(),
            tick: 0,
        })
    }

    /// Configuration this field was built with.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> FieldState {
        self.state
    }

    /// Particle pool, in index order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Design target set for the current surface size.
    pub fn targets(&self) -> &[Point] {
        &self.targets
    }

    /// Ticks elapsed since construction.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Shared hover flag.
    pub fn hover(&self) -> &HoverSignal {
        &self.hover
    }

    /// Generate pool and target set for `size` and start running.
    #[tracing::instrument(skip(self), fields(icons = ?self.art))]
    pub fn start(&mut self, size: SurfaceSize) -> FieldResult<InitState> {
        self.init(size)
    }

    /// Regenerate everything for a new surface size.
    ///
    /// A running field resized to its current size is left untouched.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, size: SurfaceSize) -> FieldResult<InitState> {
        if self.state == FieldState::Running && self.size == Some(size) {
            return Ok(InitState::Ready);
        }
        self.init(size)
    }

    /// Drop the pool and target set.
    pub fn stop(&mut self) {
        self.particles.clear();
        self.targets.clear();
        self.size = None;
        self.state = FieldState::Stopped;
    }

    /// Advance every particle by one tick. Does nothing unless running.
    pub fn step(&mut self) -> StepReport {
        if self.state != FieldState::Running {
            return StepReport {
                tick: self.tick,
                morphing: 0,
            };
        }
        let Some(bounds) = self.size else {
            return StepReport::default();
        };

        self.tick += 1;
        let ctx = StepCtx {
            tick: self.tick,
            hovered: self.hover.get(),
            targets: &self.targets,
            bounds,
        };
        let mut morphing = 0;
        for (i, p) in self.particles.iter_mut().enumerate() {
            if step_particle(p, i, &ctx) == MotionState::Morphing {
                morphing += 1;
            }
        }
        StepReport {
            tick: self.tick,
            morphing,
        }
    }

    fn init(&mut self, size: SurfaceSize) -> FieldResult<InitState> {
        self.particles.clear();
        self.targets.clear();
        self.size = None;

        if size.is_zero_area() {
            tracing::debug!(?size, "surface has zero area; deferring particle init");
            self.state = FieldState::Deferred;
            return Ok(InitState::Deferred);
        }

        // Leave the field idle rather than half-initialized if rasterization fails.
        self.state = FieldState::Idle;
        let targets = generate_design_points(
            &self.art,
            size,
            self.config.design_count,
            self.config.alpha_threshold,
            &mut self.rng,
        )?;
        self.particles = spawn_pool(
            size,
            self.config.total,
            self.config.design_count,
            &mut self.rng,
        );
        self.targets = targets;
        self.size = Some(size);
        self.state = FieldState::Running;
        tracing::debug!(
            particles = self.particles.len(),
            targets = self.targets.len(),
            width = size.width,
            height = size.height,
            "particle field initialized"
        );
        Ok(InitState::Ready)
    }
}

impl ParticleScene for ParticleField {
    fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    fn is_running(&self) -> bool {
        self.state == FieldState::Running
    }

    fn start(&mut self, size: SurfaceSize) -> FieldResult<InitState> {
        ParticleField::start(self, size)
    }

    fn resize(&mut self, size: SurfaceSize) -> FieldResult<InitState> {
        ParticleField::resize(self, size)
    }

    fn step(&mut self) {
        ParticleField::step(self);
    }

    fn stop(&mut self) {
        ParticleField::stop(self);
    }

    fn visit_dots(&self, visit: &mut dyn FnMut(Dot)) {
        let color = self.config.color;
        for p in &self.particles {
            visit(Dot {
                center: p.pos,
                radius: draw_radius(p),
                rgba: color.with_alpha(p.alpha),
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/engine.rs"]
mod tests;

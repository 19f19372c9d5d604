//! Particle fields that morph into icon silhouettes.
//!
//! A field owns a pool of drifting, breathing particles bound to one surface. Icon artwork is
//! rasterized off-screen at the surface size and its opaque pixels are sampled into a fixed set of
//! design target points. While the host's hover flag is set, design-eligible particles ease onto
//! those targets and sharpen; otherwise every particle wanders around its drifting anchor.
//!
//! # Pipeline overview
//!
//! 1. **Rasterize**: `IconArt + SurfaceSize -> CoverageMask` (off-screen glyph canvas)
//! 2. **Sample**: `CoverageMask -> Vec<Point>` (threshold, shuffle, truncate or pad to a count)
//! 3. **Animate**: `ParticleField::step` advances every particle by one tick
//! 4. **Render**: `ParticleScene -> FrameRGBA` (CPU backend, one filled circle per particle)
//!
//! [`FrameLoop`] ties these together against a host [`FieldSurface`], deferring initialization
//! while the surface has zero area and regenerating the pool whenever its size changes.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Decorative**: the frame loop never surfaces an error to its host; failures end the loop.
//! - **Deterministic when seeded**: a config `seed` fixes pool layout and target sampling.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod field;
mod foundation;
mod glyphs;
mod render;
mod repel;
mod runtime;
mod sample;

pub mod scene;

pub use field::animator::{
    BREATHE_EASE, DRIFT_SCALE, IDLE_EASE, MIN_DRAW_RADIUS, MORPH_ALPHA, MORPH_EASE, MORPH_SIZE,
    MotionState, SHARPEN_EASE, StepCtx, draw_radius, step_idle, step_morph, step_particle,
    wander_amplitude, wander_target,
};
pub use field::config::FieldConfig;
pub use field::engine::{FieldState, ParticleField, StepReport};
pub use field::particle::{Particle, spawn_pool};
pub use foundation::core::{BezPath, Point, Rect, Rgb8, SurfaceSize, Vec2};
pub use foundation::error::{FieldError, FieldResult};
pub use glyphs::canvas::{CoverageMask, GlyphCanvas};
pub use glyphs::{IconArt, IconSet};
pub use render::backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
pub use render::cpu::CpuRenderer;
pub use repel::{RepelConfig, RepelField, RepelParticle, step_repel};
pub use runtime::clock::{DEFAULT_FRAME_RATE_HZ, FrameClock, IntervalClock, ManualClock};
pub use runtime::frame_loop::{
    FieldSurface, FrameLoop, LoopExit, LoopOpts, LoopStats, MemorySurface,
};
pub use runtime::signal::{CancelToken, HoverSignal, PointerSignal};
pub use sample::targets::{
    DEFAULT_ALPHA_THRESHOLD, PAD_JITTER, generate_design_points, sample_targets, scan_candidates,
    shuffle_points,
};
pub use scene::{Dot, InitState, ParticleScene, SceneConfig, SceneSignals};

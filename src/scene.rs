//! The seam between particle engines, the frame loop and renderers.

use std::path::Path;

use crate::{
    field::{config::FieldConfig, engine::ParticleField},
    foundation::{
        core::{Point, SurfaceSize},
        error::FieldResult,
    },
    glyphs::IconArt,
    repel::{RepelConfig, RepelField},
    runtime::signal::{HoverSignal, PointerSignal},
};

/// Outcome of (re)initializing a scene against a measured surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitState {
    /// The pool was (re)generated; the scene is running.
    Ready,
    /// The surface has zero area; initialization must be retried later.
    Deferred,
}

/// One filled circle to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    /// Circle center in surface pixels.
    pub center: Point,
    /// Circle radius in pixels.
    pub radius: f64,
    /// Straight-alpha RGBA8 fill.
    pub rgba: [u8; 4],
}

/// A particle engine bound to one rendering surface.
pub trait ParticleScene {
    /// Surface size the current pool was generated for, if running.
    fn size(&self) -> Option<SurfaceSize>;

    /// Return `true` while a pool exists and ticks advance it.
    fn is_running(&self) -> bool;

    /// Generate the pool for `size` and begin running.
    fn start(&mut self, size: SurfaceSize) -> FieldResult<InitState>;

    /// Replace the pool for a new surface size. Same-size calls on a running scene are no-ops.
    fn resize(&mut self, size: SurfaceSize) -> FieldResult<InitState>;

    /// Advance every particle by one tick.
    fn step(&mut self);

    /// Tear down the pool; further ticks do nothing until the next `start`.
    fn stop(&mut self);

    /// Visit every particle as a drawable dot, in pool order.
    fn visit_dots(&self, visit: &mut dyn FnMut(Dot));
}

/// Serializable choice of scene, as accepted by config files.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneConfig {
    /// Icon-morphing particle field.
    Morph(FieldConfig),
    /// Pointer-repulsion particle field.
    Repel(RepelConfig),
}

/// Host-side handles for driving a scene's interaction inputs.
#[derive(Clone, Debug, Default)]
pub struct SceneSignals {
    /// Hover flag read by morph scenes.
    pub hover: HoverSignal,
    /// Pointer position read by repel scenes.
    pub pointer: PointerSignal,
}

impl SceneConfig {
    /// Read a scene config file. External artwork resolves relative to the file's directory.
    pub fn from_path(path: &Path) -> FieldResult<Self> {
        use anyhow::Context as _;

        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read scene config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&s)
            .map_err(|e| crate::foundation::error::FieldError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the wrapped config's invariants.
    pub fn validate(&self) -> FieldResult<()> {
        match self {
            Self::Morph(cfg) => cfg.validate(),
            Self::Repel(cfg) => cfg.validate(),
        }
    }

    /// Build the engine this config describes, wired to `signals`.
    pub fn build(
        &self,
        assets_root: &Path,
        signals: &SceneSignals,
    ) -> FieldResult<Box<dyn ParticleScene>> {
        Ok(match self {
            Self::Morph(cfg) => {
                let art = IconArt::load(&cfg.icons, assets_root)?;
                Box::new(ParticleField::with_art(
                    cfg.clone(),
                    art,
                    signals.hover.clone(),
                )?)
            }
            Self::Repel(cfg) => Box::new(RepelField::new(cfg.clone(), signals.pointer.clone())?),
        })
    }
}

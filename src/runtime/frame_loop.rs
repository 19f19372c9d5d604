//! Cooperative single-threaded animation loop.
//!
//! One iteration is one display frame: measure the surface, regenerate the scene if the surface
//! changed, step every particle, render, present, then wait for the next frame. Ticks never
//! overlap, and a resize replaces the pool before the next step so no particle generated for the
//! old size is ever drawn against the new one.

use std::time::Duration;

use crate::{
    field::config::FieldConfig,
    foundation::{core::SurfaceSize, error::FieldResult},
    render::backend::{FrameRGBA, RenderBackend},
    runtime::{clock::FrameClock, signal::CancelToken},
    scene::{InitState, ParticleScene, SceneConfig},
};

/// Host surface a [`FrameLoop`] draws onto.
pub trait FieldSurface {
    /// Current measured size, or `None` if the surface can no longer be drawn to.
    fn size(&self) -> Option<SurfaceSize>;

    /// Show one finished frame.
    fn present(&mut self, frame: &FrameRGBA) -> FieldResult<()>;
}

/// Fixed-size surface that keeps every presented frame. Useful for tests and offline renders.
#[derive(Debug, Default)]
pub struct MemorySurface {
    size: Option<SurfaceSize>,
    frames: Vec<FrameRGBA>,
}

impl MemorySurface {
    /// Surface of the given size.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size: Some(size),
            frames: Vec::new(),
        }
    }

    /// Change the measured size seen by the next loop iteration.
    pub fn set_size(&mut self, size: Option<SurfaceSize>) {
        self.size = size;
    }

    /// Frames presented so far, oldest first.
    pub fn frames(&self) -> &[FrameRGBA] {
        &self.frames
    }
}

impl FieldSurface for MemorySurface {
    fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    fn present(&mut self, frame: &FrameRGBA) -> FieldResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

/// Options for [`FrameLoop`].
#[derive(Clone, Debug)]
pub struct LoopOpts {
    /// Back-off before retrying initialization against a zero-area surface.
    pub init_retry: Duration,
    /// Stop after this many presented frames. `None` runs until cancelled.
    pub max_frames: Option<u64>,
    /// Give up after this many consecutive deferred initializations. `None` waits forever,
    /// which suits a live host whose surface will eventually be laid out.
    pub max_deferrals: Option<u64>,
}

impl Default for LoopOpts {
    fn default() -> Self {
        Self {
            init_retry: Duration::from_millis(100),
            max_frames: None,
            max_deferrals: None,
        }
    }
}

impl LoopOpts {
    /// Options taking the init back-off from a morph field config.
    pub fn for_field(config: &FieldConfig) -> Self {
        Self {
            init_retry: Duration::from_millis(config.init_retry_ms),
            ..Self::default()
        }
    }

    /// Options matching whichever scene `config` describes.
    pub fn for_scene(config: &SceneConfig) -> Self {
        match config {
            SceneConfig::Morph(cfg) => Self::for_field(cfg),
            SceneConfig::Repel(_) => Self::default(),
        }
    }
}

/// Why a [`FrameLoop::run`] returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoopExit {
    /// The cancel token fired.
    Cancelled,
    /// The surface reported no size, or stayed zero-area past `max_deferrals`; the loop
    /// declined to (continue to) draw.
    SurfaceUnavailable,
    /// `max_frames` frames were presented.
    FrameLimit,
    /// Initialization, rendering or presentation failed. The message was logged.
    Failed(String),
}

/// Counters for one [`FrameLoop::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopStats {
    /// Frames presented.
    pub frames: u64,
    /// Successful regenerations at a size different from the previous ready size.
    pub resizes: u64,
    /// Initialization attempts deferred because the surface had zero area.
    pub deferred_inits: u64,
    /// Exit reason.
    pub exit: LoopExit,
}

#[derive(Default)]
struct Tally {
    frames: u64,
    resizes: u64,
    deferred_inits: u64,
}

/// Drives a [`ParticleScene`] frame by frame until cancelled.
pub struct FrameLoop<C: FrameClock> {
    clock: C,
    cancel: CancelToken,
    opts: LoopOpts,
}

impl<C: FrameClock> FrameLoop<C> {
    /// Loop paced by `clock`, stopped by `cancel`.
    pub fn new(clock: C, cancel: CancelToken, opts: LoopOpts) -> Self {
        Self {
            clock,
            cancel,
            opts,
        }
    }

    /// The pacing clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run until cancelled, out of frames, or the surface goes away.
    ///
    /// Failures never escape: the scene is decorative, so any error is logged and ends the loop
    /// with [`LoopExit::Failed`]. The scene is stopped on every exit path.
    pub fn run(
        &mut self,
        scene: &mut dyn ParticleScene,
        surface: &mut dyn FieldSurface,
        renderer: &mut dyn RenderBackend,
    ) -> LoopStats {
        let mut tally = Tally::default();
        let exit = self.drive(scene, surface, renderer, &mut tally);
        scene.stop();
        tracing::debug!(
            frames = tally.frames,
            resizes = tally.resizes,
            deferred = tally.deferred_inits,
            ?exit,
            "frame loop finished"
        );
        LoopStats {
            frames: tally.frames,
            resizes: tally.resizes,
            deferred_inits: tally.deferred_inits,
            exit,
        }
    }

    fn drive(
        &mut self,
        scene: &mut dyn ParticleScene,
        surface: &mut dyn FieldSurface,
        renderer: &mut dyn RenderBackend,
        tally: &mut Tally,
    ) -> LoopExit {
        let mut ready_size: Option<SurfaceSize> = None;
        let mut deferral_streak = 0u64;
        loop {
            if self.cancel.is_cancelled() {
                return LoopExit::Cancelled;
            }
            if self.opts.max_frames.is_some_and(|max| tally.frames >= max) {
                return LoopExit::FrameLimit;
            }
            let Some(size) = surface.size() else {
                tracing::warn!("rendering surface unavailable; not drawing");
                return LoopExit::SurfaceUnavailable;
            };

            if !scene.is_running() || scene.size() != Some(size) {
                let init = if scene.is_running() {
                    scene.resize(size)
                } else {
                    scene.start(size)
                };
                match init {
                    Ok(InitState::Ready) => {
                        if ready_size.is_some_and(|prev| prev != size) {
                            tally.resizes += 1;
                        }
                        ready_size = Some(size);
                        deferral_streak = 0;
                    }
                    Ok(InitState::Deferred) => {
                        if deferral_streak == 0 {
                            tracing::warn!(?size, "surface has zero area; deferring init");
                        }
                        deferral_streak += 1;
                        tally.deferred_inits += 1;
                        if self
                            .opts
                            .max_deferrals
                            .is_some_and(|max| deferral_streak >= max)
                        {
                            tracing::warn!(
                                deferrals = deferral_streak,
                                "surface never got a usable size; not drawing"
                            );
                            return LoopExit::SurfaceUnavailable;
                        }
                        self.clock.sleep(self.opts.init_retry);
                        continue;
                    }
                    Err(e) => return failed("scene initialization", e),
                }
            }

            scene.step();
            let frame = match renderer.render_scene(scene, size) {
                Ok(frame) => frame,
                Err(e) => return failed("render", e),
            };
            if let Err(e) = surface.present(&frame) {
                return failed("present", e);
            }
            tally.frames += 1;
            self.clock.wait_frame();
        }
    }
}

fn failed(stage: &str, e: crate::foundation::error::FieldError) -> LoopExit {
    tracing::warn!(stage, error = %e, "particle animation stopped");
    LoopExit::Failed(format!("{stage}: {e}"))
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/frame_loop.rs"]
mod tests;

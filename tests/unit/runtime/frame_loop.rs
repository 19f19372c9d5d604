use std::cell::Cell;

use super::*;
use crate::{
    field::{
        config::FieldConfig,
        engine::{FieldState, ParticleField},
    },
    foundation::error::FieldError,
    render::{backend::RenderSettings, cpu::CpuRenderer},
    runtime::{clock::ManualClock, signal::HoverSignal},
};

/// Reports `sizes[i]` on the i-th measurement, repeating the last entry afterwards.
struct ScriptedSurface {
    sizes: Vec<Option<SurfaceSize>>,
    calls: Cell<usize>,
    presented: Vec<(u32, u32)>,
}

impl ScriptedSurface {
    fn new(sizes: Vec<Option<SurfaceSize>>) -> Self {
        Self {
            sizes,
            calls: Cell::new(0),
            presented: Vec::new(),
        }
    }
}

impl FieldSurface for ScriptedSurface {
    fn size(&self) -> Option<SurfaceSize> {
        let i = self.calls.get();
        self.calls.set(i + 1);
        self.sizes[i.min(self.sizes.len() - 1)]
    }

    fn present(&mut self, frame: &FrameRGBA) -> FieldResult<()> {
        self.presented.push((frame.width, frame.height));
        Ok(())
    }
}

struct BrokenRenderer;

impl RenderBackend for BrokenRenderer {
    fn render_scene(
        &mut self,
        _scene: &dyn ParticleScene,
        _size: SurfaceSize,
    ) -> FieldResult<FrameRGBA> {
        Err(FieldError::raster("device lost"))
    }
}

fn small_field() -> ParticleField {
    let mut cfg = FieldConfig::architecture().with_seed(3);
    cfg.total = 200;
    cfg.design_count = 150;
    ParticleField::new(cfg, HoverSignal::new()).unwrap()
}

fn looper(max_frames: u64) -> FrameLoop<ManualClock> {
    FrameLoop::new(
        ManualClock::new(Duration::from_millis(16)),
        CancelToken::new(),
        LoopOpts {
            init_retry: Duration::from_millis(100),
            max_frames: Some(max_frames),
            max_deferrals: Some(50),
        },
    )
}

fn renderer() -> CpuRenderer {
    CpuRenderer::new(RenderSettings::default())
}

#[test]
fn presents_requested_frames_then_stops_scene() {
    let mut field = small_field();
    let mut surface = MemorySurface::new(SurfaceSize::new(40, 30));
    let mut lp = looper(3);

    let stats = lp.run(&mut field, &mut surface, &mut renderer());

    assert_eq!(stats.exit, LoopExit::FrameLimit);
    assert_eq!(stats.frames, 3);
    assert_eq!(stats.resizes, 0);
    assert_eq!(surface.frames().len(), 3);
    assert_eq!(lp.clock().frames(), 3);
    assert_eq!(field.state(), FieldState::Stopped);
    assert_eq!(field.tick(), 3);
}

#[test]
fn zero_area_surface_defers_with_fixed_backoff() {
    let zero = Some(SurfaceSize::new(0, 0));
    let ready = Some(SurfaceSize::new(32, 32));
    let mut surface = ScriptedSurface::new(vec![zero, zero, ready]);
    let mut field = small_field();
    let mut lp = looper(2);

    let stats = lp.run(&mut field, &mut surface, &mut renderer());

    assert_eq!(stats.exit, LoopExit::FrameLimit);
    assert_eq!(stats.deferred_inits, 2);
    assert_eq!(stats.frames, 2);
    assert_eq!(lp.clock().sleeps(), 2);
    assert_eq!(
        lp.clock().elapsed(),
        Duration::from_millis(2 * 100 + 2 * 16)
    );
    assert_eq!(surface.presented, vec![(32, 32), (32, 32)]);
}

#[test]
fn resize_regenerates_before_next_draw() {
    let a = Some(SurfaceSize::new(40, 30));
    let b = Some(SurfaceSize::new(24, 48));
    let mut surface = ScriptedSurface::new(vec![a, a, b]);
    let mut field = small_field();
    let mut lp = looper(4);

    let stats = lp.run(&mut field, &mut surface, &mut renderer());

    assert_eq!(stats.resizes, 1);
    assert_eq!(stats.frames, 4);
    assert_eq!(
        surface.presented,
        vec![(40, 30), (40, 30), (24, 48), (24, 48)]
    );
}

#[test]
fn unavailable_surface_declines_to_start() {
    let mut surface = ScriptedSurface::new(vec![None]);
    let mut field = small_field();
    let stats = looper(10).run(&mut field, &mut surface, &mut renderer());
    assert_eq!(stats.exit, LoopExit::SurfaceUnavailable);
    assert_eq!(stats.frames, 0);
    assert_eq!(field.state(), FieldState::Stopped);
}

#[test]
fn cancelled_token_exits_before_first_tick() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let mut lp = FrameLoop::new(ManualClock::default(), cancel, LoopOpts::default());
    let mut field = small_field();
    let mut surface = MemorySurface::new(SurfaceSize::new(16, 16));

    let stats = lp.run(&mut field, &mut surface, &mut renderer());

    assert_eq!(stats.exit, LoopExit::Cancelled);
    assert_eq!(stats.frames, 0);
    assert_eq!(field.tick(), 0);
}

#[test]
fn render_failure_is_logged_not_propagated() {
    let mut field = small_field();
    let mut surface = MemorySurface::new(SurfaceSize::new(16, 16));
    let stats = looper(5).run(&mut field, &mut surface, &mut BrokenRenderer);

    match stats.exit {
        LoopExit::Failed(msg) => assert!(msg.contains("device lost"), "{msg}"),
        other => panic!("unexpected exit: {other:?}"),
    }
    assert!(surface.frames().is_empty());
    assert_eq!(field.state(), FieldState::Stopped);
}

#[test]
fn surface_disappearing_mid_run_ends_loop() {
    let a = Some(SurfaceSize::new(20, 20));
    let mut surface = ScriptedSurface::new(vec![a, a, None]);
    let mut field = small_field();
    let stats = looper(10).run(&mut field, &mut surface, &mut renderer());
    assert_eq!(stats.exit, LoopExit::SurfaceUnavailable);
    assert_eq!(stats.frames, 2);
}

#[test]
fn surface_that_never_lays_out_gives_up_after_max_deferrals() {
    let mut field = small_field();
    let mut surface = MemorySurface::new(SurfaceSize::new(0, 0));
    let mut lp = FrameLoop::new(
        ManualClock::default(),
        CancelToken::new(),
        LoopOpts {
            max_frames: Some(3),
            max_deferrals: Some(3),
            ..LoopOpts::default()
        },
    );

    let stats = lp.run(&mut field, &mut surface, &mut renderer());

    assert_eq!(stats.exit, LoopExit::SurfaceUnavailable);
    assert_eq!(stats.frames, 0);
    assert_eq!(stats.deferred_inits, 3);
    assert_eq!(lp.clock().sleeps(), 2);
    assert!(surface.frames().is_empty());
}

#[test]
fn deferral_budget_resets_once_the_surface_lays_out() {
    let zero = Some(SurfaceSize::new(0, 0));
    let a = Some(SurfaceSize::new(20, 20));
    let mut surface = ScriptedSurface::new(vec![zero, zero, a, zero, zero, a]);
    let mut field = small_field();
    let mut lp = FrameLoop::new(
        ManualClock::default(),
        CancelToken::new(),
        LoopOpts {
            max_frames: Some(2),
            max_deferrals: Some(3),
            ..LoopOpts::default()
        },
    );

    let stats = lp.run(&mut field, &mut surface, &mut renderer());

    assert_eq!(stats.exit, LoopExit::FrameLimit);
    assert_eq!(stats.deferred_inits, 4);
    assert_eq!(stats.frames, 2);
}

#[test]
fn resize_count_skips_deferrals_and_counts_restart_at_new_size() {
    let zero = Some(SurfaceSize::new(0, 0));
    let a = Some(SurfaceSize::new(40, 30));
    let b = Some(SurfaceSize::new(24, 48));
    let mut surface = ScriptedSurface::new(vec![a, a, zero, zero, b]);
    let mut field = small_field();

    let stats = looper(3).run(&mut field, &mut surface, &mut renderer());

    assert_eq!(stats.deferred_inits, 2);
    assert_eq!(stats.resizes, 1);
    assert_eq!(surface.presented, vec![(40, 30), (40, 30), (24, 48)]);
}

#[test]
fn restart_at_same_size_after_deferral_is_not_a_resize() {
    let zero = Some(SurfaceSize::new(0, 0));
    let a = Some(SurfaceSize::new(32, 32));
    let mut surface = ScriptedSurface::new(vec![a, zero, a]);
    let mut field = small_field();

    let stats = looper(2).run(&mut field, &mut surface, &mut renderer());

    assert_eq!(stats.deferred_inits, 1);
    assert_eq!(stats.resizes, 0);
    assert_eq!(stats.frames, 2);
}

#[test]
fn loop_opts_take_init_retry_from_field_config() {
    let cfg = FieldConfig {
        init_retry_ms: 250,
        ..FieldConfig::supplier()
    };
    assert_eq!(LoopOpts::for_field(&cfg).init_retry, Duration::from_millis(250));
    assert_eq!(
        LoopOpts::for_scene(&SceneConfig::Morph(cfg)).init_retry,
        Duration::from_millis(250)
    );
    let repel = LoopOpts::for_scene(&SceneConfig::Repel(crate::repel::RepelConfig::default()));
    assert_eq!(repel.init_retry, LoopOpts::default().init_retry);
    assert_eq!(repel.max_frames, None);
}

#[test]
fn configured_init_retry_paces_deferrals() {
    let mut cfg = FieldConfig::architecture().with_seed(3);
    cfg.total = 50;
    cfg.design_count = 10;
    cfg.init_retry_ms = 40;
    let opts = LoopOpts {
        max_frames: Some(1),
        ..LoopOpts::for_field(&cfg)
    };
    let mut field = ParticleField::new(cfg, HoverSignal::new()).unwrap();
    let zero = Some(SurfaceSize::new(0, 0));
    let mut surface = ScriptedSurface::new(vec![zero, zero, Some(SurfaceSize::new(16, 16))]);
    let mut lp = FrameLoop::new(ManualClock::new(Duration::ZERO), CancelToken::new(), opts);

    let stats = lp.run(&mut field, &mut surface, &mut renderer());

    assert_eq!(stats.frames, 1);
    assert_eq!(lp.clock().elapsed(), Duration::from_millis(80));
}

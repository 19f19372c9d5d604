use super::*;
use crate::foundation::core::Vec2;

fn particle_at(x: f64, y: f64, is_design: bool) -> Particle {
    Particle {
        pos: Point::new(x, y),
        base: Point::new(x, y),
        vel: Vec2::new(0.1, 0.1),
        size: 1.0,
        alpha: 0.3,
        target: Point::new(x, y),
        phase: 0.5,
        is_design,
    }
}

fn bounds() -> SurfaceSize {
    SurfaceSize::new(200, 200)
}

#[test]
fn idle_easing_is_a_contraction_toward_a_fixed_target() {
    let mut p = particle_at(100.0, 100.0, true);
    p.vel = Vec2::ZERO;
    p.pos = Point::new(10.0, 190.0);
    let tick = 40;
    let target = wander_target(&p, tick);
    let mut prev = (p.pos.x - target.x).abs();
    for _ in 0..200 {
        step_idle(&mut p, tick, bounds());
        let d = (p.pos.x - target.x).abs();
        assert!(d < prev, "d={d} prev={prev}");
        prev = d;
    }
}

#[test]
fn morph_easing_converges_within_bounded_ticks() {
    let mut p = particle_at(0.0, 0.0, true);
    let target = Point::new(150.0, 80.0);
    let mut ticks = 0;
    while (p.pos - target).hypot() >= 0.01 {
        step_morph(&mut p, target);
        ticks += 1;
        assert!(ticks < 200, "did not converge");
    }
    // 1% residual after ~64 ticks at a 0.07 rate.
    let mut q = particle_at(0.0, 0.0, true);
    for _ in 0..64 {
        step_morph(&mut q, target);
    }
    assert!((q.pos - target).hypot() <= 0.01 * target.to_vec2().hypot());
    assert!((p.size - MORPH_SIZE).abs() < 0.1);
}

#[test]
fn boundary_bounce_flips_velocity_and_clamps() {
    let mut p = particle_at(0.0, 50.0, false);
    p.vel = Vec2::new(-1.0, 0.0);
    step_idle(&mut p, 0, bounds());
    assert!(p.vel.x > 0.0);
    assert!((0.0..=200.0).contains(&p.base.x));

    let mut q = particle_at(100.0, 200.0, false);
    q.vel = Vec2::new(0.0, 1.0);
    step_idle(&mut q, 0, bounds());
    assert!(q.vel.y < 0.0);
    assert_eq!(q.base.y, 200.0);
}

#[test]
fn branch_selection_follows_hover_and_design_flag() {
    let targets = [Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
    let hovered = StepCtx {
        tick: 1,
        hovered: true,
        targets: &targets,
        bounds: bounds(),
    };
    let idle = StepCtx {
        hovered: false,
        ..hovered
    };
    let no_targets = StepCtx {
        targets: &[],
        ..hovered
    };

    let mut design = particle_at(50.0, 50.0, true);
    let mut background = particle_at(50.0, 50.0, false);
    assert_eq!(step_particle(&mut design, 0, &hovered), MotionState::Morphing);
    assert_eq!(step_particle(&mut background, 0, &hovered), MotionState::Idle);
    assert_eq!(step_particle(&mut design, 0, &idle), MotionState::Idle);
    assert_eq!(step_particle(&mut design, 0, &no_targets), MotionState::Idle);
}

#[test]
fn target_assignment_wraps_modulo_set_length() {
    let targets = [Point::new(10.0, 10.0), Point::new(90.0, 90.0)];
    let ctx = StepCtx {
        tick: 0,
        hovered: true,
        targets: &targets,
        bounds: bounds(),
    };
    let mut p = particle_at(50.0, 50.0, true);
    for _ in 0..500 {
        step_particle(&mut p, 5, &ctx);
    }
    assert!((p.pos - targets[1]).hypot() < 0.01);
}

#[test]
fn draw_radius_has_a_floor() {
    let mut p = particle_at(0.0, 0.0, true);
    p.size = 0.1;
    assert_eq!(draw_radius(&p), MIN_DRAW_RADIUS);
    p.size = 2.0;
    assert_eq!(draw_radius(&p), 2.0);
}

#[test]
fn idle_breathing_keeps_alpha_in_range() {
    let mut p = particle_at(100.0, 100.0, true);
    for tick in 0..2_000 {
        step_idle(&mut p, tick, bounds());
        assert!((0.0..=1.0).contains(&p.alpha));
        assert!(p.size > 0.0);
    }
}

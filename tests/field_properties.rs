//! Property tests for the particle field, driven through the headless host.

use glam::Vec2;
use particle_field::platform::HeadlessHost;
use particle_field::renderer::{DrawCommand, RecordingSurface, Rgba};
use particle_field::sim::{FieldState, Particle, tick};
use particle_field::{Engine, EnginePhase, FieldSettings};
use proptest::prelude::*;

const FRAME_MS: f64 = 16.0;

fn engine(width: u32, height: u32, seed: u64) -> Engine<HeadlessHost> {
    Engine::new(HeadlessHost::new(width, height), FieldSettings::default(), seed)
        .expect("default settings are valid")
}

fn expected_count(width: u32, height: u32) -> usize {
    ((width as u64 * height as u64) / 9000).min(100) as usize
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn particle_count_follows_area(width in 0u32..4000, height in 0u32..3000, seed: u64) {
        let mut engine = engine(width, height, seed);
        engine.attach();
        prop_assert_eq!(engine.field().particles.len(), expected_count(width, height));
    }

    #[test]
    fn positions_stay_on_surface(
        width in 1u32..1200,
        height in 1u32..900,
        seed: u64,
        pointer in (0f32..1200.0, 0f32..900.0),
    ) {
        let mut engine = engine(width, height, seed);
        engine.attach();

        for i in 0..120 {
            let now = i as f64 * FRAME_MS;
            if i % 3 == 0 {
                engine.handle_pointer_move(pointer.0, pointer.1, now);
            }
            engine.step_headless(now);

            for p in &engine.field().particles {
                prop_assert!(p.pos.x >= 0.0 && p.pos.x < width as f32, "x = {}", p.pos.x);
                prop_assert!(p.pos.y >= 0.0 && p.pos.y < height as f32, "y = {}", p.pos.y);
            }
        }
    }

    #[test]
    fn pairs_link_at_most_once(seed: u64) {
        let mut engine = engine(1024, 768, seed);
        engine.attach();
        engine.step_headless(0.0);

        let mut seen = Vec::new();
        for cmd in engine.host().recording().lines() {
            if let DrawCommand::Line { from, to, color, .. } = cmd {
                prop_assert!(color.a > 0.0 && color.a <= 0.2);
                prop_assert!(from.distance(*to) < 120.0);
                let key = (from.x.to_bits(), from.y.to_bits(), to.x.to_bits(), to.y.to_bits());
                let reversed = (key.2, key.3, key.0, key.1);
                prop_assert!(!seen.contains(&key) && !seen.contains(&reversed));
                seen.push(key);
            }
        }
    }

    #[test]
    fn resize_replaces_everything(
        from in (100u32..2000, 100u32..2000),
        to in (0u32..2000, 0u32..2000),
        seed: u64,
    ) {
        let mut engine = engine(from.0, from.1, seed);
        engine.attach();
        let old_ids: Vec<u32> = engine.field().particles.iter().map(|p| p.id).collect();

        engine.host_mut().set_viewport(to.0, to.1);
        engine.handle_resize();

        prop_assert_eq!(engine.field().particles.len(), expected_count(to.0, to.1));
        prop_assert!(engine.field().particles.iter().all(|p| !old_ids.contains(&p.id)));
    }
}

#[test]
fn pointer_at_half_radius_pulls_by_point_zero_five() {
    let mut state = FieldState::new(FieldSettings::default(), 0).unwrap();
    state.resize(800, 600);
    state.particles = vec![Particle::new(
        1,
        Vec2::new(300.0, 300.0),
        Vec2::ZERO,
        2.0,
        Rgba::new(168, 85, 247, 0.7),
    )];
    state.pointer_moved(Vec2::new(330.0, 340.0), 0.0);

    tick(&mut state, &mut RecordingSurface::new(), 50.0);

    let vel = state.particles[0].vel / 0.99;
    assert!((vel.length() - 0.05).abs() < 1e-6);
    assert!(vel.normalize().abs_diff_eq(Vec2::new(0.6, 0.8), 1e-5));
}

#[test]
fn teardown_twice_leaves_nothing_behind() {
    let mut engine = engine(1280, 720, 11);
    assert!(engine.attach());
    engine.step_headless(0.0);
    engine.step_headless(FRAME_MS);

    engine.detach();
    engine.detach();

    assert_eq!(engine.phase(), EnginePhase::Inactive);
    assert_eq!(engine.host().pending_frames(), 0);
    assert_eq!(engine.host().listener_count(), 0);
    assert!(!engine.step_headless(2.0 * FRAME_MS));
}

#[test]
fn zero_sized_surface_runs_but_draws_nothing() {
    let mut engine = engine(0, 0, 1);
    assert!(engine.attach());
    assert!(engine.step_headless(0.0));

    assert!(engine.field().particles.is_empty());
    assert_eq!(engine.host().recording().circle_count(), 0);
    assert_eq!(engine.host().pending_frames(), 1);
}

// Scene lifecycle: construction, palette rotation, bob vs simulation,
// resize propagation, and teardown of the shared geometry.

use std::sync::Arc;

use glam::Vec2;
use mascot_core::{ConfigError, MascotScene, WidgetConfig};

const EPS: f32 = 1e-5;
const TICK: f32 = 1.0 / 60.0;

#[test]
fn hero_scene_has_one_mascot_and_a_mouth() {
    let scene = MascotScene::new(WidgetConfig::default(), 1).unwrap();
    assert_eq!(scene.mascots.len(), 1);
    assert!(scene.mascots[0].mouth.is_some());
    assert_eq!(scene.mascots[0].velocity, Vec2::ZERO);
}

#[test]
fn swarm_scene_spreads_three_bodies() {
    let scene = MascotScene::new(WidgetConfig::swarm(), 1).unwrap();
    assert_eq!(scene.mascots.len(), 3);
    assert!((scene.mascots[0].home.x + 2.4).abs() < EPS);
    assert!((scene.mascots[1].home.x - 2.4).abs() < EPS);
    assert!((scene.mascots[2].home.y - 0.25).abs() < EPS);
    for m in &scene.mascots {
        assert!(m.mouth.is_none());
        for c in [m.velocity.x, m.velocity.y] {
            assert!(
                (0.006..=0.018).contains(&c.abs()),
                "initial speed {c} out of band"
            );
        }
    }
}

#[test]
fn rejects_unsupported_counts() {
    let mut config = WidgetConfig::default();
    config.mascot_count = 2;
    assert!(matches!(
        MascotScene::new(config, 1),
        Err(ConfigError::UnsupportedCount(2))
    ));
    let mut config = WidgetConfig::default();
    config.palettes.clear();
    assert!(matches!(
        MascotScene::new(config, 1),
        Err(ConfigError::NoPalettes)
    ));
    let mut config = WidgetConfig::default();
    config.speed_range = (0.02, 0.01);
    assert!(MascotScene::new(config, 1).is_err());
}

// A zero period would make the palette clock in `advance` spin forever,
// so construction must refuse it up front.
#[test]
fn rejects_nonpositive_palette_period() {
    let mut config = WidgetConfig::default();
    config.palette_period_sec = 0.0;
    assert!(matches!(
        MascotScene::new(config, 1),
        Err(ConfigError::InvalidPalettePeriod(_))
    ));
    let mut config = WidgetConfig::default();
    config.palette_period_sec = -7.0;
    assert!(matches!(
        MascotScene::new(config, 1),
        Err(ConfigError::InvalidPalettePeriod(_))
    ));
}

#[test]
fn same_seed_reproduces_initial_velocities() {
    let a = MascotScene::new(WidgetConfig::swarm(), 1234).unwrap();
    let b = MascotScene::new(WidgetConfig::swarm(), 1234).unwrap();
    for (ma, mb) in a.mascots.iter().zip(b.mascots.iter()) {
        assert_eq!(ma.velocity, mb.velocity);
    }
    let c = MascotScene::new(WidgetConfig::swarm(), 1235).unwrap();
    assert!(a
        .mascots
        .iter()
        .zip(c.mascots.iter())
        .any(|(ma, mc)| ma.velocity != mc.velocity));
}

#[test]
fn hero_bobs_around_home() {
    let mut scene = MascotScene::new(WidgetConfig::default(), 1).unwrap();
    scene.advance(0.5, Vec2::ZERO, 0.0);
    let expected = 0.5_f32.sin() * 0.22;
    assert!((scene.mascots[0].position.y - expected).abs() < EPS);
    assert!((scene.elapsed() - 0.5).abs() < EPS);
}

#[test]
fn negative_dt_does_not_rewind_time() {
    let mut scene = MascotScene::new(WidgetConfig::default(), 1).unwrap();
    scene.advance(0.5, Vec2::ZERO, 0.0);
    scene.advance(-1.0, Vec2::ZERO, 0.0);
    assert!((scene.elapsed() - 0.5).abs() < EPS);
}

#[test]
fn swarm_bodies_move_every_tick() {
    let mut scene = MascotScene::new(WidgetConfig::swarm(), 7).unwrap();
    let before: Vec<_> = scene.mascots.iter().map(|m| m.position).collect();
    scene.advance(TICK, Vec2::ZERO, 0.0);
    for (m, b) in scene.mascots.iter().zip(&before) {
        assert_ne!(m.position, *b);
    }
}

#[test]
fn swarm_stays_near_the_bounce_box_over_time() {
    let mut scene = MascotScene::new(WidgetConfig::swarm(), 42).unwrap();
    let bounds = scene.config.bounds;
    for i in 0..1800 {
        let t = i as f32 * TICK;
        scene.advance(TICK, Vec2::new(t.sin(), t.cos()), 0.0);
    }
    for m in &scene.mascots {
        assert!(m.position.x.is_finite() && m.position.y.is_finite());
        // a body may overshoot for a frame, never run away
        assert!(m.position.x.abs() < bounds.x + 0.1);
        assert!(m.position.y.abs() < bounds.y + 0.1);
    }
}

#[test]
fn palette_timer_rotates_on_schedule() {
    let mut scene = MascotScene::new(WidgetConfig::default(), 5).unwrap();
    let palettes = scene.config.palettes.clone();
    // a few short ticks stay under the period
    for _ in 0..10 {
        scene.advance(TICK, Vec2::ZERO, 0.0);
    }
    assert_eq!(scene.mascots[0].palette, palettes[0]);

    scene.advance(scene.config.palette_period_sec, Vec2::ZERO, 0.0);
    let current = scene.mascots[0].palette;
    assert!(
        palettes.contains(&current),
        "rotated palette must come from the configured list"
    );
}

#[test]
fn palette_rotation_keeps_bodies_offset_by_index() {
    let mut scene = MascotScene::new(WidgetConfig::swarm(), 5).unwrap();
    let palettes = scene.config.palettes.clone();
    for _ in 0..8 {
        scene.trigger_palette_shift();
        let base = palettes
            .iter()
            .position(|p| *p == scene.mascots[0].palette)
            .expect("palette from the list");
        for (i, m) in scene.mascots.iter().enumerate() {
            assert_eq!(
                m.palette,
                palettes[(base + i) % palettes.len()],
                "body {i} off its rotation slot"
            );
        }
    }
}

#[test]
fn palette_shift_updates_the_color_uniforms() {
    let mut scene = MascotScene::new(WidgetConfig::default(), 5).unwrap();
    for _ in 0..8 {
        scene.trigger_palette_shift();
        let m = &scene.mascots[0];
        assert_eq!(m.uniforms.color_primary, m.palette.primary.to_vec4());
        assert_eq!(m.uniforms.color_dark, m.palette.dark.to_vec4());
    }
}

#[test]
fn resize_propagates_to_camera_and_uniforms() {
    let mut scene = MascotScene::new(WidgetConfig::default(), 1).unwrap();
    scene.resize(1920.0, 1080.0);
    assert!((scene.camera.aspect - 1920.0 / 1080.0).abs() < EPS);
    for m in &scene.mascots {
        assert_eq!(m.uniforms.resolution, [1920.0, 1080.0]);
    }
    scene.resize(500.0, 1000.0);
    assert!((scene.camera.aspect - 0.5).abs() < EPS);
}

#[test]
fn geometry_is_shared_not_copied() {
    let scene = MascotScene::new(WidgetConfig::swarm(), 1).unwrap();
    // one owner per mesh no matter how many bodies there are
    assert_eq!(Arc::strong_count(&scene.geometry.body), 1);
    let body = scene.geometry.body.clone();
    assert_eq!(Arc::strong_count(&body), 2);
    drop(scene);
    assert_eq!(Arc::strong_count(&body), 1);
}

#[test]
fn three_seconds_of_centered_pointer_is_stable() {
    let mut scene = MascotScene::new(WidgetConfig::default(), 1).unwrap();
    scene.resize(800.0, 600.0);
    for _ in 0..180 {
        scene.advance(TICK, Vec2::ZERO, 0.0);
    }
    let m = &scene.mascots[0];
    assert!((scene.elapsed() - 3.0).abs() < 1e-3);
    // pointer centered: no tilt builds up, only the idle spin
    assert!(m.rotation.x.abs() < 1e-4);
    assert!(m.rotation.y.abs() < 1e-4);
    assert!((m.rotation.z - 1.8).abs() < 1e-3);
    assert!((m.uniforms.time - 3.0).abs() < 1e-3);
    assert!(m.position.y.abs() <= 0.22 + EPS);
}

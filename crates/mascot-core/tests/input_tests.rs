// Pointer normalization and the input registers.

use glam::Vec2;
use mascot_core::input::{normalize_pointer, PointerState, ScrollState, ViewportState};

const EPS: f32 = 1e-6;

#[test]
fn pointer_center_maps_to_origin() {
    let ndc = normalize_pointer(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
    assert!(ndc.x.abs() < EPS);
    assert!(ndc.y.abs() < EPS);
}

#[test]
fn pointer_corners_map_to_unit_square() {
    let viewport = Vec2::new(800.0, 600.0);
    let tl = normalize_pointer(Vec2::ZERO, viewport);
    assert!((tl.x + 1.0).abs() < EPS);
    assert!((tl.y - 1.0).abs() < EPS, "client top must be +1 (up positive)");
    let br = normalize_pointer(viewport, viewport);
    assert!((br.x - 1.0).abs() < EPS);
    assert!((br.y + 1.0).abs() < EPS);
}

#[test]
fn pointer_y_axis_is_inverted() {
    let viewport = Vec2::new(100.0, 100.0);
    let high = normalize_pointer(Vec2::new(50.0, 10.0), viewport);
    let low = normalize_pointer(Vec2::new(50.0, 90.0), viewport);
    assert!(high.y > 0.0 && low.y < 0.0);
}

#[test]
fn pointer_survives_degenerate_viewport() {
    let ndc = normalize_pointer(Vec2::new(10.0, 10.0), Vec2::ZERO);
    assert!(ndc.x.is_finite() && ndc.y.is_finite());
}

#[test]
fn pointer_state_set_from_client() {
    let mut state = PointerState::default();
    assert_eq!(state.ndc, Vec2::ZERO);
    state.set_from_client(Vec2::new(800.0, 0.0), Vec2::new(800.0, 600.0));
    assert!((state.ndc.x - 1.0).abs() < EPS);
    assert!((state.ndc.y - 1.0).abs() < EPS);
}

#[test]
fn scroll_state_clamps_progress() {
    let mut scroll = ScrollState::default();
    scroll.set(1.5);
    assert_eq!(scroll.progress, 1.0);
    scroll.set(-0.2);
    assert_eq!(scroll.progress, 0.0);
    scroll.set(0.37);
    assert!((scroll.progress - 0.37).abs() < EPS);
}

#[test]
fn viewport_aspect_and_resolution() {
    let mut vp = ViewportState::new(1920.0, 1080.0);
    assert!((vp.aspect() - 1920.0 / 1080.0).abs() < EPS);
    assert_eq!(vp.resolution(), [1920.0, 1080.0]);
    vp.resize(800.0, 800.0);
    assert!((vp.aspect() - 1.0).abs() < EPS);
}

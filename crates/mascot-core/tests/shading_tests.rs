// Host-side checks of the shader math mirrored in `shading`; the WGSL
// follows the same formulas, so these pin the thresholds and grid rules.

use glam::{Vec2, Vec3};
use mascot_core::shading::{
    cell_offset, cell_pitch_px, diffuse_intensity, displace, dot_distance, halftone_shade,
    tone_band,
};
use mascot_core::{default_palettes, BodyUniforms, ToneBand};

const EPS: f32 = 1e-5;

#[test]
fn tone_band_thresholds_are_exclusive() {
    assert_eq!(tone_band(1.0), ToneBand::Bright);
    assert_eq!(tone_band(0.81), ToneBand::Bright);
    // exactly 0.8 falls into the mid band (strict greater-than)
    assert_eq!(tone_band(0.8), ToneBand::Mid);
    assert_eq!(tone_band(0.5), ToneBand::Mid);
    assert_eq!(tone_band(0.4), ToneBand::Dark);
    assert_eq!(tone_band(0.0), ToneBand::Dark);
}

#[test]
fn halftone_bright_band_picks_primary_outside_dots() {
    let palette = default_palettes()[0];
    assert_eq!(halftone_shade(0.9, 0.7, &palette), palette.primary);
    assert_eq!(halftone_shade(0.9, 0.5, &palette), palette.secondary);
}

#[test]
fn halftone_mid_band_picks_secondary_outside_dots() {
    let palette = default_palettes()[0];
    assert_eq!(halftone_shade(0.6, 0.9, &palette), palette.secondary);
    assert_eq!(halftone_shade(0.6, 0.5, &palette), palette.dark);
}

#[test]
fn halftone_dark_band_ignores_dots() {
    let palette = default_palettes()[0];
    for dist in [0.0, 0.5, 1.0, 1.4] {
        assert_eq!(halftone_shade(0.2, dist, &palette), palette.dark);
    }
}

#[test]
fn displacement_preserves_y_and_has_constant_magnitude() {
    for (p, t) in [
        (Vec3::new(0.3, 1.2, -0.8), 0.0),
        (Vec3::new(-1.0, -0.4, 0.2), 2.5),
        (Vec3::new(0.0, 0.0, 0.0), 13.7),
    ] {
        let d = displace(p, t);
        assert_eq!(d.y, p.y);
        // sin/cos pair: the XZ offset always has length == amplitude
        let dx = d.x - p.x;
        let dz = d.z - p.z;
        assert!(((dx * dx + dz * dz).sqrt() - 0.05).abs() < EPS);
    }
}

#[test]
fn displacement_is_deterministic_in_time() {
    let p = Vec3::new(0.5, 0.9, -0.3);
    assert_eq!(displace(p, 1.25), displace(p, 1.25));
    assert_ne!(displace(p, 1.25), displace(p, 1.26));
}

#[test]
fn diffuse_intensity_remaps_to_unit_range() {
    let light = Vec3::new(1.0, 1.0, 1.0).normalize();
    assert!((diffuse_intensity(light, light) - 1.0).abs() < EPS);
    assert!(diffuse_intensity(-light, light).abs() < EPS);
    let perp = Vec3::new(1.0, -1.0, 0.0).normalize();
    assert!((diffuse_intensity(perp, light) - 0.5).abs() < EPS);
}

#[test]
fn dot_grid_pitch_is_anchored_to_reference_height() {
    // 60 cells along the 1080px reference: 18px pitch, regardless of the
    // live viewport.
    assert!((cell_pitch_px(60.0) - 18.0).abs() < EPS);
    assert!((cell_pitch_px(30.0) - 36.0).abs() < EPS);
}

#[test]
fn cell_offset_is_periodic_at_the_pitch() {
    let pitch = cell_pitch_px(60.0);
    for frag in [
        Vec2::new(3.0, 7.0),
        Vec2::new(100.5, 20.25),
        Vec2::new(0.0, 0.0),
    ] {
        let a = cell_offset(frag, 60.0);
        let b = cell_offset(frag + Vec2::splat(pitch), 60.0);
        assert!((a - b).length() < 1e-3, "offset not periodic at {frag:?}");
    }
}

#[test]
fn cell_offset_stays_in_signed_unit_square_for_negative_coords() {
    for frag in [Vec2::new(-1.0, -1.0), Vec2::new(-123.4, 56.7)] {
        let off = cell_offset(frag, 60.0);
        assert!((-1.0..=1.0).contains(&off.x), "x out of range at {frag:?}");
        assert!((-1.0..=1.0).contains(&off.y), "y out of range at {frag:?}");
    }
}

#[test]
fn dot_distance_is_zero_at_cell_centers() {
    // cell center: fract(uv) == 0.5 on both axes
    let pitch = cell_pitch_px(60.0);
    let center = Vec2::splat(pitch * 0.5);
    assert!((dot_distance(center, 60.0) - 0.0).abs() < 1e-3);
    let corner = Vec2::ZERO;
    // corners are sqrt(2) from the center in offset space
    assert!((dot_distance(corner, 60.0) - std::f32::consts::SQRT_2).abs() < 1e-3);
}

#[test]
fn body_uniforms_layout_is_stable() {
    assert_eq!(std::mem::size_of::<BodyUniforms>(), 160);
    assert_eq!(std::mem::size_of::<BodyUniforms>() % 16, 0);
}

#[test]
fn body_uniforms_light_dir_is_normalized() {
    let u = BodyUniforms::new(&default_palettes()[0], 60.0, [800.0, 600.0]);
    let l = Vec3::new(u.light_dir[0], u.light_dir[1], u.light_dir[2]);
    assert!((l.length() - 1.0).abs() < EPS);
}

#[test]
fn applying_the_same_palette_is_idempotent() {
    let palettes = default_palettes();
    let mut u = BodyUniforms::new(&palettes[0], 60.0, [800.0, 600.0]);
    let before = u;
    u.apply_palette(&palettes[0]);
    assert_eq!(u, before);
    u.apply_palette(&palettes[1]);
    assert_ne!(u.color_primary, before.color_primary);
}

#[test]
fn set_resolution_touches_only_the_resolution() {
    let mut u = BodyUniforms::new(&default_palettes()[0], 60.0, [800.0, 600.0]);
    let before = u;
    u.set_resolution([1920.0, 1080.0]);
    assert_eq!(u.resolution, [1920.0, 1080.0]);
    assert_eq!(u.color_primary, before.color_primary);
    assert_eq!(u.dot_scale, before.dot_scale);
    assert_eq!(u.time, before.time);
}

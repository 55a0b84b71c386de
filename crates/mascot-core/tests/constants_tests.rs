// Sanity relationships between the tuning constants.

use mascot_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn tone_bands_are_ordered_inside_unit_range() {
    assert!(0.0 < MID_BAND_MIN);
    assert!(MID_BAND_MIN < BRIGHT_BAND_MIN);
    assert!(BRIGHT_BAND_MIN < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn dot_radii_fit_the_cell() {
    // offsets live in [-1, 1] per axis; radii beyond sqrt(2) would never fire
    assert!(BRIGHT_DOT_RADIUS > 0.0 && BRIGHT_DOT_RADIUS < std::f32::consts::SQRT_2);
    assert!(MID_DOT_RADIUS > 0.0 && MID_DOT_RADIUS < std::f32::consts::SQRT_2);
    // the mid band uses the larger (sparser) dots
    assert!(MID_DOT_RADIUS > BRIGHT_DOT_RADIUS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn easing_gains_are_stable_per_tick() {
    assert!(DEFAULT_EASING > 0.0 && DEFAULT_EASING < 1.0);
    assert!(CROSS_EYE_RATE > 0.0);
    assert!(DEFAULT_IDLE_SPIN > 0.0);
    assert!(DEFAULT_IDLE_SPIN < 0.1, "idle spin should be subtle");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn rig_proportions_are_consistent() {
    assert!(PUPIL_RADIUS < SCLERA_RADIUS);
    assert!(PUPIL_FORWARD < SCLERA_RADIUS, "pupil must not detach");
    assert!(PUPIL_OFFSET_MAX < SCLERA_RADIUS);
    assert!(EYE_OFFSET_Z < BODY_RADIUS);
    assert!(MOUTH_TUBE < MOUTH_RADIUS);
    assert!(MOUTH_OPEN_MIN > 0.0 && MOUTH_OPEN_MIN < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn simulator_parameters_are_positive_and_ordered() {
    assert!(DEFAULT_BOUNDS_X > 0.0 && DEFAULT_BOUNDS_Y > 0.0);
    assert!(SPEED_MIN > 0.0);
    assert!(SPEED_MIN < SPEED_MAX);
    assert!(DEFAULT_SWAP_DISTANCE > 0.0);
    assert!(
        DEFAULT_SWAP_DISTANCE < 2.0 * DEFAULT_BOUNDS_X,
        "swap range must fit the box"
    );
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_and_scroll_choreography_bounds() {
    assert!(Z_NEAR > 0.0 && Z_NEAR < Z_FAR);
    assert!(CAMERA_Z > BODY_RADIUS, "camera must sit outside the body");
    assert!(DEFAULT_FOV_DEGREES > 0.0 && DEFAULT_FOV_DEGREES < 180.0);
    assert!(SCROLL_SCALE_BASE - SCROLL_SCALE_FADE > 0.0);
    assert!(SCROLL_SCALE_BASE <= BASE_SCALE);
    assert!(DEFAULT_PALETTE_PERIOD_SEC > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn wobble_stays_well_inside_the_body() {
    assert!(WOBBLE_AMPLITUDE > 0.0);
    assert!(WOBBLE_AMPLITUDE < BODY_RADIUS * 0.1);
    assert!(WOBBLE_FREQUENCY > 0.0);
    assert!(HALFTONE_REF_HEIGHT > 0.0);
    assert!(DEFAULT_DOT_SCALE > 1.0);
}

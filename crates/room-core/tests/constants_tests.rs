// Host-side tests for constants and their relationships.

use room_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn glow_bands_are_ordered() {
    assert!(TEXT_GLOW_BAND.0 < TEXT_GLOW_BAND.1);
    assert!(LOGO_GLOW_BAND.0 < LOGO_GLOW_BAND.1);
    assert!(TEXT_GLOW_BAND.0 > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn orbit_limits_are_consistent() {
    assert!(ORBIT_MIN_DISTANCE < ORBIT_MAX_DISTANCE);
    assert!(ORBIT_MIN_POLAR <= ORBIT_MAX_POLAR);
    assert!(ORBIT_MIN_AZIMUTH <= ORBIT_MAX_AZIMUTH);
    assert!(ORBIT_DAMPING > 0.0 && ORBIT_DAMPING < 1.0);
    assert!(ORBIT_ZOOM_STEP > 0.0 && ORBIT_ZOOM_STEP < 1.0);
}

#[test]
fn rest_position_sits_inside_the_orbit() {
    let d = (CAMERA_REST_POSITION - CAMERA_TARGET).length();
    assert!((ORBIT_MIN_DISTANCE..=ORBIT_MAX_DISTANCE).contains(&d));
    assert!(CAMERA_REST_POSITION.x >= 0.0 && CAMERA_REST_POSITION.z >= 0.0);
    assert!(CAMERA_REST_POSITION.y >= 0.0);
}

#[test]
fn clock_offsets_relate() {
    assert!((CLOCK_HOUR_OFFSET * 12.0 - CLOCK_MINUTE_OFFSET).abs() < 1e-6);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn hover_and_parallax_are_gentle() {
    assert!(HOVER_SCALE > REST_SCALE);
    assert!(HOVER_ENTER_SEC > 0.0 && HOVER_LEAVE_SEC > 0.0);
    assert!(PARALLAX_EASE > 0.0 && PARALLAX_EASE <= 1.0);
    assert!(PARALLAX_INTENSITY / 2.0 < ORBIT_MAX_AZIMUTH);
}

// Host-side tests for camera framing, orbit limits and parallax.

use glam::Vec2;
use room_core::camera::{viewport_zoom, CameraRig, CameraView, PerspectiveCamera, Viewport};
use room_core::constants::*;
use room_core::input::client_to_ndc;
use room_core::orbit::{OrbitControls, OrbitEvent, OrbitLimits, Spherical};
use room_core::parallax::Parallax;
use std::f32::consts::FRAC_PI_2;

fn rest_camera() -> PerspectiveCamera {
    PerspectiveCamera::new(CAMERA_REST_POSITION, 1170.0 / 800.0)
}

#[test]
fn narrow_viewport_halves_zoom() {
    let mut cam = rest_camera();
    cam.resize(Viewport::new(585.0, 800.0));
    assert!((cam.zoom - 0.5).abs() < 1e-6);
    assert!(cam.effective_fov() > CAMERA_FOV_DEG.to_radians());
}

#[test]
fn wide_viewport_never_zooms_in() {
    assert_eq!(viewport_zoom(1170.0), 1.0);
    assert_eq!(viewport_zoom(2560.0), 1.0);
    assert!((viewport_zoom(390.0) - 1.0 / 3.0).abs() < 1e-6);
}

#[test]
fn center_ray_points_at_the_target() {
    let cam = rest_camera();
    let view = CameraView::resolve(&cam, &CameraRig::default());
    let ray = view.ray_through(Vec2::ZERO);
    let expected = (CAMERA_TARGET - CAMERA_REST_POSITION).normalize();
    assert!((ray.origin - CAMERA_REST_POSITION).length() < 1e-4);
    assert!(ray.dir.dot(expected) > 0.9999);
}

#[test]
fn rig_rotation_moves_the_eye_around_the_target() {
    let cam = rest_camera();
    let rig = CameraRig {
        yaw: 0.1,
        pitch: 0.0,
    };
    let view = CameraView::resolve(&cam, &rig);
    assert!((view.eye.length() - CAMERA_REST_POSITION.length()).abs() < 1e-4);
    assert!((view.eye - CAMERA_REST_POSITION).length() > 1e-3);
}

#[test]
fn client_pixels_map_to_ndc() {
    assert_eq!(client_to_ndc(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
    assert_eq!(client_to_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(client_to_ndc(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(client_to_ndc(10.0, 10.0, 0.0, 0.0), Vec2::ZERO);
}

#[test]
fn spherical_matches_rest_position() {
    let s = Spherical::from_offset(CAMERA_REST_POSITION);
    assert!((s.azimuth - 5.0_f32.atan2(4.0)).abs() < 1e-6);
    assert!((s.to_offset() - CAMERA_REST_POSITION).length() < 1e-4);
}

#[test]
fn orbit_drag_is_damped() {
    let mut cam = rest_camera();
    let mut orbit = OrbitControls::new(OrbitLimits::default(), &cam);
    orbit.set_viewport_height(800.0);
    orbit.update(&mut cam);
    let start = orbit.azimuth_angle();

    orbit.pointer_down(Vec2::new(400.0, 400.0));
    orbit.pointer_move(Vec2::new(390.0, 400.0));
    orbit.update(&mut cam);
    let full = std::f32::consts::TAU * 10.0 / 800.0;
    let moved = orbit.azimuth_angle() - start;
    assert!((moved - full * ORBIT_DAMPING).abs() < 1e-4, "moved={}", moved);

    // Residual motion keeps gliding after release.
    orbit.pointer_up();
    let before = orbit.azimuth_angle();
    orbit.update(&mut cam);
    assert!(orbit.azimuth_angle() > before);
}

#[test]
fn orbit_respects_angle_limits() {
    let mut cam = rest_camera();
    let mut orbit = OrbitControls::new(OrbitLimits::default(), &cam);
    orbit.set_viewport_height(800.0);
    orbit.pointer_down(Vec2::ZERO);
    orbit.pointer_move(Vec2::new(-20000.0, 20000.0));
    for _ in 0..200 {
        orbit.update(&mut cam);
    }
    assert!(orbit.azimuth_angle() <= FRAC_PI_2 + 1e-5);
    assert!(orbit.polar_angle() >= 0.0);
    assert!(cam.position.y >= -1e-4);

    orbit.pointer_move(Vec2::new(40000.0, -40000.0));
    for _ in 0..200 {
        orbit.update(&mut cam);
    }
    assert!(orbit.azimuth_angle() >= -1e-5);
    assert!(orbit.polar_angle() <= FRAC_PI_2 + 1e-5);
}

#[test]
fn wheel_zoom_is_clamped_to_distance_limits() {
    let mut cam = rest_camera();
    let mut orbit = OrbitControls::new(OrbitLimits::default(), &cam);
    for _ in 0..100 {
        orbit.wheel(-100.0);
        orbit.update(&mut cam);
    }
    assert!((orbit.distance() - ORBIT_MIN_DISTANCE).abs() < 1e-4);
    for _ in 0..100 {
        orbit.wheel(100.0);
        orbit.update(&mut cam);
    }
    assert!((orbit.distance() - ORBIT_MAX_DISTANCE).abs() < 1e-4);
}

#[test]
fn orbit_reports_interaction_start_and_end() {
    let cam = rest_camera();
    let mut orbit = OrbitControls::new(OrbitLimits::default(), &cam);
    orbit.pointer_down(Vec2::ZERO);
    assert_eq!(orbit.take_events().as_slice(), &[OrbitEvent::Start]);
    orbit.pointer_up();
    assert_eq!(orbit.take_events().as_slice(), &[OrbitEvent::End]);
    orbit.wheel(1.0);
    assert_eq!(
        orbit.take_events().as_slice(),
        &[OrbitEvent::Start, OrbitEvent::End]
    );

    orbit.enabled = false;
    orbit.pointer_down(Vec2::ZERO);
    assert!(orbit.take_events().is_empty());
    assert!(!orbit.is_dragging());
}

#[test]
fn parallax_keeps_combined_angles_inside_limits() {
    let limits = OrbitLimits::default();
    let mut rig = CameraRig::default();
    for (az, polar) in [(0.0, 0.0), (FRAC_PI_2, FRAC_PI_2), (0.05, 1.5), (0.8, 0.8)] {
        let mut parallax = Parallax::default();
        for pointer in [Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0), Vec2::new(1.0, -1.0)] {
            for _ in 0..60 {
                let off = parallax.update(pointer, az, polar, &limits, &mut rig);
                assert!(az + off.azimuth >= limits.min_azimuth - 1e-6);
                assert!(az + off.azimuth <= limits.max_azimuth + 1e-6);
                assert!(polar + off.polar >= limits.min_polar - 1e-6);
                assert!(polar + off.polar <= limits.max_polar + 1e-6);
            }
        }
    }
}

#[test]
fn parallax_converges_on_its_target() {
    let limits = OrbitLimits::default();
    let mut rig = CameraRig::default();
    let mut parallax = Parallax::default();
    let pointer = Vec2::new(0.6, -0.4);
    let target = parallax.target(pointer, 0.8, 0.8, &limits);
    assert!((target.azimuth - 0.6 * PARALLAX_INTENSITY / 2.0).abs() < 1e-6);
    assert!((target.polar - 0.4 * PARALLAX_INTENSITY / 2.0).abs() < 1e-6);

    let first = parallax.update(pointer, 0.8, 0.8, &limits, &mut rig);
    assert!((first.azimuth - target.azimuth * PARALLAX_EASE).abs() < 1e-6);
    for _ in 0..60 {
        parallax.update(pointer, 0.8, 0.8, &limits, &mut rig);
    }
    let c = parallax.current();
    assert!((c.azimuth - target.azimuth).abs() < 1e-4);
    assert!((c.polar - target.polar).abs() < 1e-4);
    assert_eq!(rig.yaw, c.azimuth);
    assert_eq!(rig.pitch, c.polar);
}

#[test]
fn parallax_offsets_move_the_eye_in_orbit_angle_directions() {
    let limits = OrbitLimits::default();
    let cam = rest_camera();
    let rest = Spherical::from_offset(CAMERA_REST_POSITION);
    let mut rig = CameraRig::default();
    let mut parallax = Parallax::default();
    // Pointer at the bottom-right corner: positive azimuth and polar offsets.
    for _ in 0..60 {
        parallax.update(Vec2::new(1.0, -1.0), rest.azimuth, rest.polar, &limits, &mut rig);
    }
    assert!(rig.yaw > 0.0);
    assert!(rig.pitch > 0.0);

    let eye = Spherical::from_offset(CameraView::resolve(&cam, &rig).eye);
    assert!(eye.azimuth > rest.azimuth, "{} <= {}", eye.azimuth, rest.azimuth);
    assert!(eye.polar > rest.polar, "{} <= {}", eye.polar, rest.polar);
}

#[test]
fn parallax_ignores_inverted_limits() {
    let limits = OrbitLimits {
        min_azimuth: 1.0,
        max_azimuth: 0.0,
        ..OrbitLimits::default()
    };
    let parallax = Parallax::default();
    let t = parallax.target(Vec2::new(1.0, 0.0), 0.5, 0.5, &limits);
    assert_eq!(t.azimuth, 0.0);
}

// Host-side tests for glow oscillation and chair sway.

use room_core::chair::{sway_amplitude, sway_offset, update_chair};
use room_core::classify::{classify_scene, CategorySets};
use room_core::constants::CHAIR_BASE_AMPLITUDE;
use room_core::glow::{update_glow, LOGO_GLOW, TEXT_GLOW};
use std::f32::consts::PI;

mod common;
use common::scene_of;

#[test]
fn glow_stays_inside_its_band() {
    for i in 0..2000 {
        let t = i as f32 * 0.013;
        let text = TEXT_GLOW.intensity(t);
        let logo = LOGO_GLOW.intensity(t);
        assert!((0.1..=1.0).contains(&text), "t={} text={}", t, text);
        assert!((0.5..=2.0).contains(&logo), "t={} logo={}", t, logo);
    }
}

#[test]
fn glow_peaks_and_troughs_share_phase() {
    assert!((TEXT_GLOW.intensity(0.5) - 1.0).abs() < 1e-5);
    assert!((LOGO_GLOW.intensity(0.5) - 2.0).abs() < 1e-5);
    assert!((TEXT_GLOW.intensity(1.5) - 0.1).abs() < 1e-5);
    assert!((LOGO_GLOW.intensity(1.5) - 0.5).abs() < 1e-5);
}

#[test]
fn glow_period_is_two_seconds() {
    for t in [0.0_f32, 0.3, 0.77, 1.9] {
        assert!((TEXT_GLOW.intensity(t) - TEXT_GLOW.intensity(t + 2.0)).abs() < 1e-4);
    }
}

#[test]
fn glow_update_touches_only_its_sets() {
    let mut scene = scene_of(&["Text_Name", "Logo_Github", "Desk"]);
    let mut sets = CategorySets::default();
    classify_scene(&mut scene, &mut sets, 1);

    update_glow(&mut scene, &sets.glowing_text, &sets.glowing_logo, 0.5);
    assert!((scene.nodes[0].material.emissive_intensity - 1.0).abs() < 1e-5);
    assert!((scene.nodes[1].material.emissive_intensity - 2.0).abs() < 1e-5);
    assert_eq!(scene.nodes[2].material.emissive_intensity, 0.0);
}

#[test]
fn chair_starts_at_rest() {
    assert_eq!(sway_offset(0.0), 0.0);
}

#[test]
fn chair_passes_through_rest_every_full_swing() {
    // sin(t * 0.5) = 0 at t = 2 * pi * k.
    for k in 1..=3 {
        let t = 2.0 * PI * k as f32;
        assert!(sway_offset(t).abs() < 1e-5, "k={} offset={}", k, sway_offset(t));
    }
}

#[test]
fn chair_sway_is_bounded() {
    for i in 0..4000 {
        let t = i as f32 * 0.01;
        assert!(sway_offset(t).abs() <= CHAIR_BASE_AMPLITUDE + 1e-6);
        assert!(sway_amplitude(t) <= CHAIR_BASE_AMPLITUDE + 1e-6);
    }
}

#[test]
fn chair_amplitude_narrows_at_the_swing_peak() {
    // sin(t * 0.5) = 1 at t = pi.
    let peak = sway_offset(PI);
    assert!((peak - CHAIR_BASE_AMPLITUDE * 0.7).abs() < 1e-5);
}

#[test]
fn chair_sway_is_relative_to_the_authored_yaw() {
    let mut scene = scene_of(&["Chair_Top"]);
    scene.nodes[0].transform.rotation.y = 0.25;
    let mut sets = CategorySets::default();
    classify_scene(&mut scene, &mut sets, 1);

    update_chair(&mut scene, sets.chair.as_ref(), PI);
    let y = scene.nodes[0].transform.rotation.y;
    assert!((y - (0.25 + sway_offset(PI))).abs() < 1e-6);

    update_chair(&mut scene, sets.chair.as_ref(), 0.0);
    assert!((scene.nodes[0].transform.rotation.y - 0.25).abs() < 1e-6);
}

#[test]
fn chair_update_without_chair_is_a_no_op() {
    let mut scene = scene_of(&["Desk"]);
    update_chair(&mut scene, None, 3.0);
    assert_eq!(scene.nodes[0].transform.rotation.y, 0.0);
}

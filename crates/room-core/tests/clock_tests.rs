// Host-side tests for wall-clock hand angles.

use room_core::classify::{classify_scene, CategorySets};
use room_core::clock::{clock_angles, update_clock, WallTime};
use room_core::constants::{CLOCK_HOUR_OFFSET, CLOCK_MINUTE_OFFSET};
use std::f32::consts::{PI, TAU};

mod common;
use common::scene_of;

fn same_rotation(a: f32, b: f32) -> bool {
    let d = (a - b).rem_euclid(TAU);
    d < 1e-3 || TAU - d < 1e-3
}

#[test]
fn three_oclock_hour_hand() {
    let a = clock_angles(WallTime::new(3, 0, 0));
    let expected = -PI / 2.0 + (2.3 * PI / 3.0) / 12.0;
    assert!((a.hour - expected).abs() < 1e-5, "hour={}", a.hour);
    assert!((a.minute - CLOCK_MINUTE_OFFSET).abs() < 1e-6);
    assert_eq!(a.second, 0.0);
}

#[test]
fn afternoon_hours_fold_onto_the_dial() {
    assert_eq!(
        clock_angles(WallTime::new(15, 20, 0)),
        clock_angles(WallTime::new(3, 20, 0))
    );
}

#[test]
fn seconds_hand_quarter_turn() {
    let a = clock_angles(WallTime::new(0, 0, 15));
    assert!((a.second + PI / 2.0).abs() < 1e-6);
}

#[test]
fn hands_advance_continuously_across_the_hour() {
    let before = clock_angles(WallTime::new(11, 59, 59));
    let after = clock_angles(WallTime::new(0, 0, 0));
    // One second on: the hands land on the same physical rotation they would
    // have reached by continuing, modulo a full turn.
    let step_min = PI / 30.0 / 60.0;
    let step_hour = PI / 6.0 / 60.0 / 60.0;
    assert!(same_rotation(before.minute - step_min, after.minute));
    assert!(same_rotation(before.second - PI / 30.0, after.second));
    // Hour hand ignores seconds, so it jumps by the final minute's share.
    assert!(same_rotation(before.hour - step_hour * 60.0, after.hour));
    assert!((after.hour - CLOCK_HOUR_OFFSET).abs() < 1e-6);
}

#[test]
fn update_writes_x_rotation_only() {
    let mut scene = scene_of(&["Clock_HourHand", "Clock_MinuteHand", "Clock_SecondsHand"]);
    for node in &mut scene.nodes {
        node.transform.rotation.y = 0.4;
    }
    let mut sets = CategorySets::default();
    classify_scene(&mut scene, &mut sets, 1);

    update_clock(&mut scene, &sets.clock, WallTime::new(3, 0, 15));
    let a = clock_angles(WallTime::new(3, 0, 15));
    let hour = &scene.nodes[0].transform;
    assert!((hour.rotation.x - a.hour).abs() < 1e-6);
    assert_eq!(hour.rotation.y, 0.4);
    assert!((scene.nodes[2].transform.rotation.x - a.second).abs() < 1e-6);
}

#[test]
fn missing_hand_leaves_clock_untouched() {
    let mut scene = scene_of(&["Clock_HourHand", "Clock_MinuteHand"]);
    let mut sets = CategorySets::default();
    classify_scene(&mut scene, &mut sets, 1);

    update_clock(&mut scene, &sets.clock, WallTime::new(6, 30, 0));
    assert!(scene.nodes.iter().all(|n| n.transform.rotation.x == 0.0));
}

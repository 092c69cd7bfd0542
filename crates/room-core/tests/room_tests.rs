// Host-side tests for the per-session room context: entry intro, idle
// camera reset and frame ordering.

use glam::Vec2;
use room_core::camera::Viewport;
use room_core::constants::{CAMERA_INTRO_START, CAMERA_REST_POSITION};
use room_core::tween::TweenKey;
use room_core::{CameraPhase, FrameInput, Room, RoomConfig, WallTime};

mod common;
use common::scene_of;

fn frame(time: f32) -> FrameInput {
    FrameInput {
        time,
        wall: WallTime::new(3, 0, 0),
        pointer: Vec2::ZERO,
    }
}

fn free_room() -> Room {
    let mut room = Room::new(
        RoomConfig {
            start_with_intro: false,
            ..RoomConfig::default()
        },
        Viewport::new(1170.0, 800.0),
    );
    room.tick(&frame(0.0));
    room
}

fn drag(room: &mut Room, at: f32) {
    room.orbit.pointer_down(Vec2::new(400.0, 400.0));
    room.orbit.pointer_move(Vec2::new(300.0, 400.0));
    room.tick(&frame(at));
    room.orbit.pointer_up();
}

#[test]
fn camera_waits_at_the_intro_position_until_entry() {
    let mut room = Room::new(RoomConfig::default(), Viewport::new(1170.0, 800.0));
    assert_eq!(room.phase(), CameraPhase::AwaitingEntry);
    room.tick(&frame(0.5));
    assert_eq!(room.camera.position, CAMERA_INTRO_START);

    // Orbit input is ignored while the gate is up.
    room.orbit.pointer_down(Vec2::ZERO);
    assert!(!room.orbit.is_dragging());
}

#[test]
fn intro_flies_to_rest_then_frees_the_orbit() {
    let mut room = Room::new(RoomConfig::default(), Viewport::new(1170.0, 800.0));
    room.enter(1.0);
    assert_eq!(room.phase(), CameraPhase::Intro);

    room.tick(&frame(2.0));
    let mid = room.camera.position;
    assert!(mid != CAMERA_INTRO_START && mid != CAMERA_REST_POSITION);
    assert!(!room.orbit.enabled);

    room.tick(&frame(3.6));
    assert_eq!(room.phase(), CameraPhase::Free);
    assert!(room.orbit.enabled);
    assert!((room.camera.position - CAMERA_REST_POSITION).length() < 1e-4);

    // A second enter is a no-op.
    room.enter(4.0);
    assert_eq!(room.phase(), CameraPhase::Free);
}

#[test]
fn idle_camera_returns_to_rest() {
    let mut room = free_room();
    drag(&mut room, 0.1);
    assert!((room.camera.position - CAMERA_REST_POSITION).length() > 1e-3);

    room.tick(&frame(0.2));
    let at = room.pending_reset_at().unwrap();
    assert!((at - 2.2).abs() < 1e-5);

    assert!(!room.tick(&frame(1.0)).camera_reset_started);
    assert!(room.tick(&frame(2.3)).camera_reset_started);
    assert!(room.tweens.is_active(&TweenKey::camera_position()));

    room.tick(&frame(4.0));
    assert!((room.camera.position - CAMERA_REST_POSITION).length() < 1e-3);
    room.tick(&frame(4.1));
    assert!((room.camera.position - CAMERA_REST_POSITION).length() < 1e-3);
}

#[test]
fn grabbing_the_camera_cancels_a_pending_reset() {
    let mut room = free_room();
    drag(&mut room, 0.1);
    room.tick(&frame(0.2));
    assert!(room.pending_reset_at().is_some());

    room.orbit.pointer_down(Vec2::new(10.0, 10.0));
    room.tick(&frame(1.0));
    assert!(room.pending_reset_at().is_none());
    assert!(!room.tick(&frame(3.0)).camera_reset_started);
}

#[test]
fn grabbing_the_camera_interrupts_a_running_reset() {
    let mut room = free_room();
    drag(&mut room, 0.1);
    room.tick(&frame(0.2));
    room.tick(&frame(2.3));
    assert!(room.tweens.is_active(&TweenKey::camera_position()));

    room.orbit.pointer_down(Vec2::new(10.0, 10.0));
    room.tick(&frame(2.5));
    assert!(!room.tweens.is_active(&TweenKey::camera_position()));
    assert!((room.camera.position - CAMERA_REST_POSITION).length() > 1e-4);
}

#[test]
fn tick_without_a_scene_is_harmless() {
    let mut room = free_room();
    let report = room.tick(&frame(1.0));
    assert!(report.hover.is_empty());
    assert!(room.sets.is_empty());
}

#[test]
fn tick_animates_every_behavior() {
    let mut room = free_room();
    room.install_scene(
        scene_of(&[
            "Clock_HourHand",
            "Clock_MinuteHand",
            "Clock_SecondsHand",
            "Text_About",
            "Chair_Top",
        ]),
        16,
    );
    room.tick(&FrameInput {
        time: 0.5,
        wall: WallTime::new(3, 0, 0),
        pointer: Vec2::new(0.5, 0.5),
    });

    let hour = room.scene.nodes[0].transform.rotation.x;
    assert!(hour < 0.0);
    assert!((room.scene.nodes[3].material.emissive_intensity - 1.0).abs() < 1e-5);
    assert!(room.scene.nodes[4].transform.rotation.y != 0.0);
    assert!(room.rig.yaw > 0.0);
}

#[test]
fn resize_updates_zoom_and_aspect() {
    let mut room = free_room();
    room.resize(Viewport::new(585.0, 900.0));
    assert!((room.camera.zoom - 0.5).abs() < 1e-6);
    assert!((room.camera.aspect - 0.65).abs() < 1e-6);
}

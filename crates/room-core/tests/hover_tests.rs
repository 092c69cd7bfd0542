// Host-side tests for hover picking and the scale animations it drives.

use glam::{Vec2, Vec3};
use room_core::camera::Viewport;
use room_core::hover::{HoverCommand, HoverTracker};
use room_core::tween::TweenKey;
use room_core::{FrameInput, HoverState, Room, RoomConfig, WallTime};

mod common;
use common::{scene_of, unit_box_node};

fn free_room() -> Room {
    Room::new(
        RoomConfig {
            start_with_intro: false,
            ..RoomConfig::default()
        },
        Viewport::new(1170.0, 800.0),
    )
}

fn frame(time: f32, pointer: Vec2) -> FrameInput {
    FrameInput {
        time,
        wall: WallTime::default(),
        pointer,
    }
}

#[test]
fn moving_between_targets_swaps_scales_in_one_tick() {
    let mut room = free_room();
    room.install_scene(scene_of(&["Target_A", "Target_B"]), 16);
    let a = room.scene.find_by_name("Target_A").unwrap();
    let b = room.scene.find_by_name("Target_B").unwrap();

    room.apply_hover(Some(a), 0.0);
    let cmds = room.apply_hover(Some(b), 0.1);

    assert_eq!(cmds.as_slice(), &[HoverCommand::Shrink(a), HoverCommand::Grow(b)]);
    assert_eq!(room.tweens.target_of(&TweenKey::mesh_scale(a)), Some(Vec3::ONE));
    assert_eq!(
        room.tweens.target_of(&TweenKey::mesh_scale(b)),
        Some(Vec3::splat(1.2))
    );
    assert_eq!(room.hover_state(), HoverState::Hovering(b));
}

#[test]
fn staying_on_a_target_does_not_restart_its_tween() {
    let mut room = free_room();
    room.install_scene(scene_of(&["Target_A"]), 16);
    let a = room.scene.find_by_name("Target_A").unwrap();

    room.apply_hover(Some(a), 0.0);
    let again = room.apply_hover(Some(a), 0.2);
    assert!(again.is_empty());
    assert_eq!(room.tweens.get(&TweenKey::mesh_scale(a)).unwrap().start, 0.0);
}

#[test]
fn at_most_one_target_grows() {
    let mut tracker = HoverTracker::default();
    let ids: Vec<_> = (0..4).map(room_core::MeshId).collect();
    let sequence = [Some(0), Some(1), None, Some(3), Some(3), Some(2), None, Some(1)];
    for hit in sequence {
        let cmds = tracker.on_hit(hit.map(|i| ids[i]));
        let grows = cmds
            .iter()
            .filter(|c| matches!(c, HoverCommand::Grow(_)))
            .count();
        assert!(grows <= 1);
    }
    assert_eq!(tracker.current(), Some(ids[1]));
}

#[test]
fn leaving_all_targets_shrinks_the_last_one() {
    let mut tracker = HoverTracker::default();
    let a = room_core::MeshId(7);
    tracker.on_hit(Some(a));
    let cmds = tracker.on_hit(None);
    assert_eq!(cmds.as_slice(), &[HoverCommand::Shrink(a)]);
    assert_eq!(tracker.state(), HoverState::Idle);
    assert!(tracker.on_hit(None).is_empty());
}

#[test]
fn pointer_over_target_picks_it_through_the_camera() {
    let mut room = free_room();
    let mut scene = room_core::SceneGraph::default();
    scene.push(unit_box_node("Target_Box", Vec3::ZERO));
    room.install_scene(scene, 16);
    let target = room.scene.find_by_name("Target_Box").unwrap();

    let report = room.tick(&frame(0.0, Vec2::ZERO));
    assert_eq!(report.hover.as_slice(), &[HoverCommand::Grow(target)]);

    // Grown scale is reached once the back-out tween settles.
    room.tick(&frame(1.0, Vec2::ZERO));
    let scale = room.scene.get(target).unwrap().transform.scale;
    assert!((scale - Vec3::splat(1.2)).length() < 1e-5);

    let report = room.tick(&frame(1.1, Vec2::new(1.0, 1.0)));
    assert_eq!(report.hover.as_slice(), &[HoverCommand::Shrink(target)]);
}

#[test]
fn non_target_meshes_are_never_picked() {
    let mut room = free_room();
    let mut scene = room_core::SceneGraph::default();
    scene.push(unit_box_node("Desk", Vec3::ZERO));
    room.install_scene(scene, 16);

    let report = room.tick(&frame(0.0, Vec2::ZERO));
    assert!(report.hover.is_empty());
    assert_eq!(room.hover_state(), HoverState::Idle);
}

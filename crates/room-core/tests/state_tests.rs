// Host-side tests for load progress, autoplay gating and UI panel state.

use room_core::loading::{AssetState, LoadProgress};
use room_core::media::{video_frame_ready, AutoplayGate};
use room_core::ui::{Drawer, DrawerClick, MuteToggle, Section};

#[test]
fn progress_counts_failures_as_settled() {
    let mut p = LoadProgress::default();
    assert_eq!(p.percent(), 0.0);
    p.register(4);
    assert_eq!(p.settle(true), 25.0);
    assert_eq!(p.settle(false), 50.0);
    p.settle(true);
    assert!(!p.is_complete());
    assert_eq!(p.settle(true), 100.0);
    assert!(p.is_complete());
    assert_eq!(p.failed, 1);

    // Extra settles never push past 100%.
    assert_eq!(p.settle(true), 100.0);
}

#[test]
fn failed_and_pending_assets_look_alike_to_consumers() {
    let pending: AssetState<u32> = AssetState::default();
    let failed: AssetState<u32> = Err::<u32, _>("404").into();
    let ready: AssetState<u32> = Ok::<_, String>(7).into();

    assert!(pending.ready().is_none());
    assert!(failed.ready().is_none());
    assert_eq!(ready.ready(), Some(&7));
    assert!(!pending.is_settled());
    assert!(failed.is_settled());
    assert!(matches!(failed, AssetState::Failed(ref r) if r == "404"));
}

#[test]
fn autoplay_retries_once_after_a_gesture() {
    let mut gate = AutoplayGate::default();
    assert!(gate.begin());
    assert!(!gate.begin());
    assert!(gate.on_rejected());
    assert!(!gate.on_rejected());
    assert!(gate.on_gesture());
    assert!(!gate.on_gesture());
    gate.on_started();
    assert_eq!(gate, AutoplayGate::Playing);
}

#[test]
fn autoplay_that_starts_needs_no_gesture() {
    let mut gate = AutoplayGate::default();
    gate.begin();
    gate.on_started();
    assert!(!gate.on_rejected());
    assert!(!gate.on_gesture());
}

#[test]
fn video_upload_waits_for_current_data() {
    assert!(!video_frame_ready(0));
    assert!(!video_frame_ready(1));
    assert!(video_frame_ready(2));
    assert!(video_frame_ready(4));
}

#[test]
fn drawer_opens_switches_and_closes() {
    let mut d = Drawer::default();
    assert!(d.click(DrawerClick::Button(Section::About)));
    assert!(d.click(DrawerClick::Button(Section::Contact)));
    assert_eq!(d.open_section(), Some(Section::Contact));
    assert!(!d.click(DrawerClick::Inside));
    assert!(d.click(DrawerClick::Outside));
    assert!(!d.is_open());
    assert!(!d.click(DrawerClick::Close));
}

#[test]
fn section_ids_follow_the_markup() {
    assert_eq!(Section::Projects.button_id(), "btn-projects");
    assert_eq!(Section::Experience.panel_id(), "section-experience");
    assert_eq!(Section::ALL.len(), 4);
}

#[test]
fn mute_toggle_swaps_icons() {
    let mut m = MuteToggle::default();
    assert_eq!(m.visible_icon(), "icon-sound-on");
    assert!(m.toggle());
    assert_eq!(m.visible_icon(), "icon-sound-off");
    assert_eq!(m.hidden_icon(), "icon-sound-on");
}

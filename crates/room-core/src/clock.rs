use crate::classify::ClockHands;
use crate::constants::{CLOCK_HOUR_OFFSET, CLOCK_MINUTE_OFFSET};
use crate::scene::SceneGraph;
use std::f32::consts::PI;

/// Local wall-clock time of day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WallTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl WallTime {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }
}

/// X-axis rotations for the three hands, clockwise negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

pub fn clock_angles(t: WallTime) -> ClockAngles {
    let h = (t.hours % 12) as f32;
    let m = t.minutes as f32;
    let s = t.seconds as f32;
    ClockAngles {
        hour: -(h + m / 60.0) * (PI / 6.0) + CLOCK_HOUR_OFFSET,
        minute: -(m + s / 60.0) * (PI / 30.0) + CLOCK_MINUTE_OFFSET,
        second: -s * (PI / 30.0),
    }
}

/// Point the hands at `now`. Does nothing until all three hands exist.
pub fn update_clock(scene: &mut SceneGraph, hands: &ClockHands, now: WallTime) {
    let Some((hour, minute, seconds)) = hands.all() else {
        return;
    };
    let a = clock_angles(now);
    for (id, angle) in [(hour, a.hour), (minute, a.minute), (seconds, a.second)] {
        if let Some(node) = scene.get_mut(id) {
            node.transform.rotation.x = angle;
        }
    }
}

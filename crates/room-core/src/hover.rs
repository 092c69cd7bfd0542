use crate::constants::{
    BACK_OUT_OVERSHOOT, HOVER_ENTER_SEC, HOVER_LEAVE_SEC, HOVER_SCALE, REST_SCALE,
};
use crate::scene::{MeshId, SceneGraph};
use crate::tween::{Easing, TweenKey, Tweens};
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(MeshId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverCommand {
    Grow(MeshId),
    Shrink(MeshId),
}

pub type HoverCommands = SmallVec<[HoverCommand; 2]>;

#[derive(Clone, Debug, Default)]
pub struct HoverTracker {
    state: HoverState,
}

impl HoverTracker {
    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn current(&self) -> Option<MeshId> {
        match self.state {
            HoverState::Idle => None,
            HoverState::Hovering(m) => Some(m),
        }
    }

    /// Feed this frame's nearest target hit; returns the animations to issue,
    /// shrink before grow.
    pub fn on_hit(&mut self, hit: Option<MeshId>) -> HoverCommands {
        let mut out = HoverCommands::new();
        match (self.state, hit) {
            (HoverState::Idle, None) => {}
            (HoverState::Hovering(m), Some(h)) if m == h => {}
            (HoverState::Idle, Some(h)) => {
                out.push(HoverCommand::Grow(h));
                self.state = HoverState::Hovering(h);
            }
            (HoverState::Hovering(m), Some(h)) => {
                out.push(HoverCommand::Shrink(m));
                out.push(HoverCommand::Grow(h));
                self.state = HoverState::Hovering(h);
            }
            (HoverState::Hovering(m), None) => {
                out.push(HoverCommand::Shrink(m));
                self.state = HoverState::Idle;
            }
        }
        out
    }
}

/// Turn hover commands into scale tweens starting from each mesh's current scale.
pub fn issue_hover_tweens(
    commands: &[HoverCommand],
    scene: &SceneGraph,
    tweens: &mut Tweens,
    now: f32,
) {
    for cmd in commands {
        let (id, to, duration, easing) = match *cmd {
            HoverCommand::Grow(id) => (
                id,
                HOVER_SCALE,
                HOVER_ENTER_SEC,
                Easing::BackOut(BACK_OUT_OVERSHOOT),
            ),
            HoverCommand::Shrink(id) => (id, REST_SCALE, HOVER_LEAVE_SEC, Easing::Power2Out),
        };
        let Some(node) = scene.get(id) else {
            continue;
        };
        tweens.start(
            TweenKey::mesh_scale(id),
            node.transform.scale,
            Vec3::splat(to),
            duration,
            easing,
            now,
        );
    }
}

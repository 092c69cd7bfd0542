//! Per-session room context and the ordered per-frame pipeline.
//!
//! A [`Room`] owns everything the frame loop mutates: the scene, the working
//! sets filled by the classifier, camera/rig/orbit state, the hover tracker
//! and the tween store. Each tick runs, in order:
//!
//! 1. tweens (mesh scales, scripted camera moves)
//! 2. orbit controller, then the camera intro/reset director
//! 3. parallax, reading the orbit angles the controller just produced
//! 4. clock hands, glow, chair sway
//! 5. hover raycast against interactive targets

use crate::camera::{CameraRig, CameraView, PerspectiveCamera, Viewport};
use crate::chair::update_chair;
use crate::classify::{classify_scene, CategorySets, ClassifyReport};
use crate::clock::{update_clock, WallTime};
use crate::constants::*;
use crate::glow::update_glow;
use crate::hover::{issue_hover_tweens, HoverCommands, HoverState, HoverTracker};
use crate::orbit::{OrbitControls, OrbitEvent, OrbitLimits};
use crate::parallax::Parallax;
use crate::raycast::intersect_meshes;
use crate::scene::{MeshId, SceneGraph};
use crate::tween::{Easing, TweenKey, TweenProperty, TweenTarget, Tweens};
use glam::{Vec2, Vec3};

#[derive(Clone, Debug)]
pub struct RoomConfig {
    pub limits: OrbitLimits,
    pub parallax_intensity: f32,
    pub parallax_ease: f32,
    pub rest_position: Vec3,
    pub intro_start: Vec3,
    pub intro_sec: f32,
    pub reset_delay_sec: f32,
    pub reset_sec: f32,
    /// Hold the camera at `intro_start` until [`Room::enter`].
    pub start_with_intro: bool,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            limits: OrbitLimits::default(),
            parallax_intensity: PARALLAX_INTENSITY,
            parallax_ease: PARALLAX_EASE,
            rest_position: CAMERA_REST_POSITION,
            intro_start: CAMERA_INTRO_START,
            intro_sec: CAMERA_INTRO_SEC,
            reset_delay_sec: CAMERA_RESET_DELAY_SEC,
            reset_sec: CAMERA_RESET_SEC,
            start_with_intro: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraPhase {
    AwaitingEntry,
    Intro,
    Free,
}

#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    /// Session time in seconds.
    pub time: f32,
    pub wall: WallTime,
    pub pointer: Vec2,
}

#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    pub hover: HoverCommands,
    pub camera_reset_started: bool,
}

pub struct Room {
    pub scene: SceneGraph,
    pub sets: CategorySets,
    pub camera: PerspectiveCamera,
    pub rig: CameraRig,
    pub orbit: OrbitControls,
    pub parallax: Parallax,
    pub tweens: Tweens,
    hover: HoverTracker,
    config: RoomConfig,
    phase: CameraPhase,
    reset_at: Option<f32>,
}

impl Room {
    pub fn new(config: RoomConfig, viewport: Viewport) -> Self {
        let start = if config.start_with_intro {
            config.intro_start
        } else {
            config.rest_position
        };
        let mut camera = PerspectiveCamera::new(start, viewport.aspect());
        camera.resize(viewport);
        let mut orbit = OrbitControls::new(config.limits, &camera);
        orbit.set_viewport_height(viewport.height);
        let phase = if config.start_with_intro {
            orbit.enabled = false;
            CameraPhase::AwaitingEntry
        } else {
            CameraPhase::Free
        };
        Self {
            scene: SceneGraph::default(),
            sets: CategorySets::default(),
            camera,
            rig: CameraRig::default(),
            orbit,
            parallax: Parallax::new(config.parallax_intensity, config.parallax_ease),
            tweens: Tweens::new(),
            hover: HoverTracker::default(),
            config,
            phase,
            reset_at: None,
        }
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    pub fn hover_state(&self) -> HoverState {
        self.hover.state()
    }

    pub fn pending_reset_at(&self) -> Option<f32> {
        self.reset_at
    }

    /// Take ownership of a freshly loaded scene and classify it once.
    pub fn install_scene(&mut self, scene: SceneGraph, max_anisotropy: u16) -> ClassifyReport {
        self.scene = scene;
        self.sets = CategorySets::default();
        self.hover = HoverTracker::default();
        self.classify(max_anisotropy)
    }

    /// Run the classifier over the current scene; safe to repeat.
    pub fn classify(&mut self, max_anisotropy: u16) -> ClassifyReport {
        classify_scene(&mut self.scene, &mut self.sets, max_anisotropy)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.resize(viewport);
        self.orbit.set_viewport_height(viewport.height);
    }

    /// Leave the entry gate: fly from the intro position to the resting one.
    pub fn enter(&mut self, now: f32) {
        if self.phase != CameraPhase::AwaitingEntry {
            return;
        }
        self.camera.position = self.config.intro_start;
        self.tweens.start(
            TweenKey::camera_position(),
            self.camera.position,
            self.config.rest_position,
            self.config.intro_sec,
            Easing::Power2InOut,
            now,
        );
        self.phase = CameraPhase::Intro;
        log::info!("[camera] intro started");
    }

    pub fn camera_view(&self) -> CameraView {
        CameraView::resolve(&self.camera, &self.rig)
    }

    pub fn tick(&mut self, input: &FrameInput) -> FrameReport {
        let now = input.time;
        let mut report = FrameReport::default();

        self.step_tweens(now);
        self.step_camera(now, &mut report);

        self.parallax.update(
            input.pointer,
            self.orbit.azimuth_angle(),
            self.orbit.polar_angle(),
            &self.config.limits,
            &mut self.rig,
        );

        update_clock(&mut self.scene, &self.sets.clock, input.wall);
        update_glow(
            &mut self.scene,
            &self.sets.glowing_text,
            &self.sets.glowing_logo,
            now,
        );
        update_chair(&mut self.scene, self.sets.chair.as_ref(), now);

        if !self.sets.interactive_targets.is_empty() {
            let ray = self.camera_view().ray_through(input.pointer);
            let hit = intersect_meshes(&self.scene, &self.sets.interactive_targets, &ray);
            report.hover = self.apply_hover(hit.map(|h| h.mesh), now);
        }
        report
    }

    /// Feed one raycast result to the hover state machine and start the
    /// resulting scale animations.
    pub fn apply_hover(&mut self, hit: Option<MeshId>, now: f32) -> HoverCommands {
        let commands = self.hover.on_hit(hit);
        issue_hover_tweens(&commands, &self.scene, &mut self.tweens, now);
        commands
    }

    fn step_tweens(&mut self, now: f32) {
        let Room {
            tweens,
            scene,
            camera,
            ..
        } = self;
        tweens.advance(now, |key, value| match (key.target, key.property) {
            (TweenTarget::Mesh(id), TweenProperty::Scale) => {
                if let Some(node) = scene.get_mut(id) {
                    node.transform.scale = value;
                }
            }
            (TweenTarget::Mesh(id), TweenProperty::Position) => {
                if let Some(node) = scene.get_mut(id) {
                    node.transform.translation = value;
                }
            }
            (TweenTarget::Camera, TweenProperty::Position) => camera.position = value,
            (TweenTarget::Camera, TweenProperty::Scale) => {}
        });
    }

    fn step_camera(&mut self, now: f32, report: &mut FrameReport) {
        let scripted = self.tweens.is_active(&TweenKey::camera_position());

        if self.phase == CameraPhase::Intro && !scripted {
            self.phase = CameraPhase::Free;
            self.orbit.enabled = true;
            log::info!("[camera] intro finished");
        }

        for ev in self.orbit.take_events() {
            match ev {
                OrbitEvent::Start => {
                    self.reset_at = None;
                    if self.tweens.cancel(&TweenKey::camera_position()) {
                        log::debug!("[camera] reset interrupted by user");
                    }
                }
                OrbitEvent::End => self.reset_at = Some(now + self.config.reset_delay_sec),
            }
        }

        if self.phase == CameraPhase::Free && !self.tweens.is_active(&TweenKey::camera_position())
        {
            self.orbit.update(&mut self.camera);
        } else {
            self.orbit.sync(&self.camera);
        }

        if let Some(at) = self.reset_at {
            if now >= at && !self.orbit.is_dragging() {
                self.reset_at = None;
                self.orbit.halt();
                self.tweens.start(
                    TweenKey::camera_position(),
                    self.camera.position,
                    self.config.rest_position,
                    self.config.reset_sec,
                    Easing::Power2InOut,
                    now,
                );
                report.camera_reset_started = true;
                log::debug!("[camera] returning to rest");
            }
        }
    }
}

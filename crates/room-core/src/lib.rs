pub mod camera;
pub mod chair;
pub mod classify;
pub mod clock;
pub mod constants;
pub mod glow;
pub mod hover;
pub mod import;
pub mod input;
pub mod loading;
pub mod media;
pub mod orbit;
pub mod parallax;
pub mod raycast;
pub mod room;
pub mod scene;
pub mod tween;
pub mod ui;

pub use camera::{CameraRig, CameraView, PerspectiveCamera, Viewport};
pub use classify::{classify_scene, Category, CategorySets, ClassifyReport};
pub use clock::WallTime;
pub use hover::{HoverCommand, HoverState};
pub use import::{import_glb, import_glb_with, ImportError, MeshDecoder};
pub use input::PointerState;
pub use room::{CameraPhase, FrameInput, FrameReport, Room, RoomConfig};
pub use scene::{MeshId, SceneGraph, TextureId, TextureRef, VideoSlot};

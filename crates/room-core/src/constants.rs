use glam::Vec3;

// Shared tuning constants for the room core and the web front-end.

// Asset paths
pub const MODEL_PATH: &str = "/models/room.glb";
/// Directory holding `draco_decoder.js` and its wasm binary.
pub const DRACO_PATH: &str = "/draco/";
pub const VIDEO_1_PATH: &str = "/video/video1.mp4";
pub const VIDEO_2_PATH: &str = "/video/video2.mp4";
pub const AUDIO_BG_PATH: &str = "/audio/background.mp3";
pub const AUDIO_BG_VOLUME: f64 = 0.3;

// Colors (linear-agnostic RGB, as authored)
pub const BACKGROUND_RGB: [f32; 3] = [0x1a as f32 / 255.0, 0x1a as f32 / 255.0, 0x2e as f32 / 255.0];
pub const ALPHA_TINT_RGB: [f32; 3] = [0x33 as f32 / 255.0, 0x33 as f32 / 255.0, 0x33 as f32 / 255.0];
pub const TEXT_GLOW_RGB: [f32; 3] = [0xEF as f32 / 255.0, 0xF2 as f32 / 255.0, 0xF1 as f32 / 255.0];
pub const LOGO_GLOW_RGB: [f32; 3] = [1.0, 1.0, 1.0];

// Material opacity and glow baselines
pub const VIDEO_OPACITY: f32 = 0.9;
pub const ALPHA_OPACITY: f32 = 0.7;
pub const TEXT_GLOW_BASELINE: f32 = 5.0;
pub const LOGO_GLOW_BASELINE: f32 = 1.0;

// Glow oscillation bands (min, max)
pub const TEXT_GLOW_BAND: (f32, f32) = (0.1, 1.0);
pub const LOGO_GLOW_BAND: (f32, f32) = (0.5, 2.0);

// Clock dial orientation: the painted face is rotated relative to 12 o'clock
pub const CLOCK_MINUTE_OFFSET: f32 = 2.3 * std::f32::consts::PI / 3.0;
pub const CLOCK_HOUR_OFFSET: f32 = CLOCK_MINUTE_OFFSET / 12.0;

// Chair idle sway
pub const CHAIR_BASE_AMPLITUDE: f32 = std::f32::consts::PI / 8.0;
pub const CHAIR_SWAY_FREQUENCY: f32 = 0.5;
pub const CHAIR_AMPLITUDE_DAMPING: f32 = 0.3;

// Hover feedback
pub const HOVER_SCALE: f32 = 1.2;
pub const REST_SCALE: f32 = 1.0;
pub const HOVER_ENTER_SEC: f32 = 0.5;
pub const HOVER_LEAVE_SEC: f32 = 0.5;
pub const BACK_OUT_OVERSHOOT: f32 = 1.7;

// Loading screen
pub const LOADING_FADE_OUT_MS: i32 = 2000;

// Parallax
pub const PARALLAX_INTENSITY: f32 = 0.25;
pub const PARALLAX_EASE: f32 = 0.2; // lerp factor per frame

// Camera
pub const CAMERA_FOV_DEG: f32 = 20.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_REST_POSITION: Vec3 = Vec3::new(5.0, 1.4, 4.0);
pub const CAMERA_INTRO_START: Vec3 = Vec3::new(6.55, 0.0, 7.6);
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;
pub const CAMERA_INTRO_SEC: f32 = 2.5;
pub const CAMERA_RESET_DELAY_SEC: f32 = 2.0;
pub const CAMERA_RESET_SEC: f32 = 1.5;

// Responsive zoom: viewports narrower than this see a scaled-down framing
pub const REFERENCE_WIDTH: f32 = 1170.0;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Orbit controller
pub const ORBIT_MIN_DISTANCE: f32 = 4.0;
pub const ORBIT_MAX_DISTANCE: f32 = 10.0;
pub const ORBIT_MIN_POLAR: f32 = 0.0;
pub const ORBIT_MAX_POLAR: f32 = std::f32::consts::FRAC_PI_2;
pub const ORBIT_MIN_AZIMUTH: f32 = 0.0;
pub const ORBIT_MAX_AZIMUTH: f32 = std::f32::consts::FRAC_PI_2;
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95;

// Texture sharpness fallback when the host reports nothing better
pub const DEFAULT_MAX_ANISOTROPY: u16 = 16;

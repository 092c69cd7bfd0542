// DOM ids and classes the page markup provides.
pub const CANVAS_ID: &str = "app-canvas";
pub const LOADING_SCREEN_ID: &str = "loading-screen";
pub const LOADING_PROGRESS_ID: &str = "loading-progress";
pub const ENTER_BUTTON_ID: &str = "enter-button";
pub const MUTE_TOGGLE_ID: &str = "mute-toggle";
pub const SIDE_DRAWER_ID: &str = "side-drawer";
pub const DRAWER_CLOSE_ID: &str = "drawer-close";

pub const FADE_OUT_CLASS: &str = "fade-out";
pub const HIDDEN_CLASS: &str = "hidden";
pub const OPEN_CLASS: &str = "open";

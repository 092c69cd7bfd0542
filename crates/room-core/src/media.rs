/// Background audio autoplay, deferred to the first user gesture when the
/// browser rejects the initial attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AutoplayGate {
    #[default]
    Idle,
    Attempting,
    AwaitingGesture,
    Retried,
    Playing,
}

impl AutoplayGate {
    /// Whether a first `play()` should be attempted now.
    pub fn begin(&mut self) -> bool {
        if *self == AutoplayGate::Idle {
            *self = AutoplayGate::Attempting;
            return true;
        }
        false
    }

    pub fn on_started(&mut self) {
        *self = AutoplayGate::Playing;
    }

    /// The host refused playback. Returns true when gesture listeners should
    /// be installed; that happens at most once.
    pub fn on_rejected(&mut self) -> bool {
        if *self == AutoplayGate::Attempting {
            *self = AutoplayGate::AwaitingGesture;
            return true;
        }
        false
    }

    /// A click or keypress arrived. Returns true exactly once: retry playback
    /// and remove the listeners.
    pub fn on_gesture(&mut self) -> bool {
        if *self == AutoplayGate::AwaitingGesture {
            *self = AutoplayGate::Retried;
            return true;
        }
        false
    }
}

/// `HTMLMediaElement.HAVE_CURRENT_DATA`
pub const HAVE_CURRENT_DATA: u16 = 2;

/// A video frame may be uploaded once the element has current data.
#[inline]
pub fn video_frame_ready(ready_state: u16) -> bool {
    ready_state >= HAVE_CURRENT_DATA
}

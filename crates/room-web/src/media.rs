use crate::render::GpuState;
use room_core::constants::{AUDIO_BG_PATH, AUDIO_BG_VOLUME, VIDEO_1_PATH, VIDEO_2_PATH};
use room_core::media::{video_frame_ready, AutoplayGate};
use room_core::VideoSlot;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Start playback and report the outcome once the promise settles.
fn play(el: &web::HtmlMediaElement, on_done: impl FnOnce(Result<(), JsValue>) + 'static) {
    match el.play() {
        Ok(promise) => spawn_local(async move {
            on_done(JsFuture::from(promise).await.map(|_| ()));
        }),
        Err(e) => on_done(Err(e)),
    }
}

/// The two looping, muted video streams shown on the room's screens.
pub struct Videos {
    streams: [(VideoSlot, web::HtmlVideoElement); 2],
}

impl Videos {
    pub fn create(document: &web::Document) -> anyhow::Result<Self> {
        Ok(Self {
            streams: [
                (VideoSlot::Monitor, create_video(document, VIDEO_1_PATH)?),
                (VideoSlot::Painting, create_video(document, VIDEO_2_PATH)?),
            ],
        })
    }

    /// Push the latest frame of every video that has one. A stalled stream
    /// keeps showing whatever was uploaded last.
    pub fn upload(&self, gpu: &mut GpuState<'_>) {
        for (slot, video) in &self.streams {
            if video_frame_ready(video.ready_state()) {
                gpu.upload_video(*slot, video);
            }
        }
    }
}

fn create_video(document: &web::Document, src: &str) -> anyhow::Result<web::HtmlVideoElement> {
    let video: web::HtmlVideoElement = document
        .create_element("video")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    video.set_cross_origin(Some("anonymous"));
    video.set_loop(true);
    video.set_muted(true);
    let _ = video.set_attribute("playsinline", "");
    video.set_src(src);

    let target = video.clone();
    let path = src.to_string();
    let on_loaded = Closure::<dyn FnMut()>::new(move || {
        let path = path.clone();
        play(&target, move |r| {
            if let Err(e) = r {
                log::error!("[media] video {} failed to play: {:?}", path, e);
            }
        });
    });
    let _ = video.add_event_listener_with_callback("loadeddata", on_loaded.as_ref().unchecked_ref());
    on_loaded.forget();

    let path = src.to_string();
    let on_error = Closure::<dyn FnMut()>::new(move || {
        log::error!("[media] video {} failed to load", path);
    });
    let _ = video.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
    on_error.forget();

    video.load();
    Ok(video)
}

type GestureListener = Rc<RefCell<Option<Closure<dyn FnMut(web::Event)>>>>;

/// Looping background track with gesture-deferred autoplay.
#[derive(Clone)]
pub struct BackgroundAudio {
    element: web::HtmlAudioElement,
    gate: Rc<RefCell<AutoplayGate>>,
    listener: GestureListener,
}

impl BackgroundAudio {
    pub fn create() -> anyhow::Result<Self> {
        let element =
            web::HtmlAudioElement::new_with_src(AUDIO_BG_PATH).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        element.set_loop(true);
        element.set_volume(AUDIO_BG_VOLUME);
        Ok(Self {
            element,
            gate: Rc::new(RefCell::new(AutoplayGate::default())),
            listener: Rc::new(RefCell::new(None)),
        })
    }

    pub fn set_muted(&self, muted: bool) {
        self.element.set_muted(muted);
    }

    /// First playback attempt; later calls are ignored.
    pub fn start(&self) {
        if !self.gate.borrow_mut().begin() {
            return;
        }
        let this = self.clone();
        play(&self.element, move |r| match r {
            Ok(()) => {
                this.gate.borrow_mut().on_started();
                log::info!("[media] background audio playing");
            }
            Err(_) => {
                if this.gate.borrow_mut().on_rejected() {
                    log::info!("[media] autoplay blocked; waiting for a click or key press");
                    this.install_gesture_retry();
                }
            }
        });
    }

    fn install_gesture_retry(&self) {
        let Some(document) = crate::dom::window_document() else {
            return;
        };
        let this = self.clone();
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(web::Event)>::new(move |_ev: web::Event| {
            if !this.gate.borrow_mut().on_gesture() {
                return;
            }
            if let Some(l) = this.listener.borrow().as_ref() {
                for kind in ["click", "keydown"] {
                    let _ = doc.remove_event_listener_with_callback(kind, l.as_ref().unchecked_ref());
                }
            }
            let gate = this.gate.clone();
            play(&this.element, move |r| match r {
                Ok(()) => gate.borrow_mut().on_started(),
                Err(e) => log::warn!("[media] background audio retry failed: {:?}", e),
            });
        });
        for kind in ["click", "keydown"] {
            let _ = document.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        *self.listener.borrow_mut() = Some(closure);
    }
}

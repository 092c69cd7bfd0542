#![cfg(target_arch = "wasm32")]
mod constants;
mod dom;
mod draco;
mod frame;
mod input;
mod loader;
mod media;
mod overlay;
mod render;
mod ui;

use constants::CANVAS_ID;
use instant::Instant;
use room_core::loading::LoadProgress;
use room_core::{PointerState, Room, RoomConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("room-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::sync_canvas_backing_size(&canvas);

    let started = Instant::now();
    let room = Rc::new(RefCell::new(Room::new(
        RoomConfig::default(),
        dom::viewport(&window),
    )));
    let pointer = Rc::new(RefCell::new(PointerState::default()));
    let progress = Rc::new(RefCell::new(LoadProgress::default()));

    let audio = match media::BackgroundAudio::create() {
        Ok(a) => {
            // Browsers usually refuse this; the gate retries on the first gesture.
            a.start();
            Some(a)
        }
        Err(e) => {
            log::warn!("[media] background audio unavailable: {}", e);
            None
        }
    };
    let videos = match media::Videos::create(&document) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("[media] videos unavailable: {}", e);
            None
        }
    };

    ui::wire_ui(ui::UiWiring {
        document: document.clone(),
        room: room.clone(),
        audio,
        started,
    });
    input::wire_input_handlers(input::InputWiring {
        window: window.clone(),
        canvas: canvas.clone(),
        room: room.clone(),
        pointer: pointer.clone(),
    });

    let gpu: loader::SharedGpu = Rc::new(RefCell::new(frame::init_gpu(&canvas).await));
    if gpu.borrow().is_none() {
        log::warn!("continuing without rendering");
    }

    spawn_local(loader::load_room(loader::LoadWiring {
        window,
        document,
        room: room.clone(),
        gpu: gpu.clone(),
        progress,
    }));

    frame::start_loop(Rc::new(RefCell::new(frame::FrameContext {
        room,
        pointer,
        gpu,
        videos,
        canvas,
        started,
    })));
    Ok(())
}

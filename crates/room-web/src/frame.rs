use crate::loader::SharedGpu;
use crate::media::Videos;
use crate::render;
use instant::Instant;
use room_core::clock::WallTime;
use room_core::{FrameInput, PointerState, Room};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub room: Rc<RefCell<Room>>,
    pub pointer: Rc<RefCell<PointerState>>,
    pub gpu: SharedGpu,
    pub videos: Option<Videos>,
    pub canvas: web::HtmlCanvasElement,
    pub started: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let input = FrameInput {
            time: self.started.elapsed().as_secs_f32(),
            wall: wall_clock(),
            pointer: self.pointer.borrow().ndc,
        };
        self.room.borrow_mut().tick(&input);

        let mut gpu = self.gpu.borrow_mut();
        let Some(g) = gpu.as_mut() else {
            return;
        };
        if let Some(videos) = &self.videos {
            videos.upload(g);
        }
        g.resize_if_needed(self.canvas.width(), self.canvas.height());

        let room = self.room.borrow();
        match g.render(&room.scene, &room.camera_view()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

/// Local wall-clock time from the browser.
fn wall_clock() -> WallTime {
    let now = js_sys::Date::new_0();
    WallTime {
        hours: now.get_hours(),
        minutes: now.get_minutes(),
        seconds: now.get_seconds(),
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

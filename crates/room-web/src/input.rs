use crate::dom;
use glam::Vec2;
use room_core::{PointerState, Room};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub window: web::Window,
    pub canvas: web::HtmlCanvasElement,
    pub room: Rc<RefCell<Room>>,
    pub pointer: Rc<RefCell<PointerState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_hover_pointer(&w);
    wire_orbit(&w);
    wire_resize(&w);
}

fn set_pointer(w: &InputWiring, x: f32, y: f32) {
    let vp = dom::viewport(&w.window);
    w.pointer
        .borrow_mut()
        .set_client(x, y, vp.width, vp.height);
}

/// Hover and parallax read the pointer in window-normalized coordinates.
fn wire_hover_pointer(w: &InputWiring) {
    let w1 = w.clone();
    let on_move = Closure::<dyn FnMut(web::MouseEvent)>::new(move |ev: web::MouseEvent| {
        set_pointer(&w1, ev.client_x() as f32, ev.client_y() as f32);
    });
    let _ = w
        .window
        .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
    on_move.forget();

    let w2 = w.clone();
    let on_touch = Closure::<dyn FnMut(web::TouchEvent)>::new(move |ev: web::TouchEvent| {
        if let Some(t) = ev.touches().get(0) {
            set_pointer(&w2, t.client_x() as f32, t.client_y() as f32);
        }
    });
    let _ = w
        .window
        .add_event_listener_with_callback("touchstart", on_touch.as_ref().unchecked_ref());
    on_touch.forget();
}

fn wire_orbit(w: &InputWiring) {
    let w1 = w.clone();
    let down = Closure::<dyn FnMut(web::PointerEvent)>::new(move |ev: web::PointerEvent| {
        let px = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        w1.room.borrow_mut().orbit.pointer_down(px);
        let _ = w1.canvas.set_pointer_capture(ev.pointer_id());
    });
    let _ = w
        .canvas
        .add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref());
    down.forget();

    let w2 = w.clone();
    let moved = Closure::<dyn FnMut(web::PointerEvent)>::new(move |ev: web::PointerEvent| {
        let px = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        w2.room.borrow_mut().orbit.pointer_move(px);
    });
    let _ = w
        .canvas
        .add_event_listener_with_callback("pointermove", moved.as_ref().unchecked_ref());
    moved.forget();

    let w3 = w.clone();
    let up = Closure::<dyn FnMut(web::PointerEvent)>::new(move |ev: web::PointerEvent| {
        w3.room.borrow_mut().orbit.pointer_up();
        let _ = w3.canvas.release_pointer_capture(ev.pointer_id());
    });
    for kind in ["pointerup", "pointercancel"] {
        let _ = w
            .canvas
            .add_event_listener_with_callback(kind, up.as_ref().unchecked_ref());
    }
    up.forget();

    let w4 = w.clone();
    let wheel = Closure::<dyn FnMut(web::WheelEvent)>::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        w4.room.borrow_mut().orbit.wheel(ev.delta_y() as f32);
    });
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    let _ = w.canvas.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        wheel.as_ref().unchecked_ref(),
        &opts,
    );
    wheel.forget();
}

fn wire_resize(w: &InputWiring) {
    let w1 = w.clone();
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        dom::sync_canvas_backing_size(&w1.canvas);
        w1.room.borrow_mut().resize(dom::viewport(&w1.window));
    });
    let _ = w
        .window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    on_resize.forget();
}

use crate::constants::{DRAWER_CLOSE_ID, ENTER_BUTTON_ID, MUTE_TOGGLE_ID, OPEN_CLASS, SIDE_DRAWER_ID};
use crate::dom::{add_click_listener, set_hidden};
use crate::media::BackgroundAudio;
use instant::Instant;
use room_core::ui::{Drawer, DrawerClick, MuteToggle, Section};
use room_core::Room;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct UiWiring {
    pub document: web::Document,
    pub room: Rc<RefCell<Room>>,
    pub audio: Option<BackgroundAudio>,
    pub started: Instant,
}

pub fn wire_ui(w: UiWiring) {
    wire_enter(&w);
    wire_mute(&w);
    wire_drawer(&w);
}

fn wire_enter(w: &UiWiring) {
    let w2 = w.clone();
    add_click_listener(&w.document, ENTER_BUTTON_ID, move || {
        let now = w2.started.elapsed().as_secs_f32();
        w2.room.borrow_mut().enter(now);
        if let Some(audio) = &w2.audio {
            audio.start();
        }
        if let Some(el) = w2.document.get_element_by_id(ENTER_BUTTON_ID) {
            set_hidden(&el, true);
        }
        log::info!("[ui] entered room");
    });
}

fn wire_mute(w: &UiWiring) {
    let state = Rc::new(RefCell::new(MuteToggle::default()));
    render_mute(&w.document, &state.borrow());
    let w2 = w.clone();
    add_click_listener(&w.document, MUTE_TOGGLE_ID, move || {
        let muted = state.borrow_mut().toggle();
        if let Some(audio) = &w2.audio {
            audio.set_muted(muted);
        }
        render_mute(&w2.document, &state.borrow());
    });
}

fn render_mute(document: &web::Document, m: &MuteToggle) {
    if let Some(el) = document.get_element_by_id(m.visible_icon()) {
        set_hidden(&el, false);
    }
    if let Some(el) = document.get_element_by_id(m.hidden_icon()) {
        set_hidden(&el, true);
    }
}

/// Classify a document click relative to the drawer and its buttons.
fn drawer_click(target: &web::Element) -> DrawerClick {
    let within = |id: &str| matches!(target.closest(&format!("#{}", id)), Ok(Some(_)));
    if let Some(s) = Section::ALL.into_iter().find(|s| within(&s.button_id())) {
        return DrawerClick::Button(s);
    }
    if within(DRAWER_CLOSE_ID) {
        return DrawerClick::Close;
    }
    if within(SIDE_DRAWER_ID) {
        return DrawerClick::Inside;
    }
    DrawerClick::Outside
}

fn render_drawer(document: &web::Document, d: &Drawer) {
    if let Some(el) = document.get_element_by_id(SIDE_DRAWER_ID) {
        let _ = el.class_list().toggle_with_force(OPEN_CLASS, d.is_open());
    }
    for s in Section::ALL {
        if let Some(panel) = document.get_element_by_id(&s.panel_id()) {
            set_hidden(&panel, d.open_section() != Some(s));
        }
    }
}

fn wire_drawer(w: &UiWiring) {
    let drawer = Rc::new(RefCell::new(Drawer::default()));
    render_drawer(&w.document, &drawer.borrow());

    let document = w.document.clone();
    let closure = Closure::<dyn FnMut(web::MouseEvent)>::new(move |ev: web::MouseEvent| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
            return;
        };
        let click = drawer_click(&target);
        if drawer.borrow_mut().click(click) {
            render_drawer(&document, &drawer.borrow());
            log::debug!("[ui] drawer {:?}", drawer.borrow().open_section());
        }
    });
    let _ = w
        .document
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

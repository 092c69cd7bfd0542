use crate::constants::{FADE_OUT_CLASS, LOADING_PROGRESS_ID, LOADING_SCREEN_ID};
use room_core::constants::LOADING_FADE_OUT_MS;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn set_progress(document: &web::Document, percent: f32) {
    if let Some(el) = document
        .get_element_by_id(LOADING_PROGRESS_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        let _ = el
            .style()
            .set_property("width", &format!("{:.0}%", percent.clamp(0.0, 100.0)));
    }
}

/// Fade the loading screen out and remove it once the transition has run.
pub fn finish(document: &web::Document) {
    let Some(el) = document.get_element_by_id(LOADING_SCREEN_ID) else {
        return;
    };
    let _ = el.class_list().add_1(FADE_OUT_CLASS);
    let Some(window) = web::window() else {
        el.remove();
        return;
    };
    let remove = Closure::once_into_js(move || el.remove());
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            remove.unchecked_ref(),
            LOADING_FADE_OUT_MS,
        )
        .is_err()
    {
        log::warn!("[load] could not schedule loading screen removal");
    }
}

use crate::keys::{action_for_key, lifecycle_for, KeyAction, Lifecycle};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_global_keydown(mut handler: impl FnMut(KeyAction) + 'static) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
                    return;
                }
                if let Some(action) = action_for_key(&ev.key()) {
                    handler(action);
                }
            }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// `pagehide` and `pageshow`, told apart from back/forward cache moves.
pub fn wire_page_lifecycle(handler: impl FnMut(Lifecycle) + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let handler = Rc::new(RefCell::new(handler));
    for event in ["pagehide", "pageshow"] {
        let handler = handler.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(
            move |ev: web::PageTransitionEvent| {
                if let Some(stage) = lifecycle_for(event, ev.persisted()) {
                    (handler.borrow_mut())(stage);
                }
            },
        ) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

use crate::constants::{HIDDEN_CLASS, PRELOADER_COUNTER_ID, PRELOADER_ENTER_ID, PRELOADER_ID};
use crate::dom;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(PRELOADER_ID) {
        dom::set_class(&el, HIDDEN_CLASS, false);
        let _ = el.set_attribute("style", "");
    }
}

// The class drives the exit transition; the inline style is the fallback
// when no stylesheet defines it.
#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(PRELOADER_ID) {
        dom::set_class(&el, HIDDEN_CLASS, true);
        let _ = el.set_attribute("style", "display:none");
        let _ = el.set_attribute("aria-hidden", "true");
    }
}

pub fn set_counter(document: &web::Document, label: &str) {
    dom::set_text(document, PRELOADER_COUNTER_ID, label);
}

/// The enter button stays hidden until the counter completes.
pub fn offer_enter(document: &web::Document, offered: bool) {
    if let Some(el) = document.get_element_by_id(PRELOADER_ENTER_ID) {
        dom::set_class(&el, HIDDEN_CLASS, !offered);
        if offered {
            let _ = el.remove_attribute("disabled");
        } else {
            let _ = el.set_attribute("disabled", "");
        }
    }
}

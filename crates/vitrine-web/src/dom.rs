use crate::constants::PAGE_SECTION_ID;
use vitrine_core::{Bounds, ElementMeasure, ElementStyle, StyleSink, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] missing #{}; click handler not wired", element_id);
    }
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn set_style(el: &web::Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub fn set_class(el: &web::Element, class: &str, on: bool) {
    let list = el.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}

pub fn viewport(window: &web::Window) -> Viewport {
    let scroll_y = window.scroll_y().unwrap_or(0.0) as f32;
    let height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0) as f32;
    Viewport { scroll_y, height }
}

/// Measures section containers by element id, in document coordinates.
pub struct DomMeasure {
    document: web::Document,
    scroll_y: f32,
}

impl DomMeasure {
    pub fn new(document: web::Document, viewport: Viewport) -> Self {
        Self {
            document,
            scroll_y: viewport.scroll_y,
        }
    }
}

impl ElementMeasure for DomMeasure {
    fn bounds(&self, element: &str) -> Option<Bounds> {
        if let Some(el) = self.document.get_element_by_id(element) {
            let rect = el.get_bounding_client_rect();
            return Some(Bounds::new(
                rect.top() as f32 + self.scroll_y,
                rect.height() as f32,
            ));
        }
        if element == PAGE_SECTION_ID {
            let root = self.document.document_element()?;
            return Some(Bounds::new(0.0, root.scroll_height() as f32));
        }
        None
    }
}

/// Writes composed styles onto elements by id; missing elements are skipped.
pub struct DomStyleSink {
    document: web::Document,
}

impl DomStyleSink {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }
}

impl StyleSink for DomStyleSink {
    fn apply(&mut self, element: &str, style: &ElementStyle) {
        let Some(el) = self.document.get_element_by_id(element) else {
            return;
        };
        for (property, value) in style.properties() {
            set_style(&el, property, &value);
        }
    }

    fn set_text(&mut self, element: &str, text: &str) {
        set_text(&self.document, element, text);
    }
}

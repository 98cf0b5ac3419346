use crate::constants::SLOW_FRAME_MS;
use crate::dom::{self, DomMeasure, DomStyleSink};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use vitrine_core::Stage;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub document: web::Document,
    pub stage: Rc<RefCell<Stage>>,
    pub sink: DomStyleSink,
    pub running: Rc<Cell<bool>>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(document: web::Document, stage: Rc<RefCell<Stage>>, running: Rc<Cell<bool>>) -> Self {
        Self {
            sink: DomStyleSink::new(document.clone()),
            document,
            stage,
            running,
            last_instant: Instant::now(),
        }
    }

    /// One pass: measure every mounted section, publish, map, write styles.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        let Some(window) = web::window() else {
            return;
        };
        let viewport = dom::viewport(&window);
        let measure = DomMeasure::new(self.document.clone(), viewport);
        let report = {
            let mut stage = self.stage.borrow_mut();
            stage.advance(dt);
            stage.frame(viewport, &measure, &mut self.sink)
        };

        let ms = dt.as_secs_f32() * 1000.0;
        if ms > SLOW_FRAME_MS {
            log::debug!(
                "[frame] {:.1} ms: {} sections sampled, {} skipped, {} styled",
                ms,
                report.samples.len(),
                report.skipped,
                report.styled
            );
        }
    }
}

/// requestAnimationFrame loop; it stops rescheduling once `running` is cleared.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let running = frame_ctx.borrow().running.clone();
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running.get() {
            log::info!("[frame] loop stopped");
            return;
        }
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

use fnv::FnvHashMap;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use vitrine_core::{TimerHandle, TimerHost};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `setTimeout` backed timer host. Each timeout calls `on_fire` with the
/// handle it was scheduled under.
pub struct BrowserTimers {
    on_fire: Rc<dyn Fn(TimerHandle)>,
    live: FnvHashMap<u64, i32>,
    next: u64,
}

impl BrowserTimers {
    pub fn new(on_fire: Rc<dyn Fn(TimerHandle)>) -> Self {
        Self {
            on_fire,
            live: FnvHashMap::default(),
            next: 0,
        }
    }

    /// Forget a handle whose timeout already ran.
    pub fn fired(&mut self, handle: TimerHandle) {
        self.live.remove(&handle.0);
    }

    pub fn cancel_all(&mut self) {
        let handles: Vec<u64> = self.live.keys().copied().collect();
        for h in handles {
            self.cancel(TimerHandle(h));
        }
    }
}

impl TimerHost for BrowserTimers {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next);
        self.next += 1;
        let fire = self.on_fire.clone();
        // once_into_js frees itself after the call
        let callback = Closure::once_into_js(move || fire(handle));
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        match web::window().map(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                ms,
            )
        }) {
            Some(Ok(id)) => {
                self.live.insert(handle.0, id);
            }
            Some(Err(e)) => log::error!("[timers] setTimeout failed: {:?}", e),
            None => log::error!("[timers] no window"),
        }
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(id) = self.live.remove(&handle.0) {
            if let Some(w) = web::window() {
                w.clear_timeout_with_handle(id);
            }
        }
    }
}

/// Repeating `setInterval`; the handler returns `false` to stop it.
pub fn every(period: Duration, mut handler: impl FnMut() -> bool + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let id_tick = id.clone();
    let closure = Closure::wrap(Box::new(move || {
        if !handler() {
            if let (Some(w), Some(id)) = (web::window(), id_tick.take()) {
                w.clear_interval_with_handle(id);
            }
        }
    }) as Box<dyn FnMut()>);
    let ms = period.as_millis().min(i32::MAX as u128) as i32;
    match window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        ms,
    ) {
        Ok(handle) => id.set(Some(handle)),
        Err(e) => log::error!("[timers] setInterval failed: {:?}", e),
    }
    closure.forget();
}

use crate::constants::{CADENCE_STAGE_ID, CADENCE_WORD_ID};
use crate::dom;
use crate::keys::jitter_transform;
use crate::timers::BrowserTimers;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use vitrine_core::{CadenceConfig, CadenceDriver, TimerHandle, Variant};
use web_sys as web;

const VARIANTS: [Variant; 3] = [Variant::Dark, Variant::Light, Variant::Accent];

/// Word strobe bound to `#cadence-word`, ticking on `setTimeout`.
pub struct CadenceView {
    driver: RefCell<CadenceDriver<StdRng>>,
    timers: RefCell<BrowserTimers>,
    document: web::Document,
}

impl CadenceView {
    pub fn mount(document: web::Document, config: &CadenceConfig) -> anyhow::Result<Rc<Self>> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let driver = CadenceDriver::from_config(config, rng)?;
        let view = Rc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let on_fire: Rc<dyn Fn(TimerHandle)> = Rc::new(move |handle| {
                if let Some(view) = weak.upgrade() {
                    view.tick(handle);
                }
            });
            Self {
                driver: RefCell::new(driver),
                timers: RefCell::new(BrowserTimers::new(on_fire)),
                document,
            }
        });
        {
            let driver = view.driver.borrow();
            view.render(driver.current(), driver.variant(), driver.jitter());
        }
        view.driver
            .borrow_mut()
            .start(&mut *view.timers.borrow_mut());
        log::info!("[cadence] started");
        Ok(view)
    }

    fn tick(&self, handle: TimerHandle) {
        let event = {
            let mut timers = self.timers.borrow_mut();
            timers.fired(handle);
            self.driver.borrow_mut().on_timer(handle, &mut *timers)
        };
        if let Some(ev) = event {
            self.render(&ev.value, ev.variant, ev.jitter);
        }
    }

    pub fn stop(&self) {
        let mut timers = self.timers.borrow_mut();
        self.driver.borrow_mut().stop(&mut *timers);
        timers.cancel_all();
        log::info!("[cadence] stopped");
    }

    fn render(&self, word: &str, variant: Variant, jitter: Vec2) {
        let theme = variant.theme();
        if let Some(el) = self.document.get_element_by_id(CADENCE_WORD_ID) {
            el.set_text_content(Some(word));
            dom::set_style(&el, "transform", &jitter_transform(jitter));
            dom::set_style(&el, "color", &theme.foreground.to_string());
        }
        if let Some(stage) = self.document.get_element_by_id(CADENCE_STAGE_ID) {
            for v in VARIANTS {
                dom::set_class(&stage, v.class_name(), v == variant);
            }
            dom::set_style(&stage, "background-color", &theme.background.to_string());
        }
    }
}

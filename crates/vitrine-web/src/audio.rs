use std::cell::RefCell;
use std::rc::Rc;
use vitrine_core::{AudioDevice, MusicConfig, PlaybackError};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub type SettleFn = Rc<dyn Fn(Result<(), PlaybackError>)>;

/// `HTMLAudioElement` backed device. `play()` resolves later; the outcome is
/// handed to the settle callback installed by the page.
pub struct HtmlAudioDevice {
    element: web::HtmlAudioElement,
    on_settled: Rc<RefCell<Option<SettleFn>>>,
}

impl HtmlAudioDevice {
    pub fn new(config: &MusicConfig) -> anyhow::Result<Self> {
        let element = web::HtmlAudioElement::new_with_src(&config.src)
            .map_err(|e| anyhow::anyhow!("audio element: {:?}", e))?;
        element.set_loop(config.looped);
        element.set_preload("auto");
        Ok(Self {
            element,
            on_settled: Rc::new(RefCell::new(None)),
        })
    }

    pub fn settle_slot(&self) -> Rc<RefCell<Option<SettleFn>>> {
        self.on_settled.clone()
    }
}

impl AudioDevice for HtmlAudioDevice {
    fn start_playback(&mut self) {
        // Called from inside the gesture handler; only the settlement is async.
        let result = self.element.play();
        let slot = self.on_settled.clone();
        spawn_local(async move {
            let outcome = match result {
                Ok(promise) => JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|e| PlaybackError::new(format!("{:?}", e))),
                Err(e) => Err(PlaybackError::new(format!("{:?}", e))),
            };
            let callback = slot.borrow().clone();
            match callback {
                Some(settle) => settle(outcome),
                None => log::warn!("[audio] playback settled before the player was wired"),
            }
        });
    }

    fn pause(&mut self) {
        let _ = self.element.pause();
    }

    fn set_volume(&mut self, volume: f32) {
        self.element.set_volume(volume as f64);
    }

    fn set_muted(&mut self, muted: bool) {
        self.element.set_muted(muted);
    }
}

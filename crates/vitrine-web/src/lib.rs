#![cfg(target_arch = "wasm32")]
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use vitrine_core::{
    settle_playback, MusicPlayer, PageConfig, Preloader, ReadinessState, ReadinessStore, Stage,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod cadence;
mod constants;
mod content;
mod dom;
mod events;
mod frame;
mod keys;
mod overlay;
mod timers;

use audio::HtmlAudioDevice;
use cadence::CadenceView;
use constants::*;
use keys::{KeyAction, Lifecycle};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("vitrine-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

type Player = Rc<RefCell<MusicPlayer<HtmlAudioDevice>>>;

/// Everything the page wiring shares between event handlers.
struct Page {
    document: web::Document,
    config: PageConfig,
    store: ReadinessStore,
    player: Player,
    stage: Rc<RefCell<Stage>>,
    /// Flag of the current frame loop; each start gets a fresh one.
    running: RefCell<Rc<Cell<bool>>>,
    cadence: RefCell<Option<Rc<CadenceView>>>,
    preloader_done: Cell<bool>,
    mounted: Cell<bool>,
}

impl Page {
    fn enter(&self) {
        if !self.preloader_done.get() {
            log::debug!("[page] enter ignored while loading");
            return;
        }
        self.store.entry_gate().enter();
    }

    fn on_readiness(&self, state: &ReadinessState) {
        self.player.borrow_mut().on_readiness(state);
        if state.is_ready && !self.mounted.get() {
            self.mounted.set(true);
            self.mount_main();
        }
    }

    /// Gate opened: swap the preloader for the main tree and start its effects.
    fn mount_main(&self) {
        overlay::hide(&self.document);
        if let Some(body) = self.document.body() {
            dom::set_class(&body, READY_CLASS, true);
        }

        match self
            .document
            .get_element_by_id(MAIN_TEMPLATE_ID)
            .and_then(|el| el.dyn_into::<web::HtmlTemplateElement>().ok())
        {
            Some(template) => {
                let target = self.document.get_element_by_id(MAIN_CONTENT_ID);
                let cloned = template.content().clone_node_with_deep(true);
                match (target, cloned) {
                    (Some(target), Ok(node)) => {
                        if let Err(e) = target.append_child(&node) {
                            log::error!("[page] mounting main content failed: {:?}", e);
                        }
                    }
                    (None, _) => log::warn!("[page] missing #{}", MAIN_CONTENT_ID),
                    (_, Err(e)) => log::error!("[page] cloning template failed: {:?}", e),
                }
            }
            None => log::warn!("[page] missing <template id=\"{}\">", MAIN_TEMPLATE_ID),
        }

        self.start_effects();

        spawn_local(content::load_and_apply(self.document.clone()));
    }

    /// Mount every section, start a frame loop and the cadence word.
    fn start_effects(&self) {
        {
            let mut stage = self.stage.borrow_mut();
            for section in &self.config.sections {
                if let Err(e) = stage.mount(section) {
                    log::error!("[page] section '{}' not mounted: {}", section.id, e);
                }
            }
        }
        let running = Rc::new(Cell::new(true));
        self.running.replace(running.clone()).set(false);
        frame::start_loop(Rc::new(RefCell::new(frame::FrameContext::new(
            self.document.clone(),
            self.stage.clone(),
            running,
        ))));

        if self.document.get_element_by_id(CADENCE_WORD_ID).is_some() {
            match CadenceView::mount(self.document.clone(), &self.config.cadence) {
                Ok(view) => {
                    if let Some(old) = self.cadence.borrow_mut().replace(view) {
                        old.stop();
                    }
                }
                Err(e) => log::error!("[page] cadence not started: {}", e),
            }
        }
    }

    /// Stop the frame loop and cadence timers, detach every section.
    fn stop_effects(&self) {
        self.running.borrow().set(false);
        self.stage.borrow_mut().unmount_all();
        if let Some(view) = self.cadence.borrow_mut().take() {
            view.stop();
        }
    }

    fn on_lifecycle(&self, event: Lifecycle) {
        match event {
            Lifecycle::Suspend => {
                self.stop_effects();
                log::info!("[page] suspended");
            }
            Lifecycle::Resume => {
                if self.mounted.get() {
                    self.start_effects();
                }
                log::info!("[page] resumed");
            }
            Lifecycle::Shutdown => self.shutdown(),
        }
    }

    fn toggle_play(&self) {
        if !self.store.reader().is_ready() {
            return;
        }
        self.player.borrow_mut().toggle_play();
        sync_music_controls(&self.document, &self.player);
    }

    fn toggle_mute(&self) {
        self.player.borrow_mut().toggle_mute();
        sync_music_controls(&self.document, &self.player);
    }

    /// Page is going away: no frame, timer or audio callback may run after this.
    fn shutdown(&self) {
        self.stop_effects();
        let mut player = self.player.borrow_mut();
        if player.is_playing() {
            player.toggle_play();
        }
        log::info!("[page] shut down");
    }
}

fn sync_music_controls(document: &web::Document, player: &Player) {
    let player = player.borrow();
    if let Some(el) = document.get_element_by_id(MUSIC_TOGGLE_ID) {
        dom::set_class(&el, PLAYING_CLASS, player.is_playing());
    }
    if let Some(el) = document.get_element_by_id(MUSIC_MUTE_ID) {
        dom::set_class(&el, MUTED_CLASS, player.is_muted());
    }
}

fn load_config(document: &web::Document) -> PageConfig {
    let Some(text) = document
        .get_element_by_id(PAGE_CONFIG_ID)
        .and_then(|el| el.text_content())
    else {
        return PageConfig::default();
    };
    match PageConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("[page] ignoring #{}: {}", PAGE_CONFIG_ID, e);
            PageConfig::default()
        }
    }
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let config = load_config(&document);
    let store = ReadinessStore::new();

    let device = HtmlAudioDevice::new(&config.music)?;
    let settle_slot = device.settle_slot();
    let player: Player = Rc::new(RefCell::new(MusicPlayer::new(device, &config.music)));
    {
        let player = Rc::downgrade(&player);
        let confirm = store.playback_confirm();
        let doc = document.clone();
        *settle_slot.borrow_mut() = Some(Rc::new(move |result| {
            if let Some(player) = player.upgrade() {
                settle_playback(&player, &confirm, result);
                sync_music_controls(&doc, &player);
            }
        }));
    }

    let page = Rc::new(Page {
        document: document.clone(),
        config,
        store: store.clone(),
        player,
        stage: Rc::new(RefCell::new(Stage::new())),
        running: RefCell::new(Rc::new(Cell::new(false))),
        cadence: RefCell::new(None),
        preloader_done: Cell::new(false),
        mounted: Cell::new(false),
    });

    {
        let page = page.clone();
        store
            .reader()
            .subscribe(move |state| page.on_readiness(state));
    }

    // Preloader counter
    overlay::show(&document);
    overlay::offer_enter(&document, false);
    {
        let page = page.clone();
        let mut preloader = Preloader::new(&page.config.preloader);
        let mut rng = StdRng::from_entropy();
        overlay::set_counter(&document, &preloader.label());
        let period = Duration::from_millis(page.config.preloader.tick_ms as u64);
        timers::every(period, move || {
            let more = preloader.advance(&mut rng);
            overlay::set_counter(&page.document, &preloader.label());
            if !more {
                page.preloader_done.set(true);
                overlay::offer_enter(&page.document, true);
                log::info!("[page] preloader complete");
            }
            more
        });
    }

    {
        let page = page.clone();
        dom::add_click_listener(&document, PRELOADER_ENTER_ID, move || page.enter());
    }
    {
        let page = page.clone();
        dom::add_click_listener(&document, MUSIC_TOGGLE_ID, move || page.toggle_play());
    }
    {
        let page = page.clone();
        dom::add_click_listener(&document, MUSIC_MUTE_ID, move || page.toggle_mute());
    }
    {
        let page = page.clone();
        events::wire_global_keydown(move |action| match action {
            KeyAction::Enter => page.enter(),
            KeyAction::ToggleMute => page.toggle_mute(),
            KeyAction::TogglePlay => page.toggle_play(),
        });
    }
    events::wire_page_lifecycle(move |event| page.on_lifecycle(event));

    Ok(())
}

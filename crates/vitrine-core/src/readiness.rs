//! Session-wide readiness gate shared by the preloader, the main content tree
//! and the music player.
//!
//! The store is an explicit container handed to whoever needs it. Reading and
//! writing are split into capabilities: [`ReadinessReader`] observes,
//! [`EntryGate`] flips `is_ready`/`music_requested`, and [`PlaybackConfirm`]
//! records that audio actually started.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadinessState {
    pub is_ready: bool,
    pub music_requested: bool,
    pub music_started: bool,
}

/// Externally visible phase. There is no transition back to `Loading`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

impl ReadinessState {
    pub fn phase(&self) -> Phase {
        if self.is_ready {
            Phase::Ready
        } else {
            Phase::Loading
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Rc<RefCell<dyn FnMut(&ReadinessState)>>;

#[derive(Default)]
struct Inner {
    state: ReadinessState,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
    dispatching: bool,
    dirty: bool,
}

#[derive(Clone, Default)]
pub struct ReadinessStore {
    inner: Rc<RefCell<Inner>>,
}

impl ReadinessStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ReadinessState {
        self.inner.borrow().state
    }

    pub fn reader(&self) -> ReadinessReader {
        ReadinessReader {
            store: self.clone(),
        }
    }

    pub fn entry_gate(&self) -> EntryGate {
        EntryGate {
            store: self.clone(),
        }
    }

    pub fn playback_confirm(&self) -> PlaybackConfirm {
        PlaybackConfirm {
            store: self.clone(),
        }
    }

    fn update(&self, f: impl FnOnce(&mut ReadinessState)) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let before = inner.state;
            f(&mut inner.state);
            inner.state != before
        };
        if changed {
            self.dispatch();
        }
    }

    // Observers may write back into the store; nested changes are coalesced
    // into another pass of the outer loop so every observer sees the final state.
    fn dispatch(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.dispatching {
                inner.dirty = true;
                return;
            }
            inner.dispatching = true;
        }
        loop {
            let (state, observers) = {
                let mut inner = self.inner.borrow_mut();
                inner.dirty = false;
                let observers: Vec<Observer> =
                    inner.observers.iter().map(|(_, o)| o.clone()).collect();
                (inner.state, observers)
            };
            for observer in observers {
                (observer.borrow_mut())(&state);
            }
            let mut inner = self.inner.borrow_mut();
            if !inner.dirty {
                inner.dispatching = false;
                break;
            }
        }
    }
}

/// Read-only view; UI regions hold one of these.
#[derive(Clone)]
pub struct ReadinessReader {
    store: ReadinessStore,
}

impl ReadinessReader {
    pub fn state(&self) -> ReadinessState {
        self.store.state()
    }

    pub fn is_ready(&self) -> bool {
        self.state().is_ready
    }

    pub fn music_requested(&self) -> bool {
        self.state().music_requested
    }

    pub fn music_started(&self) -> bool {
        self.state().music_started
    }

    /// Register an observer. It runs synchronously after every change, inside
    /// the setter that caused it.
    pub fn subscribe(&self, observer: impl FnMut(&ReadinessState) + 'static) -> SubscriptionId {
        let mut inner = self.store.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.observers.push((id, Rc::new(RefCell::new(observer))));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.store.inner.borrow_mut();
        let before = inner.observers.len();
        inner.observers.retain(|(sid, _)| *sid != id);
        inner.observers.len() != before
    }
}

/// Write capability owned by the preloader's enter action.
#[derive(Clone)]
pub struct EntryGate {
    store: ReadinessStore,
}

impl EntryGate {
    /// The user gesture: request music and open the gate in one synchronous
    /// call so the audio unlock stays inside the gesture handler.
    pub fn enter(&self) {
        if self.store.state().is_ready {
            log::debug!("[ready] enter ignored, already ready");
            return;
        }
        log::info!("[ready] entering");
        self.set_music_requested(true);
        self.set_ready(true);
    }

    /// `true` is sticky: once ready, `set_ready(false)` is ignored.
    pub fn set_ready(&self, ready: bool) {
        if !ready && self.store.state().is_ready {
            log::warn!("[ready] refusing to leave the ready state");
            return;
        }
        self.store.update(|s| s.is_ready = ready);
    }

    pub fn set_music_requested(&self, requested: bool) {
        self.store.update(|s| s.music_requested = requested);
    }
}

/// Write capability owned by the audio confirmation callback.
#[derive(Clone)]
pub struct PlaybackConfirm {
    store: ReadinessStore,
}

impl PlaybackConfirm {
    pub fn set_music_started(&self, started: bool) {
        self.store.update(|s| s.music_started = started);
    }
}

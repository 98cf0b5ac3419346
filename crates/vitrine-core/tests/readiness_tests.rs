// Readiness gate and preloader counter.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use vitrine_core::{Phase, Preloader, PreloaderConfig, ReadinessState, ReadinessStore};

fn record(store: &ReadinessStore) -> Rc<RefCell<Vec<ReadinessState>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    store.reader().subscribe(move |s| sink.borrow_mut().push(*s));
    seen
}

#[test]
fn starts_loading_with_everything_off() {
    let store = ReadinessStore::new();
    let state = store.state();
    assert_eq!(state, ReadinessState::default());
    assert_eq!(state.phase(), Phase::Loading);
}

#[test]
fn enter_sets_ready_and_music_requested_in_one_call() {
    let store = ReadinessStore::new();
    let seen = record(&store);
    store.entry_gate().enter();

    let state = store.state();
    assert!(state.is_ready);
    assert!(state.music_requested);
    assert!(!state.music_started);
    assert_eq!(state.phase(), Phase::Ready);

    let seen = seen.borrow();
    // music is requested before the gate opens
    assert_eq!(seen.len(), 2);
    assert!(seen[0].music_requested && !seen[0].is_ready);
    assert!(seen[1].music_requested && seen[1].is_ready);
}

#[test]
fn enter_is_idempotent() {
    let store = ReadinessStore::new();
    let seen = record(&store);
    let gate = store.entry_gate();
    gate.enter();
    let after_first = store.state();
    gate.enter();
    gate.enter();
    assert_eq!(store.state(), after_first);
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn ready_never_returns_to_loading() {
    let store = ReadinessStore::new();
    let gate = store.entry_gate();
    gate.set_ready(true);
    gate.set_ready(false);
    assert!(store.reader().is_ready());
    assert_eq!(store.state().phase(), Phase::Ready);
}

#[test]
fn setting_the_same_value_does_not_notify() {
    let store = ReadinessStore::new();
    let seen = record(&store);
    let gate = store.entry_gate();
    gate.set_music_requested(false);
    gate.set_ready(false);
    assert!(seen.borrow().is_empty());
    gate.set_music_requested(true);
    gate.set_music_requested(true);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn observer_writes_are_coalesced_and_seen_by_everyone() {
    let store = ReadinessStore::new();
    let confirm = store.playback_confirm();
    store.reader().subscribe(move |s| {
        if s.music_requested && !s.music_started {
            confirm.set_music_started(true);
        }
    });
    let seen = record(&store);

    store.entry_gate().enter();

    let final_state = store.state();
    assert!(final_state.music_started);
    assert_eq!(seen.borrow().last().copied(), Some(final_state));
}

#[test]
fn unsubscribed_observers_stop_receiving() {
    let store = ReadinessStore::new();
    let reader = store.reader();
    let count = Rc::new(RefCell::new(0));
    let c = count.clone();
    let id = reader.subscribe(move |_| *c.borrow_mut() += 1);
    store.entry_gate().set_music_requested(true);
    assert!(reader.unsubscribe(id));
    assert!(!reader.unsubscribe(id));
    store.entry_gate().set_ready(true);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn music_started_is_only_set_by_playback_confirm() {
    let store = ReadinessStore::new();
    store.entry_gate().enter();
    assert!(!store.reader().music_started());
    store.playback_confirm().set_music_started(true);
    assert!(store.reader().music_started());
}

#[test]
fn preloader_counts_to_target_without_overshoot() {
    for seed in 0..50u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = PreloaderConfig::default();
        let mut preloader = Preloader::new(&config);
        assert_eq!(preloader.label(), "00");
        assert!(!preloader.can_enter());

        let mut ticks = 0;
        let mut prev = preloader.counter();
        while preloader.advance(&mut rng) {
            ticks += 1;
            let now = preloader.counter();
            assert!(now > prev, "counter must grow every tick");
            assert!(now - prev <= config.max_step);
            assert!(now <= config.target);
            assert!(!preloader.can_enter());
            prev = now;
        }
        assert!(ticks < config.target as usize);
        assert_eq!(preloader.counter(), config.target);
        assert!(preloader.can_enter());
        assert_eq!(preloader.label(), "100");
        assert!(!preloader.advance(&mut rng));
    }
}

// Host-side tests for the pure helpers of the web front-end.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod keys {
    include!("../src/keys.rs");
}

use glam::Vec2;
use keys::*;

#[test]
fn enter_and_music_keys_map_to_actions() {
    assert_eq!(action_for_key("Enter"), Some(KeyAction::Enter));
    assert_eq!(action_for_key("m"), Some(KeyAction::ToggleMute));
    assert_eq!(action_for_key("M"), Some(KeyAction::ToggleMute));
    assert_eq!(action_for_key("p"), Some(KeyAction::TogglePlay));
    assert_eq!(action_for_key("P"), Some(KeyAction::TogglePlay));
}

#[test]
fn other_keys_are_ignored() {
    for key in ["a", " ", "Escape", "enter", "Shift", ""] {
        assert_eq!(action_for_key(key), None, "key {key:?}");
    }
}

#[test]
fn jitter_is_rounded_to_whole_pixels() {
    assert_eq!(jitter_transform(Vec2::new(3.6, -2.4)), "translate(4px, -2px)");
    assert_eq!(jitter_transform(Vec2::new(-0.2, 0.0)), "translate(0px, 0px)");
}

#[test]
fn photo_slots_parse_section_and_index() {
    assert_eq!(parse_photo_slot("gallery:2"), Some(("gallery", 2)));
    assert_eq!(parse_photo_slot(" about : 0"), Some(("about", 0)));
    assert_eq!(parse_photo_slot("gallery"), None);
    assert_eq!(parse_photo_slot(":1"), None);
    assert_eq!(parse_photo_slot("gallery:x"), None);
}

#[test]
fn back_forward_cache_suspends_instead_of_shutting_down() {
    assert_eq!(lifecycle_for("pagehide", true), Some(Lifecycle::Suspend));
    assert_eq!(lifecycle_for("pageshow", true), Some(Lifecycle::Resume));
    assert_eq!(lifecycle_for("pagehide", false), Some(Lifecycle::Shutdown));
    assert_eq!(lifecycle_for("pageshow", false), None);
    assert_eq!(lifecycle_for("visibilitychange", true), None);
}

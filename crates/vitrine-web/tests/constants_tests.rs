// Host-side checks on the DOM contract constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_ids_are_unique_and_selector_safe() {
    let ids = [
        PAGE_CONFIG_ID,
        PRELOADER_ID,
        PRELOADER_COUNTER_ID,
        PRELOADER_ENTER_ID,
        MAIN_TEMPLATE_ID,
        MAIN_CONTENT_ID,
        CADENCE_STAGE_ID,
        CADENCE_WORD_ID,
        MUSIC_TOGGLE_ID,
        MUSIC_MUTE_ID,
    ];
    for (i, id) in ids.iter().enumerate() {
        assert!(!id.is_empty());
        assert!(
            id.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
            "id {id:?}"
        );
        assert!(!ids[..i].contains(id), "duplicate id {id:?}");
    }
}

#[test]
fn page_section_is_not_a_fixed_element() {
    assert_ne!(PAGE_SECTION_ID, MAIN_CONTENT_ID);
    assert!(vitrine_core::site::default_sections()
        .iter()
        .any(|s| s.id == PAGE_SECTION_ID));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn service_urls_are_absolute_paths() {
    assert!(CONTENT_URL.starts_with("/api/"));
    assert!(PHOTOS_URL.starts_with("/api/"));
    assert!(SLOW_FRAME_MS > 16.0);
}

// Pure input and formatting helpers, kept free of web-sys so they run on the host.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Enter,
    ToggleMute,
    TogglePlay,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "Enter" => Some(KeyAction::Enter),
        "m" | "M" => Some(KeyAction::ToggleMute),
        "p" | "P" => Some(KeyAction::TogglePlay),
        _ => None,
    }
}

/// What a page transition means for the running effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Going into the back/forward cache; may come back.
    Suspend,
    /// Restored from the back/forward cache.
    Resume,
    /// Unloading for good.
    Shutdown,
}

/// `pagehide`/`pageshow` plus the event's `persisted` flag. The first
/// `pageshow` of a fresh load is not a transition.
pub fn lifecycle_for(event: &str, persisted: bool) -> Option<Lifecycle> {
    match (event, persisted) {
        ("pagehide", true) => Some(Lifecycle::Suspend),
        ("pagehide", false) => Some(Lifecycle::Shutdown),
        ("pageshow", true) => Some(Lifecycle::Resume),
        _ => None,
    }
}

/// Offset for the incoming cadence word, rounded to whole pixels.
#[inline]
pub fn jitter_transform(jitter: Vec2) -> String {
    format!(
        "translate({}px, {}px)",
        jitter.x.round() as i32,
        jitter.y.round() as i32
    )
}

/// `"gallery:2"` -> `("gallery", 2)`.
pub fn parse_photo_slot(attr: &str) -> Option<(&str, usize)> {
    let (section, slot) = attr.split_once(':')?;
    let slot = slot.trim().parse().ok()?;
    let section = section.trim();
    (!section.is_empty()).then_some((section, slot))
}

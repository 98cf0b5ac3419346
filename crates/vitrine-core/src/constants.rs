// Shared tuning constants used by both web and native front-ends.

// Preloader
pub const PRELOADER_TICK_MS: u32 = 60; // counter refresh interval
pub const PRELOADER_MAX_STEP: u32 = 8; // counter grows by 1..=MAX_STEP per tick
pub const PRELOADER_TARGET: u32 = 100;

// Music
pub const MUSIC_SRC: &str = "/audio/background-music.mp3";
pub const MUSIC_VOLUME: f32 = 0.4;

// Cadence strobe: 124 BPM syncopated rhythm
pub const CADENCE_RHYTHM_MS: [u64; 7] = [483, 241, 120, 120, 483, 241, 483];
pub const CADENCE_WORDS: [&str; 15] = [
    "MENSWEAR",
    "STREETWEAR",
    "TAILORING",
    "SARTORIAL",
    "BOLD",
    "SHARP",
    "URBAN",
    "ICONIC",
    "EDITORIAL",
    "MODERN",
    "MINIMAL",
    "CONCEPT",
    "RAW",
    "AVANT-GARDE",
    "ESSENTIAL",
];
pub const CADENCE_VARIANTS: usize = 3; // dark, light, accent
pub const JITTER_X_SPAN: f32 = 7.0; // px, jitter x in [-SPAN, SPAN)
pub const JITTER_Y_SPAN: f32 = 3.0;

// Scroll
pub const VISIBILITY_MARGIN_PX: f32 = 200.0; // recompute progress this close to the viewport

// Play-once reveals
pub const REVEAL_DURATION_MS: u64 = 800;
pub const REVEAL_MARGIN_PX: f32 = -100.0; // negative: container must be this far inside the viewport
pub const COUNTER_STEPS: u32 = 60;
pub const COUNTER_DECIMALS: usize = 1;
pub const COUNTER_DECIMAL_SEP: char = ',';
pub const COUNTER_GROUP_SEP: char = '.';
